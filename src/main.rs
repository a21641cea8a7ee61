// src/main.rs

use std::sync::Arc;

use bookshelf::db::{create_connection_pool, initialize_database};
use bookshelf::http::{CatalogState, HttpServer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool()?);

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }
    tracing::info!("database ready");

    // 2. REPOSITORIES + SHARED STATE
    let state = Arc::new(CatalogState::new(pool));

    // 3. HTTP SERVER
    HttpServer::new(state).start().await?;

    Ok(())
}
