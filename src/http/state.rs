// src/http/state.rs

use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::repositories::{
    AuthorRepository, BookRepository, SqliteAuthorRepository, SqliteBookRepository,
};

/// State shared across all handlers.
/// Repositories are Arc-wrapped trait objects so handlers never see the
/// concrete store implementation.
pub struct CatalogState {
    pub author_repo: Arc<dyn AuthorRepository>,
    pub book_repo: Arc<dyn BookRepository>,
}

impl CatalogState {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self {
            author_repo: Arc::new(SqliteAuthorRepository::new(pool.clone())),
            book_repo: Arc::new(SqliteBookRepository::new(pool)),
        }
    }
}
