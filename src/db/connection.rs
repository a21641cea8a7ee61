// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Get the database file path
///
/// The `BOOKSHELF_DB` environment variable overrides the default location.
/// Default path structure: {APP_DATA}/bookshelf/bookshelf.db
pub fn get_database_path() -> AppResult<PathBuf> {
    if let Ok(path) = std::env::var("BOOKSHELF_DB") {
        return Ok(PathBuf::from(path));
    }

    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let bookshelf_dir = app_data_dir.join("bookshelf");

    // Ensure directory exists
    std::fs::create_dir_all(&bookshelf_dir).map_err(AppError::Io)?;

    Ok(bookshelf_dir.join("bookshelf.db"))
}

/// Connection init shared by every pool member.
///
/// - Foreign keys enabled (not default in SQLite); the book→author
///   reference and its ON DELETE CASCADE depend on it
/// - Case-sensitive LIKE so keyword search is an exact substring match
/// - WAL mode and a busy timeout for concurrent request handling
fn init_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "PRAGMA foreign_keys = ON;
         PRAGMA case_sensitive_like = ON;
         PRAGMA journal_mode = WAL;
         PRAGMA synchronous = NORMAL;
         PRAGMA busy_timeout = 5000;",
    )
}

/// Create a connection pool at the default database path
pub fn create_connection_pool() -> AppResult<ConnectionPool> {
    let db_path = get_database_path()?;
    create_connection_pool_at(&db_path)
}

/// Create a connection pool backed by the given database file
pub fn create_connection_pool_at(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(init_connection);

    let pool = Pool::builder()
        .max_size(15)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Create an in-memory connection pool (for testing)
///
/// The pool is capped at one connection: every member of an in-memory pool
/// would otherwise see its own private database.
pub fn create_test_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory().with_init(init_connection);

    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create test pool: {}", e)))?;

    Ok(pool)
}

/// Create a standalone in-memory connection (for unit tests)
pub fn create_test_connection() -> AppResult<Connection> {
    let mut conn = Connection::open_in_memory().map_err(AppError::Database)?;
    init_connection(&mut conn).map_err(AppError::Database)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        // Verify it's a working connection
        let result: i32 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0)).unwrap();
        assert_eq!(result, 2);

        // Verify foreign keys are enabled
        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_test_pool_shares_one_database() {
        let pool = create_test_pool().unwrap();

        {
            let conn = pool.get().unwrap();
            conn.execute_batch("CREATE TABLE probe (id INTEGER)").unwrap();
        }

        // A second checkout must see the table created by the first
        let conn = pool.get().unwrap();
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='probe'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_file_backed_pool() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("bookshelf.db");

        let pool = create_connection_pool_at(&db_path).unwrap();
        let conn = pool.get().unwrap();

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
        assert!(db_path.exists());
    }
}
