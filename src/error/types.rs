// src/error/types.rs
use crate::domain::DomainError;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    #[error("Foreign key constraint violation: {0}")]
    ForeignKeyViolation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

/// Classify SQLite failures before wrapping them.
///
/// Constraint violations carry an extended result code; repositories rely
/// on `UniqueViolation` / `ForeignKeyViolation` surfacing as distinct
/// variants so the HTTP layer can map them to 409 / 400.
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(code, ref message) = err {
            let detail = message.clone().unwrap_or_else(|| code.to_string());
            match code.extended_code {
                ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                    return AppError::UniqueViolation(detail);
                }
                ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                    return AppError::ForeignKeyViolation(detail);
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
