// src/lib.rs
// Bookshelf - Author and book catalog REST service
//
// Architecture:
// - Domain: entities and their invariants
// - Repositories: dumb data mappers over the SQLite store
// - HTTP: controllers mapping verbs/status codes onto repository outcomes
// - Uniqueness and referential integrity live in the store, not in
//   application pre-checks (except the documented author check on book save)

pub mod db;
pub mod domain;
pub mod error;
pub mod http;
pub mod repositories;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{validate_author_name, validate_isbn, validate_title, Author, Book};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_test_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    AuthorRepository, BookRepository, SqliteAuthorRepository, SqliteBookRepository,
};

// ============================================================================
// PUBLIC API - HTTP Server
// ============================================================================

pub use http::{CatalogState, HttpServer, HttpServerConfig};
