// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic
// - NO invariant enforcement beyond what the store rejects
// - NO cross-repository calls
// - Explicit SQL only

pub mod author_repository;
pub mod book_repository;

pub use author_repository::{AuthorRepository, SqliteAuthorRepository};
pub use book_repository::{BookRepository, SqliteBookRepository};

/// Build a `LIKE` pattern matching `keyword` as a literal substring.
///
/// `%`, `_` and the escape character itself are escaped; queries using the
/// result must carry `ESCAPE '\'`.
pub(crate) fn keyword_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
