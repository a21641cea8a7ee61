use serde::{Deserialize, Serialize};

use crate::domain::author::Author;
use crate::domain::{DomainError, DomainResult};

/// A registered book, owned by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned immutable identifier
    pub id: i64,

    /// ISBN, unique across all books
    pub isbn: String,

    /// Book title
    pub title: String,

    /// The owning author, resolved at read time via the author table
    pub author: Author,
}

/// ISBN cannot be blank
pub fn validate_isbn(isbn: &str) -> DomainResult<()> {
    if isbn.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Book isbn cannot be blank".to_string(),
        ));
    }
    Ok(())
}

/// Title cannot be blank
pub fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Book title cannot be blank".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Book domain:
///
/// 1. Identity is store-assigned and immutable
/// 2. No two books share the same isbn (enforced by the store)
/// 3. isbn and title are never blank
/// 4. The author reference always points at an existing author
