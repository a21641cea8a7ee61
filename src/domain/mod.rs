// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

pub mod author;
pub mod book;

pub use author::{validate_author_name, Author};
pub use book::{validate_isbn, validate_title, Book};

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
