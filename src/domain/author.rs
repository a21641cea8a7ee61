use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// A registered author.
///
/// The author's books are a derived, on-demand query
/// (`BookRepository::find_by_author`), never a stored back-pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned immutable identifier
    pub id: i64,

    /// Author name, unique across all authors
    pub name: String,
}

/// Author name cannot be blank
pub fn validate_author_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Author name cannot be blank".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Author domain:
///
/// 1. Identity is store-assigned and immutable
/// 2. No two authors share the same name (enforced by the store)
/// 3. Name is never blank
/// 4. Deleting an author cascades to its books (owned by the store)

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        assert!(validate_author_name("森博嗣").is_ok());
    }

    #[test]
    fn test_blank_name_fails() {
        assert!(validate_author_name("   ").is_err());
        assert!(validate_author_name("").is_err());
    }
}
