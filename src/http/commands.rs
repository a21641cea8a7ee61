// src/http/commands.rs
//
// Validated input shapes for save/update operations.
//
// Every body field deserializes as Option so that a missing field reaches
// explicit validation (400) instead of the framework's default rejection.

use serde::Deserialize;

use crate::domain::{
    validate_author_name, validate_isbn, validate_title, DomainError, DomainResult,
};

#[derive(Debug, Deserialize)]
pub struct AuthorSaveCommand {
    pub name: Option<String>,
}

impl AuthorSaveCommand {
    pub fn into_name(self) -> DomainResult<String> {
        let name = self.name.ok_or(DomainError::MissingField("name"))?;
        validate_author_name(&name)?;
        Ok(name)
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthorUpdateCommand {
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl AuthorUpdateCommand {
    pub fn into_parts(self) -> DomainResult<(i64, String)> {
        let id = self.id.ok_or(DomainError::MissingField("id"))?;
        let name = self.name.ok_or(DomainError::MissingField("name"))?;
        validate_author_name(&name)?;
        Ok((id, name))
    }
}

#[derive(Debug, Deserialize)]
pub struct BookSaveCommand {
    pub isbn: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
}

impl BookSaveCommand {
    pub fn into_parts(self) -> DomainResult<(String, String, i64)> {
        let isbn = self.isbn.ok_or(DomainError::MissingField("isbn"))?;
        let title = self.title.ok_or(DomainError::MissingField("title"))?;
        let author_id = self.author_id.ok_or(DomainError::MissingField("authorId"))?;
        validate_isbn(&isbn)?;
        validate_title(&title)?;
        Ok((isbn, title, author_id))
    }
}

/// Partial update: only `id` is required; omitted fields keep their
/// currently stored values (merged by the controller).
#[derive(Debug, Deserialize)]
pub struct BookUpdateCommand {
    pub id: Option<i64>,
    pub isbn: Option<String>,
    pub title: Option<String>,
    #[serde(rename = "authorId")]
    pub author_id: Option<i64>,
}

/// Keyword search query; `keyword` is required
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub keyword: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_save_requires_name() {
        let cmd: AuthorSaveCommand = serde_json::from_str("{}").unwrap();
        assert!(cmd.into_name().is_err());
    }

    #[test]
    fn test_author_save_rejects_blank_name() {
        let cmd: AuthorSaveCommand = serde_json::from_str(r#"{"name": "  "}"#).unwrap();
        assert!(cmd.into_name().is_err());
    }

    #[test]
    fn test_book_save_field_names() {
        let cmd: BookSaveCommand =
            serde_json::from_str(r#"{"isbn": "1", "title": "t", "authorId": 7}"#).unwrap();
        let (isbn, title, author_id) = cmd.into_parts().unwrap();
        assert_eq!((isbn.as_str(), title.as_str(), author_id), ("1", "t", 7));
    }

    #[test]
    fn test_book_update_only_id_required() {
        let cmd: BookUpdateCommand = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert_eq!(cmd.id, Some(3));
        assert!(cmd.isbn.is_none());
        assert!(cmd.title.is_none());
        assert!(cmd.author_id.is_none());
    }
}
