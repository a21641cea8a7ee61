// src/repositories/author_repository.rs
//
// Author persistence

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::Author;
use crate::error::{AppError, AppResult};

use super::keyword_pattern;

pub trait AuthorRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Author>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Author>>;
    /// Case-sensitive substring match on `name`
    fn find_by_keyword(&self, keyword: &str) -> AppResult<Vec<Author>>;
    /// Fails with `UniqueViolation` if the name is already registered
    fn save(&self, name: &str) -> AppResult<Author>;
    /// Idempotent; deleting an absent id is not an error
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
    /// Returns the number of rows affected (0 when the id is absent).
    /// Fails with `UniqueViolation` if the name collides with another author.
    fn update(&self, id: i64, name: &str) -> AppResult<usize>;
}

pub struct SqliteAuthorRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteAuthorRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_author(row: &Row) -> rusqlite::Result<Author> {
        Ok(Author {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }
}

impl AuthorRepository for SqliteAuthorRepository {
    fn find_all(&self) -> AppResult<Vec<Author>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM author ORDER BY id")?;

        let authors: Vec<Author> = stmt
            .query_map([], Self::row_to_author)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(authors)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Author>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare("SELECT id, name FROM author WHERE id = ?1")?;

        match stmt.query_row(params![id], Self::row_to_author) {
            Ok(author) => Ok(Some(author)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    fn find_by_keyword(&self, keyword: &str) -> AppResult<Vec<Author>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name FROM author WHERE name LIKE ?1 ESCAPE '\\' ORDER BY id",
        )?;

        let authors: Vec<Author> = stmt
            .query_map(params![keyword_pattern(keyword)], Self::row_to_author)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(authors)
    }

    fn save(&self, name: &str) -> AppResult<Author> {
        let conn = self.pool.get()?;

        conn.execute("INSERT INTO author (name) VALUES (?1)", params![name])?;

        Ok(Author {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
        })
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute("DELETE FROM author WHERE id = ?1", params![id])?;

        Ok(())
    }

    fn update(&self, id: i64, name: &str) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let affected = conn.execute(
            "UPDATE author SET name = ?1 WHERE id = ?2",
            params![name, id],
        )?;

        Ok(affected)
    }
}
