// src/repositories/book_repository.rs
//
// Book persistence
//
// Every read joins the author table so the returned Book carries its
// resolved author. The update is an unconditional set of all three
// columns: merging "omitted vs. explicit" fields is the caller's job.

use std::sync::Arc;

use rusqlite::{params, Row};

use crate::db::ConnectionPool;
use crate::domain::{Author, Book};
use crate::error::{AppError, AppResult};

use super::keyword_pattern;

const BOOK_SELECT: &str = "SELECT book.id, book.isbn, book.title,
            author.id AS author_id, author.name AS author_name
     FROM book
     JOIN author ON author.id = book.author_id";

pub trait BookRepository: Send + Sync {
    fn find_all(&self) -> AppResult<Vec<Book>>;
    fn find_by_id(&self, id: i64) -> AppResult<Option<Book>>;
    /// Case-sensitive substring match on `title`
    fn find_by_keyword(&self, keyword: &str) -> AppResult<Vec<Book>>;
    /// Derived back-reference: all books owned by the given author
    fn find_by_author(&self, author_id: i64) -> AppResult<Vec<Book>>;
    /// The author must already exist; the caller resolves it beforehand.
    /// Fails with `UniqueViolation` if the isbn is already registered.
    fn save(&self, isbn: &str, title: &str, author: &Author) -> AppResult<Book>;
    /// Idempotent; deleting an absent id is not an error
    fn delete_by_id(&self, id: i64) -> AppResult<()>;
    /// Returns the number of rows affected (0 when the id is absent).
    /// Fails with `UniqueViolation` on isbn collision and with
    /// `ForeignKeyViolation` when author_id references no author.
    fn update(&self, id: i64, isbn: &str, title: &str, author_id: i64) -> AppResult<usize>;
}

pub struct SqliteBookRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteBookRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_book(row: &Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: row.get("id")?,
            isbn: row.get("isbn")?,
            title: row.get("title")?,
            author: Author {
                id: row.get("author_id")?,
                name: row.get("author_name")?,
            },
        })
    }
}

impl BookRepository for SqliteBookRepository {
    fn find_all(&self) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} ORDER BY book.id", BOOK_SELECT))?;

        let books: Vec<Book> = stmt
            .query_map([], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn find_by_id(&self, id: i64) -> AppResult<Option<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!("{} WHERE book.id = ?1", BOOK_SELECT))?;

        match stmt.query_row(params![id], Self::row_to_book) {
            Ok(book) => Ok(Some(book)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::from(e)),
        }
    }

    fn find_by_keyword(&self, keyword: &str) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE book.title LIKE ?1 ESCAPE '\\' ORDER BY book.id",
            BOOK_SELECT
        ))?;

        let books: Vec<Book> = stmt
            .query_map(params![keyword_pattern(keyword)], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn find_by_author(&self, author_id: i64) -> AppResult<Vec<Book>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(&format!(
            "{} WHERE book.author_id = ?1 ORDER BY book.id",
            BOOK_SELECT
        ))?;

        let books: Vec<Book> = stmt
            .query_map(params![author_id], Self::row_to_book)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn save(&self, isbn: &str, title: &str, author: &Author) -> AppResult<Book> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO book (isbn, title, author_id) VALUES (?1, ?2, ?3)",
            params![isbn, title, author.id],
        )?;

        Ok(Book {
            id: conn.last_insert_rowid(),
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.clone(),
        })
    }

    fn delete_by_id(&self, id: i64) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute("DELETE FROM book WHERE id = ?1", params![id])?;

        Ok(())
    }

    fn update(&self, id: i64, isbn: &str, title: &str, author_id: i64) -> AppResult<usize> {
        let conn = self.pool.get()?;

        let affected = conn.execute(
            "UPDATE book SET isbn = ?1, title = ?2, author_id = ?3 WHERE id = ?4",
            params![isbn, title, author_id, id],
        )?;

        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, initialize_database, ConnectionPool};
    use crate::repositories::{AuthorRepository, SqliteAuthorRepository};

    fn repositories() -> (SqliteAuthorRepository, SqliteBookRepository) {
        let pool: Arc<ConnectionPool> = Arc::new(create_test_pool().unwrap());
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        (
            SqliteAuthorRepository::new(pool.clone()),
            SqliteBookRepository::new(pool),
        )
    }

    #[test]
    fn test_save_and_find_with_nested_author() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        let book = books.save("1", "すべてがFになる", &author).unwrap();

        let found = books.find_by_id(book.id).unwrap().unwrap();
        assert_eq!(found.isbn, "1");
        assert_eq!(found.title, "すべてがFになる");
        assert_eq!(found.author, author);
    }

    #[test]
    fn test_duplicate_isbn_is_unique_violation() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        books.save("1", "すべてがFになる", &author).unwrap();

        // Same isbn, different title: still rejected
        let err = books.save("1", "冷たい密室と博士たち", &author).unwrap_err();
        assert!(matches!(err, AppError::UniqueViolation(_)));
        assert_eq!(books.find_all().unwrap().len(), 1);
    }

    #[test]
    fn test_save_with_unknown_author_is_foreign_key_violation() {
        let (_, books) = repositories();

        let ghost = Author {
            id: 999,
            name: "unregistered".to_string(),
        };
        let err = books.save("1", "orphan", &ghost).unwrap_err();
        assert!(matches!(err, AppError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_keyword_search_on_title() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        books.save("1", "すべてがFになる", &author).unwrap();
        books.save("2", "冷たい密室と博士たち", &author).unwrap();

        let matches = books.find_by_keyword("F").unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].isbn, "1");
    }

    #[test]
    fn test_update_sets_all_columns() {
        let (authors, books) = repositories();

        let first = authors.save("森博嗣").unwrap();
        let second = authors.save("森見登美彦").unwrap();
        let book = books.save("1", "すべてがFになる", &first).unwrap();

        let affected = books
            .update(book.id, "2", "THE PERFECT INSIDER", second.id)
            .unwrap();
        assert_eq!(affected, 1);

        let updated = books.find_by_id(book.id).unwrap().unwrap();
        assert_eq!(updated.isbn, "2");
        assert_eq!(updated.title, "THE PERFECT INSIDER");
        assert_eq!(updated.author.id, second.id);
    }

    #[test]
    fn test_update_unknown_id_affects_no_rows() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        assert_eq!(books.update(999, "1", "nothing", author.id).unwrap(), 0);
    }

    #[test]
    fn test_update_with_unknown_author_is_foreign_key_violation() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        let book = books.save("1", "すべてがFになる", &author).unwrap();

        let err = books.update(book.id, "1", "すべてがFになる", 999).unwrap_err();
        assert!(matches!(err, AppError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_author_delete_cascades_to_books() {
        let (authors, books) = repositories();

        let author = authors.save("森博嗣").unwrap();
        books.save("1", "すべてがFになる", &author).unwrap();
        books.save("2", "冷たい密室と博士たち", &author).unwrap();
        assert_eq!(books.find_by_author(author.id).unwrap().len(), 2);

        authors.delete_by_id(author.id).unwrap();

        assert!(books.find_by_author(author.id).unwrap().is_empty());
        assert!(books.find_all().unwrap().is_empty());
    }
}
