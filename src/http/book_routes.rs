//! Book HTTP Routes
//!
//! Controller mapping /books requests onto the book repository, resolving
//! the owning author against the author repository where needed.
//!
//! Status contract:
//! - GET of an absent id returns 200 with a JSON `null` body
//! - POST: 201 + Location; 400 when the author is not registered
//!   (checked before the write); 409 on isbn collision
//! - PUT: partial update merged against the stored book; 204 + Location,
//!   409 on ANY failure (unknown book, unknown author, isbn collision)
//! - DELETE: 204 always

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};

use crate::domain::Book;
use crate::error::{AppError, AppResult};

use super::commands::{BookSaveCommand, BookUpdateCommand, SearchQuery};
use super::response::{bad_request, conflict, internal_error, ApiError};
use super::state::CatalogState;

/// Create book routes
pub fn book_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route(
            "/books",
            get(list_books_handler)
                .post(save_book_handler)
                .put(update_book_handler),
        )
        .route("/books/search", get(search_books_handler))
        .route(
            "/books/{id}",
            get(show_book_handler).delete(delete_book_handler),
        )
        .with_state(state)
}

fn location(id: i64) -> [(HeaderName, String); 1] {
    [(header::LOCATION, format!("/books/{}", id))]
}

async fn show_book_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Book>>, ApiError> {
    let book = state.book_repo.find_by_id(id).map_err(internal_error)?;
    Ok(Json(book))
}

async fn list_books_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let books = state.book_repo.find_all().map_err(internal_error)?;
    Ok(Json(books))
}

async fn search_books_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let keyword = query
        .keyword
        .ok_or_else(|| bad_request("query parameter 'keyword' is required"))?;

    let books = state
        .book_repo
        .find_by_keyword(&keyword)
        .map_err(internal_error)?;
    Ok(Json(books))
}

async fn save_book_handler(
    State(state): State<Arc<CatalogState>>,
    Json(cmd): Json<BookSaveCommand>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Book>), ApiError> {
    let (isbn, title, author_id) = cmd.into_parts().map_err(|e| bad_request(e.to_string()))?;

    // The author must be registered; checked before attempting the write
    let author = state
        .author_repo
        .find_by_id(author_id)
        .map_err(internal_error)?
        .ok_or_else(|| bad_request(format!("author {} is not registered", author_id)))?;

    match state.book_repo.save(&isbn, &title, &author) {
        Ok(book) => {
            tracing::info!(id = book.id, "book created");
            Ok((StatusCode::CREATED, location(book.id), Json(book)))
        }
        Err(e @ (AppError::UniqueViolation(_) | AppError::ForeignKeyViolation(_))) => {
            tracing::warn!(%isbn, error = %e, "book save rejected");
            Err(conflict(e.to_string()))
        }
        Err(e) => Err(internal_error(e)),
    }
}

async fn delete_book_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.book_repo.delete_by_id(id).map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Partial update: omitted fields keep their stored values. Every failure
/// along the way (unknown book, unknown author, isbn collision) answers
/// 409, matching the established API contract.
async fn update_book_handler(
    State(state): State<Arc<CatalogState>>,
    Json(cmd): Json<BookUpdateCommand>,
) -> Result<(StatusCode, [(HeaderName, String); 1]), ApiError> {
    let BookUpdateCommand {
        id,
        isbn,
        title,
        author_id,
    } = cmd;
    let id = id.ok_or_else(|| bad_request("field 'id' is required"))?;

    match merge_and_update(&state, id, isbn, title, author_id) {
        Ok(()) => Ok((StatusCode::NO_CONTENT, location(id))),
        Err(e) => {
            tracing::warn!(id, error = %e, "book update failed");
            Err(conflict(e.to_string()))
        }
    }
}

/// Load the stored book, merge omitted fields from it, re-resolve a
/// supplied author id, and write the merged values unconditionally.
fn merge_and_update(
    state: &CatalogState,
    id: i64,
    isbn: Option<String>,
    title: Option<String>,
    author_id: Option<i64>,
) -> AppResult<()> {
    let current = state.book_repo.find_by_id(id)?.ok_or(AppError::NotFound)?;

    let isbn = isbn.unwrap_or(current.isbn);
    let title = title.unwrap_or(current.title);
    let author_id = match author_id {
        Some(candidate) => state
            .author_repo
            .find_by_id(candidate)?
            .ok_or(AppError::NotFound)?
            .id,
        None => current.author.id,
    };

    if state.book_repo.update(id, &isbn, &title, author_id)? == 0 {
        return Err(AppError::NotFound);
    }

    Ok(())
}
