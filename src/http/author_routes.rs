//! Author HTTP Routes
//!
//! Controller mapping /authors requests onto the author repository.
//!
//! Status contract:
//! - GET of an absent id returns 200 with a JSON `null` body
//! - POST: 201 + Location, 409 on duplicate name, 400 on invalid body
//! - PUT: 204 + Location, 409 on ANY failure (collision or unknown id)
//! - DELETE: 204 always

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};

use crate::domain::Author;
use crate::error::AppError;

use super::commands::{AuthorSaveCommand, AuthorUpdateCommand, SearchQuery};
use super::response::{bad_request, conflict, internal_error, ApiError};
use super::state::CatalogState;

/// Create author routes
pub fn author_routes(state: Arc<CatalogState>) -> Router {
    Router::new()
        .route(
            "/authors",
            get(list_authors_handler)
                .post(save_author_handler)
                .put(update_author_handler),
        )
        .route("/authors/search", get(search_authors_handler))
        .route(
            "/authors/{id}",
            get(show_author_handler).delete(delete_author_handler),
        )
        .with_state(state)
}

fn location(id: i64) -> [(HeaderName, String); 1] {
    [(header::LOCATION, format!("/authors/{}", id))]
}

async fn show_author_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<Json<Option<Author>>, ApiError> {
    let author = state.author_repo.find_by_id(id).map_err(internal_error)?;
    Ok(Json(author))
}

async fn list_authors_handler(
    State(state): State<Arc<CatalogState>>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let authors = state.author_repo.find_all().map_err(internal_error)?;
    Ok(Json(authors))
}

async fn search_authors_handler(
    State(state): State<Arc<CatalogState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Author>>, ApiError> {
    let keyword = query
        .keyword
        .ok_or_else(|| bad_request("query parameter 'keyword' is required"))?;

    let authors = state
        .author_repo
        .find_by_keyword(&keyword)
        .map_err(internal_error)?;
    Ok(Json(authors))
}

async fn save_author_handler(
    State(state): State<Arc<CatalogState>>,
    Json(cmd): Json<AuthorSaveCommand>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Author>), ApiError> {
    let name = cmd.into_name().map_err(|e| bad_request(e.to_string()))?;

    match state.author_repo.save(&name) {
        Ok(author) => {
            tracing::info!(id = author.id, "author created");
            Ok((StatusCode::CREATED, location(author.id), Json(author)))
        }
        Err(AppError::UniqueViolation(message)) => {
            tracing::warn!(%name, "duplicate author name");
            Err(conflict(message))
        }
        Err(e) => Err(internal_error(e)),
    }
}

async fn delete_author_handler(
    State(state): State<Arc<CatalogState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.author_repo.delete_by_id(id).map_err(internal_error)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update failures are deliberately collapsed: a name collision and an
/// unknown id both answer 409, matching the established API contract.
async fn update_author_handler(
    State(state): State<Arc<CatalogState>>,
    Json(cmd): Json<AuthorUpdateCommand>,
) -> Result<(StatusCode, [(HeaderName, String); 1]), ApiError> {
    let (id, name) = cmd.into_parts().map_err(|e| bad_request(e.to_string()))?;

    match state.author_repo.update(id, &name) {
        Ok(0) => Err(conflict(format!("author {} not found", id))),
        Ok(_) => Ok((StatusCode::NO_CONTENT, location(id))),
        Err(e) => {
            tracing::warn!(id, error = %e, "author update failed");
            Err(conflict(e.to_string()))
        }
    }
}
