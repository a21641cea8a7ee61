// src/http/response.rs
//
// Error wire shape shared by all handlers

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

/// Handler error: status code plus structured body
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn status_response(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
            code: status.as_u16(),
        }),
    )
}

/// 400: validation or referential failure, reported before any write
pub fn bad_request(message: impl Into<String>) -> ApiError {
    status_response(StatusCode::BAD_REQUEST, message)
}

/// 409: constraint violation, or any update failure
pub fn conflict(message: impl Into<String>) -> ApiError {
    status_response(StatusCode::CONFLICT, message)
}

/// 500: unexpected store failure
pub fn internal_error(err: AppError) -> ApiError {
    tracing::error!(error = %err, "request failed");
    status_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
}
