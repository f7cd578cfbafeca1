//! Error types and HTTP error response handling.
//!
//! This module defines all application errors and how they are converted
//! into HTTP responses with appropriate status codes and JSON bodies.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and error body. Only
/// `Unauthorized`, `NotFound`, and `Validation` are part of the public API
/// contract; `Conflict` can only arise on the key provisioning path, and
/// `Database` covers everything the storage layer can throw at us.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Database operation failed (e.g., connection error, query error).
    ///
    /// This wraps any sqlx::Error using the `#[from]` attribute, which
    /// automatically implements `From<sqlx::Error> for AppError`.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// API key is missing, invalid, or inactive.
    ///
    /// Returns HTTP 401 Unauthorized.
    #[error("Unauthorized")]
    Unauthorized,

    /// Requested message does not exist.
    ///
    /// Returns HTTP 404 Not Found.
    #[error("Resource not found")]
    NotFound,

    /// One or more field rules were violated on create/update.
    ///
    /// Carries one human-readable message per violated rule. Returns
    /// HTTP 422 Unprocessable Entity with all of them, not just the first.
    #[error("Validation failed")]
    Validation(Vec<String>),

    /// Storage-level uniqueness violation (API key token collision).
    ///
    /// Returns HTTP 409 Conflict. Not reachable through the public API.
    #[error("Token has already been taken")]
    Conflict,
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<T, AppError>`
/// and have errors automatically converted to proper HTTP responses.
///
/// # Status Code Mapping
///
/// - `Unauthorized` → 401, `{"error": "Unauthorized"}`
/// - `NotFound` → 404, `{"error": "Resource not found"}`
/// - `Validation` → 422, `{"errors": [...]}`
/// - `Conflict` → 409, `{"error": "Token has already been taken"}`
/// - `Database` → 500, generic body (details are logged, never leaked)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": "Unauthorized" }),
            ),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "Resource not found" }),
            ),
            AppError::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "errors": errors }))
            }
            AppError::Conflict => (
                StatusCode::CONFLICT,
                json!({ "error": self.to_string() }),
            ),
            AppError::Database(ref source) => {
                tracing::error!("Database error: {source}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
