//! Message CRUD HTTP handlers.
//!
//! This module implements the message API endpoints:
//! - GET /api/v1/messages - List recent messages
//! - GET /api/v1/messages/{id} - Get a message by ID
//! - POST /api/v1/messages - Create a message
//! - PATCH /api/v1/messages/{id} - Update a message
//! - DELETE /api/v1/messages/{id} - Delete a message
//!
//! All endpoints require a valid API key (enforced by the auth middleware
//! before these handlers run).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{
    AppState,
    error::AppError,
    models::message::{CreateMessageRequest, Message, UpdateMessageRequest},
};

/// List cap: always the newest 100, no pagination cursor.
pub const LIST_LIMIT: i64 = 100;

/// List the most recent messages, newest first.
///
/// # Response
///
/// - **200 OK**: array of at most 100 messages ordered by `created_at`
///   descending; each exposes exactly `id`, `subject`, `body`, `created_at`,
///   `updated_at`
pub async fn list_messages(
    State(state): State<AppState>,
) -> Result<Json<Vec<Message>>, AppError> {
    let messages = state.messages.list(LIST_LIMIT).await?;
    Ok(Json(messages))
}

/// Get a single message by ID.
///
/// # Response
///
/// - **200 OK**: the message
/// - **404 Not Found**: `{"error": "Resource not found"}`
pub async fn show_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Message>, AppError> {
    let message = state.messages.get(id).await?;
    Ok(Json(message))
}

/// Create a new message.
///
/// # Request Body
///
/// ```json
/// {
///   "message": {
///     "subject": "Test Subject",
///     "body": "Test Body"
///   }
/// }
/// ```
///
/// # Response
///
/// - **201 Created**: the created message
/// - **422 Unprocessable Entity**: `{"errors": [...]}` listing every violated
///   validation rule
///
/// # Notification
///
/// After a successful commit, the notifier is invoked exactly once. The
/// trigger is explicit here rather than hidden in a storage hook, and its
/// outcome never affects this response: the notifier absorbs its own
/// failures. A failed create does not notify.
pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> Result<(StatusCode, Json<Message>), AppError> {
    let message = state.messages.create(request.message).await?;

    state.notifier.message_created(&message).await;

    Ok((StatusCode::CREATED, Json(message)))
}

/// Update a message's subject and/or body.
///
/// Omitted fields keep their stored values; the merged record is
/// re-validated before the write and `updated_at` is refreshed.
///
/// # Response
///
/// - **200 OK**: the updated message
/// - **404 Not Found**: no message with this id
/// - **422 Unprocessable Entity**: merged record fails validation
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateMessageRequest>,
) -> Result<Json<Message>, AppError> {
    let message = state.messages.update(id, request.message).await?;
    Ok(Json(message))
}

/// Delete a message permanently.
///
/// # Response
///
/// - **204 No Content**: deleted, empty body
/// - **404 Not Found**: no message with this id
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.messages.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
