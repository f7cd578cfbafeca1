//! Message data model, API request types, and field validation.
//!
//! This module defines:
//! - `Message`: Database entity representing a message
//! - `CreateMessageRequest` / `UpdateMessageRequest`: JSON request bodies
//! - `validate`: the field rules enforced before any write

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Maximum subject length, counted in characters (not bytes).
pub const SUBJECT_MAX_LENGTH: usize = 220;

/// Represents a message record from the database.
///
/// Maps to the `messages` table. The serialized form is also the API
/// representation: exactly `id`, `subject`, `body`, `created_at`,
/// `updated_at`, nothing else.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Message {
    /// Unique identifier, assigned at creation, immutable
    pub id: Uuid,

    /// Required, at most 220 characters
    pub subject: String,

    /// Required, no declared maximum
    pub body: String,

    /// Timestamp when the message was created
    pub created_at: DateTime<Utc>,

    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating a message.
///
/// # JSON Example
///
/// ```json
/// {
///   "message": {
///     "subject": "Test Subject",
///     "body": "Test Body"
///   }
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct CreateMessageRequest {
    pub message: NewMessage,
}

/// Subject and body for a new message. Validated before insertion.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
    pub subject: String,
    pub body: String,
}

/// Request body for updating a message.
///
/// Fields inside `message` are optional; omitted fields keep their stored
/// value. The merged record is re-validated before the write.
#[derive(Debug, Deserialize)]
pub struct UpdateMessageRequest {
    pub message: MessageChanges,
}

/// Partial update to a message's fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageChanges {
    pub subject: Option<String>,
    pub body: Option<String>,
}

/// Validate a message's fields before persistence.
///
/// Collects every violated rule rather than stopping at the first, with
/// subject rules reported before body rules. The message text for each rule
/// is stable; existing clients match on it.
///
/// # Rules
///
/// - subject must not be blank (empty or whitespace-only)
/// - subject must be at most 220 characters
/// - body must not be blank
pub fn validate(subject: &str, body: &str) -> Result<(), AppError> {
    let mut errors = Vec::new();

    if subject.trim().is_empty() {
        errors.push("Subject can't be blank".to_string());
    }
    if subject.chars().count() > SUBJECT_MAX_LENGTH {
        errors.push(format!(
            "Subject is too long (maximum is {SUBJECT_MAX_LENGTH} characters)"
        ));
    }
    if body.trim().is_empty() {
        errors.push("Body can't be blank".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}
