//! Storage traits and backends.
//!
//! The HTTP layer talks to storage through these traits so handlers and
//! middleware can be tested against in-memory implementations. Production
//! uses [`PgStore`], which backs both traits with PostgreSQL.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::message::{Message, MessageChanges, NewMessage},
};

mod postgres;
pub use postgres::PgStore;

/// Durable CRUD for messages, with validation enforced before any write.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// The most recently created messages first, capped at `limit`.
    async fn list(&self, limit: i64) -> Result<Vec<Message>, AppError>;

    /// Fetch a message by id, or `NotFound`.
    async fn get(&self, id: Uuid) -> Result<Message, AppError>;

    /// Validate and insert a new message with server-assigned id and
    /// timestamps. An invalid message is never written.
    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError>;

    /// Merge the supplied fields over the stored row, re-validate the merged
    /// record, persist, and refresh `updated_at`. `NotFound` if the id is
    /// absent.
    async fn update(&self, id: Uuid, changes: MessageChanges) -> Result<Message, AppError>;

    /// Hard-delete a message, or `NotFound`.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Storage liveness check for the health endpoint.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Authoritative source of valid bearer tokens.
#[async_trait]
pub trait KeyStore: Send + Sync {
    /// True iff a key row exists with this token and `active = true`.
    /// Absent or inactive tokens are false. No side effects.
    async fn is_active_token(&self, token: &str) -> Result<bool, AppError>;
}
