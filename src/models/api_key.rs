//! API key model for authentication.
//!
//! API keys are opaque bearer tokens presented in the `X-API-Key` header.
//! They are provisioned out-of-band (see the `seed` binary); no public
//! endpoint creates or manages them.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents an API key record from the database.
///
/// Maps to the `api_keys` table. The `token` is stored as issued and never
/// regenerated once set; revocation flips `active` instead of deleting the
/// row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Unique identifier for this API key
    pub id: Uuid,

    /// Opaque random token, 64 hex characters (256 bits), unique across all keys
    pub token: String,

    /// Human-readable label; required but not unique
    pub name: String,

    /// Whether this key is currently accepted.
    ///
    /// Inactive keys are rejected by the auth middleware even when the token
    /// value matches.
    pub active: bool,

    /// Timestamp when this API key was created
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last change to this key
    pub updated_at: DateTime<Utc>,
}

/// Generate a fresh API key token.
///
/// 32 cryptographically secure random bytes rendered as 64 hex characters.
/// Called once per key at creation time when no token was pre-supplied.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    hex::encode(bytes)
}
