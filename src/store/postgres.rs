//! PostgreSQL storage backend.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    error::AppError,
    models::{
        api_key::{ApiKey, generate_token},
        message::{self, Message, MessageChanges, NewMessage},
    },
};

use super::{KeyStore, MessageStore};

/// PostgreSQL-backed store for messages and API keys.
///
/// Cheap to clone into shared state via `Arc`; the inner pool handles
/// connection reuse.
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Look up an API key by its label.
    ///
    /// Labels are not unique; this returns the first match and exists so the
    /// seed binary can provision idempotently.
    pub async fn find_key_by_name(&self, name: &str) -> Result<Option<ApiKey>, AppError> {
        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            SELECT id, token, name, active, created_at, updated_at
            FROM api_keys
            WHERE name = $1
            ORDER BY created_at
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    /// Provision a new API key.
    ///
    /// Generates a token when none is supplied; a supplied token is stored
    /// as-is and never regenerated. A token collision (unique index on
    /// `api_keys.token`) surfaces as `Conflict` — vanishingly unlikely with
    /// 256-bit tokens, but the contract exists.
    ///
    /// Not exposed through the HTTP API; only the provisioning path calls it.
    pub async fn create_key(
        &self,
        name: &str,
        token: Option<String>,
    ) -> Result<ApiKey, AppError> {
        if name.trim().is_empty() {
            return Err(AppError::Validation(vec![
                "Name can't be blank".to_string(),
            ]));
        }

        let token = token.unwrap_or_else(generate_token);

        let key = sqlx::query_as::<_, ApiKey>(
            r#"
            INSERT INTO api_keys (token, name, active)
            VALUES ($1, $2, true)
            RETURNING id, token, name, active, created_at, updated_at
            "#,
        )
        .bind(&token)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::Conflict,
            other => AppError::Database(other),
        })?;

        Ok(key)
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn list(&self, limit: i64) -> Result<Vec<Message>, AppError> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, subject, body, created_at, updated_at
            FROM messages
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    async fn get(&self, id: Uuid) -> Result<Message, AppError> {
        let message = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, subject, body, created_at, updated_at
            FROM messages
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound)?;

        Ok(message)
    }

    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError> {
        // Validate before touching the database
        message::validate(&new_message.subject, &new_message.body)?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (subject, body)
            VALUES ($1, $2)
            RETURNING id, subject, body, created_at, updated_at
            "#,
        )
        .bind(&new_message.subject)
        .bind(&new_message.body)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn update(&self, id: Uuid, changes: MessageChanges) -> Result<Message, AppError> {
        let current = self.get(id).await?;

        // Merge supplied fields over the stored row, then re-validate the
        // whole record
        let subject = changes.subject.unwrap_or(current.subject);
        let body = changes.body.unwrap_or(current.body);
        message::validate(&subject, &body)?;

        let message = sqlx::query_as::<_, Message>(
            r#"
            UPDATE messages
            SET subject = $1,
                body = $2,
                updated_at = NOW()
            WHERE id = $3
            RETURNING id, subject, body, created_at, updated_at
            "#,
        )
        .bind(&subject)
        .bind(&body)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        // The row can vanish between the read and the write
        .ok_or(AppError::NotFound)?;

        Ok(message)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyStore for PgStore {
    async fn is_active_token(&self, token: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM api_keys WHERE token = $1 AND active = true)",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
