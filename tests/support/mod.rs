//! Shared test harness: in-memory store, recording notifier, request helpers.
//!
//! Integration tests drive the real router through `tower::ServiceExt::oneshot`
//! with these fakes wired into `AppState`, so the full HTTP surface
//! (middleware, handlers, serialization) runs without a database or network.
#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use message_board_server::{
    AppState, app,
    error::AppError,
    models::message::{self, Message, MessageChanges, NewMessage},
    services::notifier::Notifier,
    store::{KeyStore, MessageStore},
};

/// Token wired into the test key store as an active key.
pub const ACTIVE_TOKEN: &str = "11f141eb64b7edc4075c9b9b8797cd9ea61479dff0e5a1f2d33f7ef9babd3642";

/// Token wired in as a revoked key; must be rejected despite matching a row.
pub const INACTIVE_TOKEN: &str = "9c29bd273a39967bbde96b4b2a2bdce95cb54b32bf12b9cbda03cebeba87b5aa";

/// In-memory `MessageStore` with the same validation and ordering semantics
/// as the Postgres backend.
#[derive(Default)]
pub struct InMemoryMessages {
    rows: Mutex<Vec<Message>>,
}

impl InMemoryMessages {
    /// Insert a fully-formed row, bypassing validation and timestamps.
    /// Lets tests pin `created_at` for deterministic ordering.
    pub fn insert_raw(&self, message: Message) {
        self.rows.lock().unwrap().push(message);
    }

    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageStore for InMemoryMessages {
    async fn list(&self, limit: i64) -> Result<Vec<Message>, AppError> {
        let rows = self.rows.lock().unwrap();
        // Newest insertion first, then a stable sort on created_at descending
        let mut messages: Vec<Message> = rows.iter().rev().cloned().collect();
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        messages.truncate(limit as usize);
        Ok(messages)
    }

    async fn get(&self, id: Uuid) -> Result<Message, AppError> {
        let rows = self.rows.lock().unwrap();
        rows.iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(AppError::NotFound)
    }

    async fn create(&self, new_message: NewMessage) -> Result<Message, AppError> {
        message::validate(&new_message.subject, &new_message.body)?;

        let now = Utc::now();
        let created = Message {
            id: Uuid::new_v4(),
            subject: new_message.subject,
            body: new_message.body,
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, changes: MessageChanges) -> Result<Message, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(AppError::NotFound)?;

        let subject = changes.subject.unwrap_or_else(|| row.subject.clone());
        let body = changes.body.unwrap_or_else(|| row.body.clone());
        message::validate(&subject, &body)?;

        row.subject = subject;
        row.body = body;
        row.updated_at = Utc::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

/// Fixed key table: one active token, one inactive.
pub struct FixedKeys {
    tokens: HashMap<String, bool>,
}

impl Default for FixedKeys {
    fn default() -> Self {
        let tokens = HashMap::from([
            (ACTIVE_TOKEN.to_string(), true),
            (INACTIVE_TOKEN.to_string(), false),
        ]);
        Self { tokens }
    }
}

#[async_trait]
impl KeyStore for FixedKeys {
    async fn is_active_token(&self, token: &str) -> Result<bool, AppError> {
        Ok(self.tokens.get(token).copied().unwrap_or(false))
    }
}

/// Notifier that records every invocation instead of calling out.
#[derive(Default)]
pub struct RecordingNotifier {
    notified: Mutex<Vec<Message>>,
}

impl RecordingNotifier {
    pub fn notification_count(&self) -> usize {
        self.notified.lock().unwrap().len()
    }

    pub fn notified_ids(&self) -> Vec<Uuid> {
        self.notified.lock().unwrap().iter().map(|m| m.id).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn message_created(&self, message: &Message) {
        self.notified.lock().unwrap().push(message.clone());
    }
}

/// A router wired to in-memory fakes, with handles kept for assertions.
pub struct TestApp {
    pub router: Router,
    pub messages: Arc<InMemoryMessages>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn test_app() -> TestApp {
    let messages = Arc::new(InMemoryMessages::default());
    let notifier = Arc::new(RecordingNotifier::default());

    let state = AppState {
        messages: messages.clone(),
        api_keys: Arc::new(FixedKeys::default()),
        notifier: notifier.clone(),
    };

    TestApp {
        router: app(state),
        messages,
        notifier,
    }
}

impl TestApp {
    /// Fire a single request through the router.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// Seed a message directly into the store, optionally pinning its
    /// creation time. Does not go through the API, so it never notifies.
    pub fn seed_message(
        &self,
        subject: &str,
        body: &str,
        created_at: Option<DateTime<Utc>>,
    ) -> Message {
        let at = created_at.unwrap_or_else(Utc::now);
        let seeded = Message {
            id: Uuid::new_v4(),
            subject: subject.to_string(),
            body: body.to_string(),
            created_at: at,
            updated_at: at,
        };
        self.messages.insert_raw(seeded.clone());
        seeded
    }
}

/// Build a request with an optional API key header and optional JSON body.
pub fn request(
    method: &str,
    path: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);

    if let Some(token) = token {
        builder = builder.header("X-API-Key", token);
    }

    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Shorthand for an authenticated request with the active test token.
pub fn authed(method: &str, path: &str, body: Option<Value>) -> Request<Body> {
    request(method, path, Some(ACTIVE_TOKEN), body)
}

/// Collect a response body into JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("body is valid JSON")
}

/// Collect a response body as raw bytes (for asserting empty bodies).
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}
