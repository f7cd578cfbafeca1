//! Message Board Service
//!
//! A REST API server for a minimal message board. It provides authenticated
//! endpoints for creating, listing, reading, updating, and deleting short
//! messages (subject + body), and posts a best-effort Slack notification
//! whenever a message is created.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: static API key in the `X-API-Key` header
//! - **Notifications**: fire-and-forget Slack webhook POST
//! - **Format**: JSON requests/responses
//!
//! The storage and notification seams are traits (`store::MessageStore`,
//! `store::KeyStore`, `services::notifier::Notifier`) so the HTTP surface can
//! be exercised in tests without a running database or Slack workspace.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use services::notifier::Notifier;
use store::{KeyStore, MessageStore};

/// Shared application state handed to every handler.
///
/// Trait objects keep the HTTP layer independent of the concrete backends:
/// production wires in `store::PgStore` and `services::notifier::SlackNotifier`,
/// tests wire in in-memory fakes.
#[derive(Clone)]
pub struct AppState {
    /// Message persistence
    pub messages: Arc<dyn MessageStore>,

    /// API key lookups for the auth middleware
    pub api_keys: Arc<dyn KeyStore>,

    /// Outbound notification channel for newly created messages
    pub notifier: Arc<dyn Notifier>,
}

/// Build the application router.
///
/// # Routes
///
/// - `GET /health` — public liveness probe
/// - `GET /api/v1/messages` — list (newest first, capped)
/// - `POST /api/v1/messages` — create
/// - `GET /api/v1/messages/{id}` — show
/// - `PATCH /api/v1/messages/{id}` — update
/// - `DELETE /api/v1/messages/{id}` — delete
///
/// Everything under `/api/v1` sits behind the API key middleware; a request
/// without a valid active key is rejected with 401 before any handler runs.
pub fn app(state: AppState) -> Router {
    // Authenticated JSON API routes
    let api_routes = Router::new()
        .route("/api/v1/messages", get(handlers::messages::list_messages))
        .route("/api/v1/messages", post(handlers::messages::create_message))
        .route(
            "/api/v1/messages/{id}",
            get(handlers::messages::show_message),
        )
        .route(
            "/api/v1/messages/{id}",
            patch(handlers::messages::update_message),
        )
        .route(
            "/api/v1/messages/{id}",
            delete(handlers::messages::delete_message),
        )
        // Apply authentication middleware to all routes in this group
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_api_key,
        ));

    Router::new()
        // Public routes (no authentication required)
        .route("/health", get(handlers::health::health_check))
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
