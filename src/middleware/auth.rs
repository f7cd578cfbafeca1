//! API key authentication middleware.
//!
//! Every request to the JSON API must carry a valid, active API key in the
//! `X-API-Key` header. Requests without one are rejected with 401 and the
//! fixed body `{"error": "Unauthorized"}` before any handler or storage
//! access runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{AppState, error::AppError};

/// Header carrying the API key token.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API key authentication middleware function.
///
/// # Flow
///
/// 1. Extract the `X-API-Key` header from the request
/// 2. Reject if absent or empty
/// 3. Ask the key store whether the token belongs to an active key
/// 4. If active: pass the request through unchanged
/// 5. Otherwise: return 401 Unauthorized
///
/// Messages are not scoped per key, so no auth context is attached to the
/// request; the guard is a pure gate.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    if token.is_empty() || !state.api_keys.is_active_token(token).await? {
        return Err(AppError::Unauthorized);
    }

    Ok(next.run(request).await)
}
