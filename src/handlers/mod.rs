//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Calls into the message store
//! 3. Returns HTTP response (JSON, status code)

/// Health check endpoint
pub mod health;
/// Message CRUD endpoints
pub mod messages;
