//! Data models representing database entities.

/// API key authentication model
pub mod api_key;
/// Message model, request types, and validation
pub mod message;
