//! Route handlers. Bodies are read as raw bytes and decoded here so that malformed JSON
//! is always a 400 with the usual error body.

pub mod menu_items;
pub mod orders;
pub mod sessions;
pub mod users;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use super::error::ApiError;

fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parses a `:id` path segment. Taken as a string so a bad id gets the JSON error body.
fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::Validation(format!("invalid id {raw:?}")))
}
