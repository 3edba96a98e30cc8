//! The HTTP seam between the dashboard and the backend.

use crate::error::{DashboardError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

/// Request/response access to the backend API.
///
/// Implementations return the raw response body for 2xx answers and a
/// `DashboardError::Status` (carrying the body) for anything else.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str) -> Result<String>;

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<String>;

    /// Multipart upload with a single `file` field.
    async fn post_file(&self, path: &str, file_name: &str, bytes: Vec<u8>) -> Result<String>;
}

/// Decode a response body into `T`, tagging failures with the request path.
pub fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| DashboardError::Parse {
        path: path.to_string(),
        source,
    })
}
