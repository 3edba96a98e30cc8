/// Error types for the dashboard core
use thiserror::Error;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// The request could not complete
    #[error("Request to {path} failed: {message}")]
    Network { path: String, message: String },

    /// The backend answered with a non-success status
    #[error("Request to {path} returned HTTP {status}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    /// The response body was not the expected JSON shape
    #[error("Failed to parse response from {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Missing or invalid user input
    #[error("{0}")]
    Validation(String),

    /// The dashboard task has stopped
    #[error("Dashboard is no longer running")]
    Closed,
}

impl DashboardError {
    pub fn network(path: &str, message: impl ToString) -> Self {
        DashboardError::Network {
            path: path.to_string(),
            message: message.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        DashboardError::Validation(message.into())
    }
}

/// Type alias for Results using DashboardError
pub type Result<T> = std::result::Result<T, DashboardError>;
