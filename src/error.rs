//! Error types shared across the dashboard.

use thiserror::Error;

/// Main error type for dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{field}' expects a whole number, got '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Unrecognised date '{0}' (use YYYY-MM-DD, today, tomorrow, in 3d, in 2w or eom)")]
    InvalidDate(String),

    #[error("Unknown route: {0}")]
    UnknownRoute(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for dashboard operations.
pub type DashResult<T> = Result<T, DashboardError>;

impl DashboardError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
