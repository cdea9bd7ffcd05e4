//! Error types for the brain analytics engine.

use std::path::PathBuf;

/// Errors that can occur while generating an analytics report.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    /// The store file is missing, unreadable or not a SQLite database.
    #[error("Brain DB not available at {}: {reason}", path.display())]
    StoreUnavailable { path: PathBuf, reason: String },

    /// No brain with the requested name exists in the store.
    #[error("Brain '{brain}' not found")]
    NotFound { brain: String },

    /// Database-related errors (SQLite).
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// JSON rendering of a report failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
