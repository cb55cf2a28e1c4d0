//! Error types for the orrery CLI.
//!
//! Command execution surfaces [`Error`] for everything the shell can fail
//! at: workspace discovery, configuration, session persistence, and graph
//! mutations bubbled up from `orrery-graph`.

use thiserror::Error;

/// Errors produced by CLI commands and session handling.
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session file exists but could not be understood.
    #[error("Session error: {0}")]
    Session(String),

    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A graph mutation was rejected.
    #[error(transparent)]
    Graph(#[from] orrery_graph::GraphError),

    /// No topic with the given name exists in the session.
    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    /// No `.orrery/` directory was found in this directory or any parent.
    #[error("Not an orrery workspace. Run 'orrery init' to create one")]
    NotInitialized,
}

/// Convenience alias for shell results.
pub type Result<T> = std::result::Result<T, Error>;
