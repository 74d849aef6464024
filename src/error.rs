//! Error types shared across the client.

use thiserror::Error;

/// Failures raised before a request is sent
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Rejection reason was empty or whitespace
    #[error("A rejection reason is required")]
    EmptyReason,

    /// A required form field was blank
    #[error("{0} cannot be empty")]
    MissingField(&'static str),

    /// The actor has no endpoint for this operation
    #[error("{operation} is not available to {actor}")]
    NotPermitted {
        actor: &'static str,
        operation: &'static str,
    },

    /// Agent routes need a stored agent id
    #[error("No agent id stored, run `propdesk login --agent-id <ID>` first")]
    NoSession,
}

/// Every way a backend call can fail
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} returned HTTP {status}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("Could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// HTTP status for `Status` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Environment configuration problems
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a positive integer (got {value:?})")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{0} is not set")]
    Missing(&'static str),
}

/// Session file problems
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not access session file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Session file {path} is malformed: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
