//! Error types for the config tree store and its outer surface.

use crate::types::NodeId;
use thiserror::Error;

/// Failures reported by the checked dispatch path.
///
/// The plain reducer never produces these; it degrades to a no-op instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Parent path not found: [{}]", .ancestor_ids.join(", "))]
    ParentNotFound { ancestor_ids: Vec<NodeId> },

    #[error("Node {id} is a file and cannot hold children")]
    NotAFolder { id: NodeId },

    #[error("Node not found: {id}")]
    NotFound { id: NodeId },

    #[error("Node id already in use: {id}")]
    Conflict { id: NodeId },
}

/// Errors surfaced by configuration, snapshot I/O and the CLI.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ApiError {
    fn from(err: serde_yaml::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
