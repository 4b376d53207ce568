//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Bizkit
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum BizkitError {
    /// Missing or malformed caller input. Nothing was written.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The persistence backend is unreachable or rejected the write.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The text-generation collaborator failed. Absorbed by the enhancer.
    #[error("Enhancement error: {0}")]
    Enhancement(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BizkitError {
    /// Stable label for logs and error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Storage(_) => "storage",
            Self::NotFound(_) => "not_found",
            Self::Enhancement(_) => "enhancement",
            Self::Config(_) => "config",
            Self::Network(_) => "network",
            Self::Auth(_) => "auth",
            Self::Internal(_) => "internal",
        }
    }
}

/// Result type alias for Bizkit operations
pub type Result<T> = std::result::Result<T, BizkitError>;
