//! Error types shared by the attribution engine
//!
//! Library modules return `FameResult<T>`; the binary wraps these in
//! `anyhow` at the application edge.

use thiserror::Error;

/// Errors that can occur while attributing and ranking a repository
#[derive(Debug, Error)]
pub enum FameError {
    /// A flag or configuration value outside its accepted set
    #[error("invalid value for --{flag}: '{value}' (expected one of: {expected})")]
    InvalidOption {
        flag: &'static str,
        value: String,
        expected: &'static str,
    },

    /// Any other configuration problem detected before processing starts
    #[error("Configuration problem: {0}")]
    Configuration(String),

    /// An external listing/content/history/attribution call failed or
    /// returned data that could not be interpreted
    #[error("{operation} failed for '{path}': {message}")]
    Collaborator {
        operation: &'static str,
        path: String,
        message: String,
    },

    /// Repository access through libgit2
    #[error("Repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Report serialisation
    #[error("Failed to serialise report: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FameError {
    /// Create an invalid-option error for a flag
    pub fn invalid_option(flag: &'static str, value: impl Into<String>, expected: &'static str) -> Self {
        Self::InvalidOption {
            flag,
            value: value.into(),
            expected,
        }
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a collaborator failure for a repository path
    pub fn collaborator(operation: &'static str, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            operation,
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for errors raised before any file was processed
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidOption { .. } | Self::Configuration(_))
    }
}

/// Result type for attribution operations
pub type FameResult<T> = Result<T, FameError>;
