//! Error types for gitseed-secrets

use thiserror::Error;

/// Result type alias using gitseed-secrets's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Credential resolution error types
#[derive(Error, Debug)]
pub enum Error {
    /// Operator left a required credential field empty
    #[error("No {field} provided for {host}")]
    MissingCredential { field: String, host: String },

    /// Secret store call returned a failure
    #[error("Secret store {operation} failed: {message}")]
    StoreFailed { operation: String, message: String },

    /// Interactive prompt failed
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Process execution error
    #[error(transparent)]
    Process(#[from] gitseed_projects::Error),
}

impl Error {
    /// Create a missing credential error
    pub fn missing_credential(field: impl Into<String>, host: impl Into<String>) -> Self {
        Self::MissingCredential {
            field: field.into(),
            host: host.into(),
        }
    }

    /// Create a store failure error
    pub fn store_failed(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::StoreFailed {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a prompt error
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt(message.into())
    }
}
