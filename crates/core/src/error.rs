//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not authenticated: no user session")]
    NotAuthenticated,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store rejected request (HTTP {status}): {message}")]
    StoreRejected { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a StoreRejected error
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::StoreRejected {
            status,
            message: message.into(),
        }
    }
}
