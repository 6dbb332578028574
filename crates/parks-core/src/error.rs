//! Error types for the parks backend

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ParksError>;

#[derive(Error, Debug)]
pub enum ParksError {
    /// Payload failed a schema constraint. The detail is for logs only.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// The relational backend has no live connection.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Password hash error: {0}")]
    PasswordHash(String),
}

impl ParksError {
    pub fn validation(detail: impl Into<String>) -> Self {
        ParksError::Validation(detail.into())
    }
}
