//! Core error types

use thiserror::Error;

/// Error type for drop handling.
///
/// A missing secret is not an error: existence checks report it through
/// [`Presence`](crate::ports::Presence).
#[derive(Debug, Error)]
pub enum Error {
    /// A dropped or stored payload could not be interpreted
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// Object store call failed
    #[error("Object store {operation} failed for {bucket}/{key}: {message}")]
    ObjectStore {
        operation: &'static str,
        bucket: String,
        key: String,
        message: String,
    },

    /// Key service call failed
    #[error("Key service {operation} failed: {message}")]
    KeyService {
        operation: &'static str,
        message: String,
    },

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Build an [`Error::ObjectStore`] from any displayable cause.
    pub fn object_store(
        operation: &'static str,
        bucket: &str,
        key: &str,
        cause: impl std::fmt::Display,
    ) -> Self {
        Error::ObjectStore {
            operation,
            bucket: bucket.to_string(),
            key: key.to_string(),
            message: cause.to_string(),
        }
    }

    /// Build an [`Error::KeyService`] from any displayable cause.
    pub fn key_service(operation: &'static str, cause: impl std::fmt::Display) -> Self {
        Error::KeyService {
            operation,
            message: cause.to_string(),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedInput(err.to_string())
    }
}

/// Result type for drop handling.
pub type Result<T> = std::result::Result<T, Error>;
