//! Error types for the Neon Matrix environment abstraction.

use thiserror::Error;

/// Errors that can occur in the environment abstraction layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    /// Endpoint string could not be parsed as `host[:port]`
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Port component was not a valid u16
    #[error("Invalid port: {0}")]
    InvalidPort(String),
}

impl EnvError {
    /// Creates an invalid endpoint error.
    pub fn endpoint(msg: impl Into<String>) -> Self {
        Self::InvalidEndpoint(msg.into())
    }
}
