//! Error types for the Neon Matrix core.

use thiserror::Error;

/// Errors raised by matrix operations.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// A node with this id is already registered
    #[error("Node {0} already exists")]
    DuplicateNode(String),

    /// Mainframe host failed validation
    #[error("Invalid host credentials: {0}")]
    ConnectionRejected(String),

    /// Obfuscated payload was not valid hex
    #[error("Invalid hex payload: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// De-obfuscated bytes were not valid UTF-8
    #[error("Payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// JSON encoding failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
