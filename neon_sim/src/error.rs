//! Errors surfaced by the driver.

use neon_core::MatrixError;
use thiserror::Error;

/// Failures that abort a run.
///
/// A rejected mainframe connection is not one of them: it ends the main
/// sequence early but the run itself completes.
#[derive(Debug, Error)]
pub enum DriverError {
    /// Writing to the console failed
    #[error("Console write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A matrix operation failed
    #[error(transparent)]
    Matrix(#[from] MatrixError),

    /// Payload serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration values cannot be used
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
