//! Error types for the Matisse Commander client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using MatisseError
pub type Result<T> = std::result::Result<T, MatisseError>;

/// Unified error type for Matisse Commander operations
#[derive(Debug, Error)]
pub enum MatisseError {
    // -------------------------------------------------------------------------
    // Network Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transmission error: {0}")]
    Transmission(String),

    #[error("Not connected to Matisse Commander")]
    NotConnected,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Malformed response envelope: {0:?}")]
    MalformedEnvelope(String),

    #[error("Unrecognized value shape in response: {0:?}")]
    UnrecognizedValueShape(String),

    // -------------------------------------------------------------------------
    // Device Errors
    // -------------------------------------------------------------------------
    #[error("Invalid value {value} (should be >= {min} and <= {max})")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Setting {variable} did not complete successfully (device replied {response:?})")]
    SetRejected { variable: String, response: String },

    #[error("Unexpected value for {variable}: expected {expected}, got {found}")]
    UnexpectedValue {
        variable: String,
        expected: &'static str,
        found: &'static str,
    },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
