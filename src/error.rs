//! Error types for FuG protocol operations.

use crate::types::ResponseKind;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for FuG operations.
pub type Result<T> = std::result::Result<T, FugError>;

/// Error types for FuG power supply communication.
#[derive(Error, Debug)]
pub enum FugError {
    /// Connecting to or disconnecting from the device failed
    #[error("Connection error: {0}")]
    Connection(#[source] std::io::Error),

    /// Transmitting a command token failed
    #[error("Send error: {0}")]
    Send(#[source] std::io::Error),

    /// Reading from the device failed for a reason other than an idle timeout
    #[error("Receive error: {0}")]
    Receive(#[source] std::io::Error),

    /// A completed line matched none of the known reply formats
    #[error("Malformed response: {line:?}")]
    MalformedResponse {
        /// The offending line, without its delimiter
        line: String,
    },

    /// A recognized reply arrived out of order
    #[error("Unexpected response at position {position}: expected {expected}, got {actual}")]
    SequenceMismatch {
        /// Index in the expected reply sequence
        position: usize,
        /// Reply kind the engine was waiting for
        expected: ResponseKind,
        /// Reply kind actually received
        actual: ResponseKind,
    },

    /// The reply sequence did not complete before the deadline
    #[error("Command timeout after {elapsed:?}: received {matched} of {expected} responses")]
    Timeout {
        /// Time spent waiting
        elapsed: Duration,
        /// Number of replies matched before the deadline
        matched: usize,
        /// Number of replies the operation needed
        expected: usize,
    },

    /// Setpoint is negative or not a finite number
    #[error("Invalid setpoint: {value}")]
    InvalidSetpoint {
        /// Rejected value
        value: f64,
    },

    /// Operation attempted on a closed connection
    #[error("Not connected")]
    NotConnected,

    /// Configuration rejected by validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
