//! Protocol constants for FuG power supply communication.
//!
//! This module defines the command tokens, the response formats and the
//! default timing parameters of the TCP ASCII interface.

/// Token delimiter for both directions
pub const DELIMITER: u8 = b'\n';

/// Switch the output on
pub const ENABLE_CMD: &str = "F1";

/// Switch the output off
pub const DISABLE_CMD: &str = "F0";

/// Prefix of the voltage setpoint command
pub const SET_VOLTAGE_PREFIX: &str = "U";

/// Prefix of the current limit command
pub const SET_CURRENT_PREFIX: &str = "I";

/// Request the measured voltage
pub const GET_VOLTAGE_CMD: &str = "N0";

/// Request the measured current
pub const GET_CURRENT_CMD: &str = "N1";

/// Ask the device to emit its pending reply
pub const POLL_CMD: &str = "?";

/// Acknowledgement reply
pub const ACK_RESPONSE: &str = "E0";

/// Total length of a measured value reply
pub const VALUE_RESPONSE_LEN: usize = 13;

/// Length of the numeric field at the start of a measured value reply
pub const VALUE_FIELD_LEN: usize = 11;

/// Suffix of a measured voltage reply
pub const VOLTAGE_SUFFIX: &str = "VN";

/// Suffix of a measured current reply
pub const CURRENT_SUFFIX: &str = "AN";

/// Default TCP port of the FuG ethernet interface
pub const DEFAULT_PORT: u16 = 2101;

/// Default timeout for establishing the connection
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 2000;

/// Default socket read timeout
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10;

/// Default pause after each transmitted token
pub const DEFAULT_SEND_DELAY_MS: u64 = 10;

/// Default deadline for a complete reply sequence
pub const DEFAULT_RESPONSE_TIMEOUT_MS: u64 = 1000;

/// Default pause between two reads while waiting for a reply
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

/// Default receive chunk size in bytes
pub const DEFAULT_BUFFER_SIZE: usize = 1024;
