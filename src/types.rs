use crate::constants::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Commands understood by the power supply
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Enable,
    Disable,
    /// Voltage setpoint in volts
    SetVoltage(f64),
    /// Current limit in amperes
    SetCurrent(f64),
    GetVoltage,
    GetCurrent,
    /// Request the pending reply
    Poll,
}

impl Command {
    /// Encode the command as a newline terminated wire token
    pub fn encode(&self) -> String {
        let mut token = match self {
            Command::Enable => ENABLE_CMD.to_string(),
            Command::Disable => DISABLE_CMD.to_string(),
            Command::SetVoltage(v) => format!("{}{:.0}", SET_VOLTAGE_PREFIX, v),
            Command::SetCurrent(i) => format!("{}{:.3}", SET_CURRENT_PREFIX, i),
            Command::GetVoltage => GET_VOLTAGE_CMD.to_string(),
            Command::GetCurrent => GET_CURRENT_CMD.to_string(),
            Command::Poll => POLL_CMD.to_string(),
        };
        token.push(DELIMITER as char);
        token
    }
}

/// Classified reply line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Response {
    Ack,
    Voltage(f64),
    Current(f64),
}

impl Response {
    pub fn kind(&self) -> ResponseKind {
        match self {
            Response::Ack => ResponseKind::Ack,
            Response::Voltage(_) => ResponseKind::Voltage,
            Response::Current(_) => ResponseKind::Current,
        }
    }

    /// Classify a reply line (delimiter already stripped).
    ///
    /// Returns `None` when the line matches no known format.
    pub fn parse(line: &str) -> Option<Self> {
        if line == ACK_RESPONSE {
            return Some(Response::Ack);
        }
        if line.len() != VALUE_RESPONSE_LEN {
            return None;
        }

        // Both suffixes are ASCII, so the field boundary is a char boundary
        if let Some(field) = line.strip_suffix(VOLTAGE_SUFFIX) {
            parse_value_field(field).map(Response::Voltage)
        } else if let Some(field) = line.strip_suffix(CURRENT_SUFFIX) {
            parse_value_field(field).map(Response::Current)
        } else {
            None
        }
    }
}

fn parse_value_field(field: &str) -> Option<f64> {
    debug_assert_eq!(field.len(), VALUE_FIELD_LEN);
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Reply kinds an operation waits for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Ack,
    Voltage,
    Current,
}

impl fmt::Display for ResponseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseKind::Ack => write!(f, "ack"),
            ResponseKind::Voltage => write!(f, "voltage value"),
            ResponseKind::Current => write!(f, "current value"),
        }
    }
}

/// Last values reported by the device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Last measured voltage in volts
    pub voltage: Option<f64>,
    /// Last measured current in amperes
    pub current: Option<f64>,
    /// Time of the last value update
    pub updated_at: Option<DateTime<Utc>>,
}

impl DeviceState {
    /// Record a value reply. Acknowledgements leave the state untouched.
    pub fn apply(&mut self, response: Response) {
        match response {
            Response::Ack => return,
            Response::Voltage(v) => self.voltage = Some(v),
            Response::Current(i) => self.current = Some(i),
        }
        self.updated_at = Some(Utc::now());
    }

    /// Forget all values
    pub fn clear(&mut self) {
        *self = DeviceState::default();
    }
}
