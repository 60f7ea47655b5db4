//! Connection and timing configuration.
//!
//! Durations are stored as [`Duration`] and serialized as floating point
//! seconds, so a configuration file reads like
//!
//! ```json
//! { "host": "192.168.0.10", "port": 2101, "read_timeout": 0.01,
//!   "send_delay": 0.01, "response_timeout": 1.0, "poll_interval": 0.01 }
//! ```

use crate::constants::*;
use crate::error::{FugError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Session configuration, fixed for the lifetime of a [`crate::FugSource`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Host name or IP address of the power supply
    pub host: String,
    /// TCP port of the power supply
    pub port: u16,
    /// Timeout for establishing the connection
    #[serde(with = "secs")]
    pub connect_timeout: Duration,
    /// Socket read timeout, after which a read yields no data
    #[serde(with = "secs")]
    pub read_timeout: Duration,
    /// Pause after every transmitted token, must be positive
    #[serde(with = "secs")]
    pub send_delay: Duration,
    /// Deadline for the complete reply sequence of one operation
    #[serde(with = "secs")]
    pub response_timeout: Duration,
    /// Pause between two reads while waiting for replies
    #[serde(with = "secs")]
    pub poll_interval: Duration,
    /// Maximum number of bytes fetched per read
    pub buffer_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: String::new(),
            port: DEFAULT_PORT,
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
            send_delay: Duration::from_millis(DEFAULT_SEND_DELAY_MS),
            response_timeout: Duration::from_millis(DEFAULT_RESPONSE_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl Config {
    /// Default configuration for the given host
    pub fn new(host: impl Into<String>) -> Self {
        Config {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.send_delay = delay;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// `host:port` address string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check that every field holds a usable value
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FugError::InvalidConfig("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(FugError::InvalidConfig("port must not be zero".to_string()));
        }
        if self.connect_timeout.is_zero() {
            return Err(FugError::InvalidConfig(
                "connect_timeout must be positive".to_string(),
            ));
        }
        if self.send_delay.is_zero() {
            return Err(FugError::InvalidConfig(
                "send_delay must be positive".to_string(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(FugError::InvalidConfig(
                "read_timeout must be positive".to_string(),
            ));
        }
        if self.response_timeout.is_zero() {
            return Err(FugError::InvalidConfig(
                "response_timeout must be positive".to_string(),
            ));
        }
        if self.buffer_size == 0 {
            return Err(FugError::InvalidConfig(
                "buffer_size must not be zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

mod secs {
    use serde::{de, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs)
            .map_err(|e| de::Error::custom(format!("invalid duration {}: {}", secs, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_device_settings() {
        let config = Config::new("10.0.0.5");
        assert_eq!(config.port, 2101);
        assert_eq!(config.read_timeout, Duration::from_millis(10));
        assert_eq!(config.send_delay, Duration::from_millis(10));
        assert_eq!(config.response_timeout, Duration::from_secs(1));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.address(), "10.0.0.5:2101");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let config = Config::new("psu")
            .with_port(4000)
            .with_response_timeout(Duration::from_millis(250))
            .with_buffer_size(16);
        assert_eq!(config.address(), "psu:4000");
        assert_eq!(config.response_timeout, Duration::from_millis(250));
        assert_eq!(config.buffer_size, 16);
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let invalid = [
            Config::default(),
            Config::new("psu").with_port(0),
            Config::new("psu").with_connect_timeout(Duration::ZERO),
            Config::new("psu").with_read_timeout(Duration::ZERO),
            Config::new("psu").with_send_delay(Duration::ZERO),
            Config::new("psu").with_response_timeout(Duration::ZERO),
            Config::new("psu").with_buffer_size(0),
        ];
        for config in invalid {
            assert!(
                matches!(config.validate(), Err(FugError::InvalidConfig(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn loads_json_with_seconds() {
        let config = Config::from_json_str(
            r#"{
                "host": "192.168.1.20",
                "port": 2101,
                "read_timeout": 0.01,
                "send_delay": 0.02,
                "response_timeout": 1.5,
                "poll_interval": 0.005,
                "buffer_size": 512
            }"#,
        )
        .unwrap();
        assert_eq!(config.host, "192.168.1.20");
        assert_eq!(config.read_timeout, Duration::from_millis(10));
        assert_eq!(config.send_delay, Duration::from_millis(20));
        assert_eq!(config.response_timeout, Duration::from_millis(1500));
        assert_eq!(config.poll_interval, Duration::from_millis(5));
        assert_eq!(config.connect_timeout, Duration::from_secs(2));
        assert_eq!(config.buffer_size, 512);
    }

    #[test]
    fn json_round_trip() {
        let config = Config::new("psu").with_send_delay(Duration::from_millis(250));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(Config::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn json_errors() {
        assert!(matches!(
            Config::from_json_str("{ not json"),
            Err(FugError::Json(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{ "host": "psu", "send_delay": -1.0 }"#),
            Err(FugError::Json(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{ "port": 2101 }"#),
            Err(FugError::InvalidConfig(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Config::from_json_file("/nonexistent/fug.json"),
            Err(FugError::Io(_))
        ));
    }
}
