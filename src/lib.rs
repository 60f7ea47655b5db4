//! # FuG Protocol Library
//!
//! A Rust library for remote controlling "FuG Elektronik" power supplies
//! (HCP and HYN series) over their ethernet interface. The device speaks a
//! newline delimited ASCII protocol on a raw TCP socket.
//!
//! ## Features
//!
//! - Enable and disable the output
//! - Set the voltage setpoint and the current limit
//! - Read the measured voltage and current
//! - Paced command transmission and bounded, ordered reply matching
//! - Typed configuration, loadable from JSON
//!
//! Power supplies are dangerous. External safety circuits (such as breakers)
//! are required to guarantee the absence of hazards.
//!
//! ## Example
//!
//! ```no_run
//! use fug_protocol::{Config, FugSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut psu = FugSource::connect(Config::new("192.168.0.10"))?;
//!     psu.enable()?;
//!     psu.set_current(0.5)?;
//!     psu.set_voltage(800.0)?;
//!     println!("Output voltage: {:.2}V", psu.get_voltage()?);
//!     psu.disable()?;
//!     psu.close()?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod line_buffer;
pub mod protocol;
pub mod transport;
pub mod types;

#[cfg(test)]
mod mock_transport;

pub use config::Config;
pub use error::{FugError, Result};
pub use line_buffer::LineBuffer;
pub use protocol::FugSource;
pub use transport::{TcpTransport, Transport};
pub use types::*;
