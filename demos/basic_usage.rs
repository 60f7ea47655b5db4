//! Basic Usage Example
//!
//! This example runs a short session against a FuG power supply:
//! - Connecting over TCP
//! - Enabling the output
//! - Setting the current limit and the voltage
//! - Reading back voltage and current
//! - Disabling the output and disconnecting
//!
//! Usage:
//!   cargo run --example basic_usage                       # Interactive mode
//!   cargo run --example basic_usage -- 192.168.0.10       # Specify host
//!   cargo run --example basic_usage -- config.json        # Load a JSON configuration
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=trace cargo run --example basic_usage
//!   RUST_LOG=info cargo run --example basic_usage

use fug_protocol::{Config, FugError, FugSource, Result};
use inquire::Text;
use log::info;
use std::path::Path;

/// Interactive host entry using inquire
fn prompt_host() -> Result<String> {
    Text::new("Power supply host or IP address:")
        .prompt()
        .map_err(|e| {
            FugError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Input cancelled: {}", e),
            ))
        })
}

fn load_config(arg: Option<String>) -> Result<Config> {
    match arg {
        Some(arg) if arg.ends_with(".json") && Path::new(&arg).exists() => {
            Config::from_json_file(&arg)
        }
        Some(host) => Ok(Config::new(host)),
        None => Ok(Config::new(prompt_host()?)),
    }
}

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG is not set
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config(std::env::args().nth(1))?;

    info!("Connecting to FuG power supply on {}...", config.address());
    let mut psu = FugSource::connect(config)?;

    info!("=== Enabling Output ===");
    psu.enable()?;

    info!("=== Setting Limits ===");
    psu.set_current(0.5)?;
    psu.set_voltage(800.0)?;

    info!("=== Reading Measurements ===");
    let voltage = psu.get_voltage()?;
    let current = psu.get_current()?;
    info!("Voltage: {:.2} V, Current: {:.3} A", voltage, current);

    info!("=== Disabling Output ===");
    psu.disable()?;

    psu.close()?;
    info!("=== Basic Usage Complete ===");

    Ok(())
}
