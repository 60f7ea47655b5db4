use crate::config::Config;
use crate::error::{FugError, Result};
use crate::line_buffer::LineBuffer;
use crate::transport::{TcpTransport, Transport};
use crate::types::*;
use log::{debug, trace, warn};
use std::thread;
use std::time::Instant;

/// Main FuG power supply interface
pub struct FugSource<T: Transport = TcpTransport> {
    config: Config,
    transport: Option<T>,
    line_buffer: LineBuffer,
    state: DeviceState,
}

impl FugSource<TcpTransport> {
    /// Connect to the power supply described by `config`
    pub fn connect(config: Config) -> Result<Self> {
        config.validate()?;
        let transport = TcpTransport::connect(&config)?;
        Ok(Self::from_parts(config, transport))
    }

    /// Reconnect after [`FugSource::close`]. No-op while connected.
    pub fn open(&mut self) -> Result<()> {
        if self.transport.is_none() {
            self.transport = Some(TcpTransport::connect(&self.config)?);
        }
        Ok(())
    }
}

impl<T: Transport> FugSource<T> {
    /// Create an interface on top of an already connected transport
    pub fn with_transport(config: Config, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_parts(config, transport))
    }

    fn from_parts(config: Config, transport: T) -> Self {
        FugSource {
            config,
            transport: Some(transport),
            line_buffer: LineBuffer::new(),
            state: DeviceState::default(),
        }
    }

    /// Disconnect from the power supply and forget the measured values
    pub fn close(&mut self) -> Result<()> {
        self.state.clear();
        self.line_buffer.reset();
        if let Some(mut transport) = self.transport.take() {
            transport.disconnect().map_err(FugError::Connection)?;
            debug!("Disconnected from {}", self.config.address());
        }
        Ok(())
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Values reported by the last successful measurements
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Last measured voltage, `None` if unknown
    pub fn voltage(&self) -> Option<f64> {
        self.state.voltage
    }

    /// Last measured current, `None` if unknown
    pub fn current(&self) -> Option<f64> {
        self.state.current
    }

    pub fn transport(&self) -> Option<&T> {
        self.transport.as_ref()
    }

    /// Enable the output with zero voltage and current
    pub fn enable(&mut self) -> Result<()> {
        self.set_voltage(0.0)?;
        self.set_current(0.0)?;
        self.execute(&[Command::Enable], &[ResponseKind::Ack])?;
        Ok(())
    }

    /// Disable the output after resetting voltage and current to zero
    pub fn disable(&mut self) -> Result<()> {
        self.set_voltage(0.0)?;
        self.set_current(0.0)?;
        self.execute(&[Command::Disable], &[ResponseKind::Ack])?;
        Ok(())
    }

    /// Set the voltage setpoint (volts, sent without decimals)
    pub fn set_voltage(&mut self, voltage: f64) -> Result<()> {
        let voltage = checked_setpoint(voltage)?;
        self.execute(&[Command::SetVoltage(voltage)], &[ResponseKind::Ack])?;
        Ok(())
    }

    /// Set the current limit (amperes, sent with three decimals)
    pub fn set_current(&mut self, current: f64) -> Result<()> {
        let current = checked_setpoint(current)?;
        self.execute(&[Command::SetCurrent(current)], &[ResponseKind::Ack])?;
        Ok(())
    }

    /// Read the measured voltage
    pub fn get_voltage(&mut self) -> Result<f64> {
        self.read_value(Command::GetVoltage, ResponseKind::Voltage)
    }

    /// Read the measured current
    pub fn get_current(&mut self) -> Result<f64> {
        self.read_value(Command::GetCurrent, ResponseKind::Current)
    }

    fn read_value(&mut self, command: Command, kind: ResponseKind) -> Result<f64> {
        match self.execute(&[command, Command::Poll], &[ResponseKind::Ack, kind])? {
            Response::Voltage(v) | Response::Current(v) => Ok(v),
            Response::Ack => Err(FugError::SequenceMismatch {
                position: 1,
                expected: kind,
                actual: ResponseKind::Ack,
            }),
        }
    }

    /// Send a command sequence and wait for the expected replies, returning the last one
    fn execute(&mut self, commands: &[Command], expected: &[ResponseKind]) -> Result<Response> {
        debug!("Executing {:?}, expecting {:?}", commands, expected);
        let result = self
            .send_command(commands)
            .and_then(|_| self.wait_response(expected));
        if let Err(e) = &result {
            warn!("{:?} failed: {}", commands, e);
        }
        result
    }

    /// Flush stale input, then send every token followed by the send delay
    fn send_command(&mut self, commands: &[Command]) -> Result<()> {
        let buffer_size = self.config.buffer_size;
        let send_delay = self.config.send_delay;
        let transport = self.transport.as_mut().ok_or(FugError::NotConnected)?;

        self.line_buffer.reset();
        let stale = transport
            .receive_available(buffer_size)
            .map_err(FugError::Receive)?;
        if !stale.is_empty() {
            debug!("Discarded stale input: {:?}", String::from_utf8_lossy(&stale));
        }

        // The device drops input written back to back
        for command in commands {
            let token = command.encode();
            trace!("Sending:  {:?}", token);
            transport.send(token.as_bytes()).map_err(FugError::Send)?;
            thread::sleep(send_delay);
        }
        Ok(())
    }

    /// Poll for replies until `expected` is matched in order or the deadline passes.
    ///
    /// `expected` must not be empty; the last matched reply is returned.
    fn wait_response(&mut self, expected: &[ResponseKind]) -> Result<Response> {
        debug_assert!(!expected.is_empty());
        let start = Instant::now();
        let mut matched = 0;

        while start.elapsed() < self.config.response_timeout {
            let chunk = self.receive()?;
            for line in self.line_buffer.feed(&chunk) {
                trace!("Received: {:?}", line);
                let response = self.parse_response(&line)?;
                let position = matched;
                if response.kind() != expected[position] {
                    return Err(FugError::SequenceMismatch {
                        position,
                        expected: expected[position],
                        actual: response.kind(),
                    });
                }
                matched += 1;
                if matched == expected.len() {
                    debug!("Completed after {:?}", start.elapsed());
                    return Ok(response);
                }
            }
            thread::sleep(self.config.poll_interval);
        }

        Err(FugError::Timeout {
            elapsed: start.elapsed(),
            matched,
            expected: expected.len(),
        })
    }

    fn receive(&mut self) -> Result<Vec<u8>> {
        let buffer_size = self.config.buffer_size;
        self.transport
            .as_mut()
            .ok_or(FugError::NotConnected)?
            .receive_available(buffer_size)
            .map_err(FugError::Receive)
    }

    /// Classify a reply line, recording measured values
    fn parse_response(&mut self, line: &str) -> Result<Response> {
        let response = Response::parse(line).ok_or_else(|| FugError::MalformedResponse {
            line: line.to_string(),
        })?;
        self.state.apply(response);
        Ok(response)
    }
}

/// Reject setpoints the device cannot represent; `-0.0` is sent as `0`
fn checked_setpoint(value: f64) -> Result<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(FugError::InvalidSetpoint { value });
    }
    Ok(value.abs())
}
