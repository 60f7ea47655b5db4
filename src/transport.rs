//! Byte transports carrying the ASCII protocol.

use crate::config::Config;
use crate::error::{FugError, Result};
use log::{debug, trace};
use std::io::{self, ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};

/// Byte-level link to the power supply.
///
/// Reads must not block longer than the link's own timeout; an idle link
/// yields an empty buffer instead of an error.
pub trait Transport {
    /// Transmit the complete buffer
    fn send(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Fetch up to `max_bytes` available bytes, empty if none arrived in time
    fn receive_available(&mut self, max_bytes: usize) -> io::Result<Vec<u8>>;

    /// Tear down the link
    fn disconnect(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw TCP socket transport
#[derive(Debug)]
pub struct TcpTransport {
    stream: TcpStream,
}

impl TcpTransport {
    /// Connect to `config.host:config.port` and apply the socket timeouts
    pub fn connect(config: &Config) -> Result<Self> {
        let address = config.address();
        let candidates = address
            .to_socket_addrs()
            .map_err(FugError::Connection)?;

        let mut last_error = io::Error::new(
            ErrorKind::AddrNotAvailable,
            format!("{} did not resolve to any address", address),
        );
        for candidate in candidates {
            match TcpStream::connect_timeout(&candidate, config.connect_timeout) {
                Ok(stream) => {
                    debug!("Connected to {} ({})", address, candidate);
                    return Self::from_stream(stream, config);
                }
                Err(e) => {
                    debug!("Connecting to {} failed: {}", candidate, e);
                    last_error = e;
                }
            }
        }
        Err(FugError::Connection(last_error))
    }

    /// Wrap an already connected stream
    pub fn from_stream(stream: TcpStream, config: &Config) -> Result<Self> {
        stream
            .set_read_timeout(Some(config.read_timeout))
            .map_err(FugError::Connection)?;
        stream.set_nodelay(true).map_err(FugError::Connection)?;
        Ok(TcpTransport { stream })
    }
}

impl Transport for TcpTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.stream.write_all(bytes)?;
        self.stream.flush()
    }

    fn receive_available(&mut self, max_bytes: usize) -> io::Result<Vec<u8>> {
        let mut buffer = vec![0u8; max_bytes];
        match self.stream.read(&mut buffer) {
            Ok(0) => Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "connection closed by the power supply",
            )),
            Ok(n) => {
                buffer.truncate(n);
                Ok(buffer)
            }
            // Idle socket
            Err(e) if matches!(
                e.kind(),
                ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted
            ) =>
            {
                trace!("No data within read timeout");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    fn disconnect(&mut self) -> io::Result<()> {
        match self.stream.shutdown(Shutdown::Both) {
            // Already closed by the peer
            Err(e) if e.kind() == ErrorKind::NotConnected => Ok(()),
            other => other,
        }
    }
}
