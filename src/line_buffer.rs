//! Reassembly of the received byte stream into delimited lines.

use crate::constants::DELIMITER;

/// Accumulates received bytes and emits every completed line.
///
/// An unterminated trailing fragment is kept until a later chunk completes
/// it, or until [`LineBuffer::reset`] discards it.
#[derive(Debug, Default)]
pub struct LineBuffer {
    partial: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard any buffered partial line
    pub fn reset(&mut self) {
        self.partial.clear();
    }

    /// Bytes of the pending, incomplete line
    pub fn pending(&self) -> &[u8] {
        &self.partial
    }

    /// Append a received chunk and return the lines it completes, in order.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        let mut lines = Vec::new();
        for &byte in chunk {
            if byte == DELIMITER {
                let line = std::mem::take(&mut self.partial);
                lines.push(String::from_utf8_lossy(&line).into_owned());
            } else {
                self.partial.push(byte);
            }
        }
        lines
    }
}
