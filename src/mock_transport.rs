//! Scripted transport for unit tests.

use crate::transport::Transport;
use std::collections::VecDeque;
use std::io::{self, ErrorKind};

/// Replies to expected tokens in script order and records everything sent.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: VecDeque<(Vec<u8>, Vec<u8>)>,
    available: VecDeque<u8>,
    sent: Vec<Vec<u8>>,
    receive_calls: usize,
    fail_send: bool,
    fail_receive_after: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `reply` to become readable once `token` has been sent
    pub fn reply_to(mut self, token: &str, reply: &str) -> Self {
        self.script
            .push_back((token.as_bytes().to_vec(), reply.as_bytes().to_vec()));
        self
    }

    /// Bytes already waiting before any command is sent
    pub fn with_pending(mut self, bytes: &str) -> Self {
        self.available.extend(bytes.as_bytes());
        self
    }

    pub fn failing_send(mut self) -> Self {
        self.fail_send = true;
        self
    }

    pub fn failing_receive(self) -> Self {
        self.failing_receive_after(0)
    }

    /// Let the first `calls` receives succeed, fail every later one
    pub fn failing_receive_after(mut self, calls: usize) -> Self {
        self.fail_receive_after = Some(calls);
        self
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent
            .iter()
            .map(|s| String::from_utf8_lossy(s).into_owned())
            .collect()
    }

    pub fn receive_calls(&self) -> usize {
        self.receive_calls
    }
}

impl Transport for MockTransport {
    fn send(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.fail_send {
            return Err(io::Error::new(ErrorKind::BrokenPipe, "mock send failure"));
        }
        self.sent.push(bytes.to_vec());
        if matches!(self.script.front(), Some((token, _)) if token.as_slice() == bytes) {
            if let Some((_, reply)) = self.script.pop_front() {
                self.available.extend(reply);
            }
        }
        Ok(())
    }

    fn receive_available(&mut self, max_bytes: usize) -> io::Result<Vec<u8>> {
        self.receive_calls += 1;
        if matches!(self.fail_receive_after, Some(calls) if self.receive_calls > calls) {
            return Err(io::Error::new(
                ErrorKind::ConnectionReset,
                "mock receive failure",
            ));
        }
        let n = max_bytes.min(self.available.len());
        Ok(self.available.drain(..n).collect())
    }
}
