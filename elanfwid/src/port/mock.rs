//! Scripted transport for protocol-layer tests.

use crate::error::{Error, Result};
use crate::port::Transport;
use crate::protocol::frame::DATA_FRAME_LEN;
use std::collections::VecDeque;
use std::time::Duration;

/// Transport that records sent frames and replays scripted responses.
pub(crate) struct MockTransport {
    pub(crate) sent: Vec<Vec<u8>>,
    replies: VecDeque<Result<Vec<u8>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self {
            sent: Vec::new(),
            replies: VecDeque::new(),
        }
    }

    /// Queue a raw reply frame for the next receive.
    pub(crate) fn push_reply(&mut self, bytes: &[u8]) {
        self.replies.push_back(Ok(data_frame(bytes)));
    }

    /// Queue an error for the next receive.
    pub(crate) fn push_error(&mut self, err: Error) {
        self.replies.push_back(Err(err));
    }
}

/// Zero-pad `bytes` to a full data frame.
pub(crate) fn data_frame(bytes: &[u8]) -> Vec<u8> {
    let mut frame = vec![0u8; DATA_FRAME_LEN];
    frame[..bytes.len()].copy_from_slice(bytes);
    frame
}

impl Transport for MockTransport {
    fn send(&mut self, frame: &[u8], _timeout: Duration) -> Result<()> {
        self.sent.push(frame.to_vec());
        Ok(())
    }

    fn receive(&mut self, _frame_len: usize, _timeout: Duration) -> Result<Vec<u8>> {
        self.replies
            .pop_front()
            .unwrap_or_else(|| Err(Error::Command("mock: no scripted reply".to_string())))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
