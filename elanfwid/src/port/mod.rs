//! Transport abstraction for the I2C-HID report channel.
//!
//! This module provides a `Transport` trait that abstracts the raw report
//! exchange with the touch controller:
//!
//! - **Native platforms** (Linux, macOS, Windows): Uses the `hidapi` crate
//!
//! ## Architecture
//!
//! The design separates I/O from protocol logic, allowing the protocol layer
//! to be exercised against a scripted transport in tests.
//!
//! ```text
//! +----------------------+
//! |   Protocol Layer     |
//! | (frames, probe, rom) |
//! +----------+-----------+
//!            |
//!            v
//! +----------+-----------+
//! |   Transport Trait    |
//! +----------+-----------+
//!            |
//!            v
//! +----------+-----------+
//! |  hidraw (hidapi)     |
//! +----------------------+
//! ```

#[cfg(feature = "native")]
pub mod hidraw;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use crate::error::Result;

/// Opaque send/receive channel to one opened touch device.
///
/// The protocol layer builds complete report frames and hands them to the
/// transport; the transport performs a blocking send or a blocking read with
/// the given deadline. A read that reaches its deadline must fail with
/// [`crate::Error::Timeout`], never block indefinitely.
pub trait Transport {
    /// Send one complete report frame, blocking until accepted.
    fn send(&mut self, frame: &[u8], timeout: Duration) -> Result<()>;

    /// Receive one report frame of up to `frame_len` bytes.
    fn receive(&mut self, frame_len: usize, timeout: Duration) -> Result<Vec<u8>>;

    /// Get a short identifier of the underlying device node.
    fn name(&self) -> &str;

    /// Close the transport and release the device handle.
    ///
    /// After calling this method, the transport cannot be used for further
    /// I/O. Dropping the transport releases the handle as well.
    fn close(&mut self) -> Result<()>;
}
