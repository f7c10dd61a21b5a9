//! Elan vendor command set and the command/response exchange primitives.
//!
//! Commands are short opcode/parameter sequences wrapped into output report
//! frames by [`crate::protocol::frame`]. Responses carry a header byte that
//! identifies the command class:
//!
//! | Command | Bytes | Response header |
//! |---|---|---|
//! | Request hello packet | `18` | none (byte 0 is the hello packet) |
//! | Get firmware version | `53 00 00 01` | `52` |
//! | Get boot-code version | `53 10 00 01` | `52` |
//! | Read ROM word (legacy) | `96 ah al vv` | `95` |
//! | Show bulk ROM data (legacy) | `59 10 ah al` | `99` |
//! | Read ROM data (Gen8) | `96 a3 a2 a1 a0 len` | `95` |

use crate::error::{Error, Result};
use crate::port::Transport;
use crate::protocol::{frame, high_byte};
use crate::retry::DEFAULT_RETRY_COUNT;
use byteorder::{BigEndian, ByteOrder};
use std::time::Duration;

/// Elan USB/I2C vendor ID.
pub const ELAN_VID: u16 = 0x04F3;

/// Product ID a controller enumerates under while in recovery mode.
pub const ELAN_RECOVERY_PID: u16 = 0x0732;

/// Default deadline for one blocking send or receive.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Request hello packet.
pub(crate) const CMD_HELLO: [u8; 1] = [0x18];

/// Get firmware version (normal mode only).
pub(crate) const CMD_GET_FW_VERSION: [u8; 4] = [0x53, 0x00, 0x00, 0x01];

/// Get boot-code version (normal mode only).
pub(crate) const CMD_GET_BC_VERSION: [u8; 4] = [0x53, 0x10, 0x00, 0x01];

/// ROM read opcode, shared by the legacy and Gen8 command variants.
pub(crate) const OP_READ_ROM: u8 = 0x96;

/// Legacy bulk "show ROM data" opcode prefix.
pub(crate) const OP_SHOW_BULK_ROM: [u8; 2] = [0x59, 0x10];

/// Response header for version-class commands.
pub(crate) const RESP_VERSION: u8 = 0x52;

/// Response header for ROM reads.
pub(crate) const RESP_ROM: u8 = 0x95;

/// Response header for bulk ROM data.
pub(crate) const RESP_BULK_ROM: u8 = 0x99;

/// One opened Elan touch controller.
///
/// Generic over the transport type `T`, which must implement the
/// [`Transport`] trait. All exchanges are blocking: one command frame out,
/// one data frame back, bounded by the configured timeout.
pub struct TouchDevice<T: Transport> {
    transport: T,
    timeout: Duration,
    retry_count: i32,
}

impl<T: Transport> TouchDevice<T> {
    /// Create a new touch device over an opened transport.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            timeout: DEFAULT_TIMEOUT,
            retry_count: DEFAULT_RETRY_COUNT,
        }
    }

    /// Set the exchange timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the probe retry bound. Values `<= 0` behave like one attempt.
    #[must_use]
    pub fn with_retry_count(mut self, retry_count: i32) -> Self {
        self.retry_count = retry_count;
        self
    }

    /// Get the configured probe retry bound.
    pub fn retry_count(&self) -> i32 {
        self.retry_count
    }

    /// Get a reference to the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Get mutable access to the underlying transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consume the device and return the underlying transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Send one command and read back one raw data frame.
    pub(crate) fn exchange(&mut self, cmd: &[u8]) -> Result<Vec<u8>> {
        let out = frame::encode_command(cmd)?;
        self.transport.send(&out, self.timeout)?;
        self.transport.receive(frame::DATA_FRAME_LEN, self.timeout)
    }

    /// Send one command and return the payload of a header-checked response.
    pub(crate) fn execute(&mut self, cmd: &[u8], header: u8) -> Result<Vec<u8>> {
        let data = self.exchange(cmd)?;
        Ok(frame::response_payload(&data, header)?.to_vec())
    }

    /// Read the firmware version (normal mode).
    pub fn fw_version(&mut self) -> Result<u16> {
        let payload = self.execute(&CMD_GET_FW_VERSION, RESP_VERSION)?;
        read_word(&payload)
    }

    /// Derive the solution ID, the high byte of the firmware version.
    pub fn solution_id(&mut self) -> Result<u8> {
        Ok(high_byte(self.fw_version()?))
    }

    /// Read the boot-code version (normal mode).
    ///
    /// In recovery mode the boot-code version arrives with the hello packet
    /// instead; see [`crate::probe`].
    pub fn boot_code_version(&mut self) -> Result<u16> {
        let payload = self.execute(&CMD_GET_BC_VERSION, RESP_VERSION)?;
        read_word(&payload)
    }
}

/// Read a big-endian word from the start of a response payload.
pub(crate) fn read_word(payload: &[u8]) -> Result<u16> {
    if payload.len() < 2 {
        return Err(Error::Command(format!(
            "short response: {} bytes",
            payload.len()
        )));
    }
    Ok(BigEndian::read_u16(&payload[..2]))
}
