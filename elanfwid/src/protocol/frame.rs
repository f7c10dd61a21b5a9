//! Fixed-size report frames for the I2C-HID command channel.
//!
//! Every command travels in one output report of a fixed width; every
//! response comes back in one input report of a (different) fixed width.
//!
//! ## Frame Format
//!
//! ```text
//! Command frame (33 bytes):
//! +-----------+----------------------+---------------+
//! | Report ID |    Command bytes     |  Zero padding |
//! +-----------+----------------------+---------------+
//! |   0x03    |      variable        |  to 33 bytes  |
//! +-----------+----------------------+---------------+
//!
//! Data frame (67 bytes): received as-is; only the bytes relevant to the
//! current command are interpreted, the rest ignored.
//! ```

use crate::error::{Error, Result};

/// Output report identifier, the first byte of every command frame.
pub const OUTPUT_REPORT_ID: u8 = 0x03;

/// Total width of a command frame.
pub const CMD_FRAME_LEN: usize = 33;

/// Total width of a data frame.
pub const DATA_FRAME_LEN: usize = 67;

/// Encode a command into a full zero-padded output report frame.
pub fn encode_command(cmd: &[u8]) -> Result<[u8; CMD_FRAME_LEN]> {
    if cmd.is_empty() {
        return Err(Error::InvalidParameter("empty command".to_string()));
    }
    if cmd.len() > CMD_FRAME_LEN - 1 {
        return Err(Error::InvalidParameter(format!(
            "command too long: {} bytes (max {})",
            cmd.len(),
            CMD_FRAME_LEN - 1
        )));
    }

    let mut frame = [0u8; CMD_FRAME_LEN];
    frame[0] = OUTPUT_REPORT_ID;
    frame[1..=cmd.len()].copy_from_slice(cmd);
    Ok(frame)
}

/// Extract the payload of a data frame, checking its response header byte.
pub fn response_payload(frame: &[u8], header: u8) -> Result<&[u8]> {
    match frame.first() {
        Some(&byte) if byte == header => Ok(&frame[1..]),
        Some(&byte) => Err(Error::Command(format!(
            "unexpected response header {byte:#04x} (expected {header:#04x})"
        ))),
        None => Err(Error::Command("empty data frame".to_string())),
    }
}
