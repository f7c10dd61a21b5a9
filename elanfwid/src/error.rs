//! Error types for elanfwid.

use std::io;
use thiserror::Error;

/// Result type for elanfwid operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for elanfwid operations.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error (pipe, file operations).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HID transport error.
    #[cfg(feature = "native")]
    #[error("HID error: {0}")]
    Hid(#[from] hidapi::HidError),

    /// Invalid parameter (empty buffer, out-of-range value, unset option).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// No matching Elan touch device on the host.
    #[error("Elan touch device not found")]
    DeviceNotFound,

    /// Hello packet did not match any known device sentinel.
    #[error("Unknown device type (hello packet {0:#04x})")]
    UnknownDeviceType(u8),

    /// Transport read exceeded its deadline. Never retried by the probe
    /// executor.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Command/response mismatch or short exchange. Retried by the probe
    /// executor up to its configured bound.
    #[error("Command failed: {0}")]
    Command(String),

    /// Lookup legitimately came up empty (EDID block or mapping entry).
    /// Non-fatal; drives the resolution fallback.
    #[error("Data not found")]
    DataNotFound,

    /// Mapping file path could not be opened.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// External system command (EDID query) could not be invoked.
    #[error("System command failed: {0}")]
    SystemCommand(String),
}

impl Error {
    /// Whether the probe executor may retry after this error.
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Timeout(_) | Self::InvalidParameter(_))
    }
}
