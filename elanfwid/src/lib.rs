//! # elanfwid
//!
//! A library for reading the firmware ID of Elan I2C-HID touch controllers.
//!
//! This crate provides the core functionality for talking to Elan touch
//! controllers over the I2C-HID report channel, including:
//!
//! - Fixed-size command/data report framing
//! - Hello-packet probing and mode/generation classification
//! - ROM and information-page reads for legacy and Gen8 controllers
//! - The firmware-ID resolution cascade (mapping table, information page,
//!   raw ROM fallback)
//! - Panel EDID identity lookup and FWID mapping-table parsing
//!
//! ## Supported Controllers
//!
//! - Legacy Elan touch series (eKTH3x/5x/6x class)
//! - Gen8 touch series (EKTH7315x class), including the first boot-code
//!   builds that still report the legacy hello packet
//!
//! ## Supported Platforms
//!
//! - **Native** (default): Linux, macOS, Windows via the `hidapi` crate
//!
//! ## Features
//!
//! - `native` (default): hidapi-backed HID transport and enumeration
//! - `serde`: Serialization support for data types
//!
//! ## Example
//!
//! ```rust,no_run
//! use elanfwid::{resolve_fwid, HidRawTransport, TouchDevice, ELAN_VID};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = HidRawTransport::open(ELAN_VID, 0x2A03)?;
//!     let mut device = TouchDevice::new(transport);
//!
//!     let resolution = resolve_fwid(&mut device, None, None)?;
//!     println!("FWID: {:04x}", resolution.fwid);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod device;
pub mod edid;
pub mod error;
pub mod fwid;
pub mod lcm;
pub mod port;
pub mod probe;
pub mod protocol;
pub mod retry;
pub mod rom;

// Re-exports for convenience
// Native-specific re-exports
#[cfg(feature = "native")]
pub use device::enumerate_hid_devices;
#[cfg(feature = "native")]
pub use port::hidraw::HidRawTransport;
pub use {
    device::{BusType, HidDeviceDescriptor, find_elan_device, validate_device},
    edid::{PanelIdentity, parse_panel_identity, query_panel_identity},
    error::{Error, Result},
    fwid::{FwidSource, Resolution, resolve_fwid},
    lcm::{LcmDeviceRecord, OsFamily, load_mapping_file, lookup_fwid, parse_mapping},
    port::Transport,
    probe::{DeviceProfile, Generation, Mode},
    protocol::command::{ELAN_RECOVERY_PID, ELAN_VID, TouchDevice},
    retry::retry_probe,
};
