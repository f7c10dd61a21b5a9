//! HID device enumeration and validation.

use crate::protocol::command::{ELAN_RECOVERY_PID, ELAN_VID};
use std::fmt;

#[cfg(feature = "native")]
use crate::error::Result;
#[cfg(feature = "native")]
use log::{debug, trace};

/// Bus a HID device is attached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum BusType {
    /// USB.
    Usb,
    /// Bluetooth.
    Bluetooth,
    /// I2C.
    I2c,
    /// SPI.
    Spi,
    /// Anything the platform could not classify.
    Unknown,
}

impl BusType {
    /// Get a human-readable name for the bus type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Usb => "USB",
            Self::Bluetooth => "Bluetooth",
            Self::I2c => "I2C",
            Self::Spi => "SPI",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for BusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(feature = "native")]
impl From<hidapi::BusType> for BusType {
    fn from(bus: hidapi::BusType) -> Self {
        match bus {
            hidapi::BusType::Usb => Self::Usb,
            hidapi::BusType::Bluetooth => Self::Bluetooth,
            hidapi::BusType::I2c => Self::I2c,
            hidapi::BusType::Spi => Self::Spi,
            _ => Self::Unknown,
        }
    }
}

/// Identity of one enumerated HID device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HidDeviceDescriptor {
    /// Bus the device is attached through.
    pub bus: BusType,
    /// USB/I2C vendor ID.
    pub vendor_id: u16,
    /// Product ID.
    pub product_id: u16,
}

impl fmt::Display for HidDeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:04x}:{:04x}",
            self.bus, self.vendor_id, self.product_id
        )
    }
}

/// Enumerate all HID devices visible to the platform.
///
/// Multi-interface devices enumerate once per interface; the list is
/// deduplicated on (bus, VID, PID).
#[cfg(feature = "native")]
pub fn enumerate_hid_devices() -> Result<Vec<HidDeviceDescriptor>> {
    let api = hidapi::HidApi::new()?;

    let mut devices: Vec<HidDeviceDescriptor> = Vec::new();
    for info in api.device_list() {
        let descriptor = HidDeviceDescriptor {
            bus: info.bus_type().into(),
            vendor_id: info.vendor_id(),
            product_id: info.product_id(),
        };
        if devices.contains(&descriptor) {
            continue;
        }
        trace!("HID device: {descriptor}");
        devices.push(descriptor);
    }

    debug!("enumerated {} HID devices", devices.len());
    Ok(devices)
}

/// Find an Elan I2C touch controller matching `target_pid`.
///
/// A device qualifies when it sits on the I2C bus, carries the Elan vendor
/// ID, and reports either the target PID or the recovery PID (a controller
/// stuck in boot code enumerates under the recovery PID regardless of what
/// product it belongs to).
pub fn validate_device(
    devices: &[HidDeviceDescriptor],
    target_pid: u16,
) -> Option<&HidDeviceDescriptor> {
    devices.iter().find(|d| {
        d.bus == BusType::I2c
            && d.vendor_id == ELAN_VID
            && (d.product_id == target_pid || d.product_id == ELAN_RECOVERY_PID)
    })
}

/// Find any Elan I2C touch controller, preferring application-mode devices.
pub fn find_elan_device(devices: &[HidDeviceDescriptor]) -> Option<&HidDeviceDescriptor> {
    devices
        .iter()
        .find(|d| {
            d.bus == BusType::I2c
                && d.vendor_id == ELAN_VID
                && d.product_id != ELAN_RECOVERY_PID
        })
        .or_else(|| {
            devices
                .iter()
                .find(|d| d.bus == BusType::I2c && d.vendor_id == ELAN_VID)
        })
}
