//! hidapi-backed transport implementation.

use crate::error::{Error, Result};
use crate::port::Transport;
use hidapi::{HidApi, HidDevice};
use log::trace;
use std::time::Duration;

/// HID transport over a hidraw device node.
pub struct HidRawTransport {
    device: HidDevice,
    name: String,
}

impl HidRawTransport {
    /// Open the first HID device matching the given VID/PID pair.
    pub fn open(vendor_id: u16, product_id: u16) -> Result<Self> {
        let api = HidApi::new()?;
        let device = api
            .open(vendor_id, product_id)
            .map_err(|_| Error::DeviceNotFound)?;
        device.set_blocking_mode(true)?;

        Ok(Self {
            device,
            name: format!("{vendor_id:04x}:{product_id:04x}"),
        })
    }
}

impl Transport for HidRawTransport {
    fn send(&mut self, frame: &[u8], _timeout: Duration) -> Result<()> {
        if frame.is_empty() {
            return Err(Error::InvalidParameter("empty frame".to_string()));
        }

        trace!("{} -> {:02x?}", self.name, frame);
        let written = self.device.write(frame)?;
        if written != frame.len() {
            return Err(Error::Command(format!(
                "short write: {written}/{} bytes",
                frame.len()
            )));
        }
        Ok(())
    }

    fn receive(&mut self, frame_len: usize, timeout: Duration) -> Result<Vec<u8>> {
        if frame_len == 0 {
            return Err(Error::InvalidParameter("zero-sized read".to_string()));
        }

        let millis = i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX);
        let mut buf = vec![0u8; frame_len];
        let read = self.device.read_timeout(&mut buf, millis)?;
        if read == 0 {
            return Err(Error::Timeout(format!(
                "no data frame from {} within {millis} ms",
                self.name
            )));
        }

        buf.truncate(read);
        trace!("{} <- {:02x?}", self.name, buf);
        Ok(buf)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn close(&mut self) -> Result<()> {
        // hidapi releases the handle when the HidDevice drops.
        Ok(())
    }
}
