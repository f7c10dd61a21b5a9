//! ROM access for Gen8 controllers.
//!
//! Gen8 firmware exposes a single width-parameterized read command for
//! 8/16/32-bit access; Gen8 boot code honors only byte-width requests.

use crate::error::{Error, Result};
use crate::port::Transport;
use crate::probe::Mode;
use crate::protocol::command::{OP_READ_ROM, RESP_ROM, TouchDevice};
use crate::protocol::{low_byte, low_word};
use crate::rom::GEN8_INFO_FWID_ADDR;
use byteorder::{BigEndian, ByteOrder};
use log::debug;

impl<T: Transport> TouchDevice<T> {
    /// Read up to 32 bits from ROM at `addr`.
    ///
    /// `width` is the requested byte count (1, 2, or 4); the value comes
    /// back right-aligned in the low `width` bytes.
    pub fn gen8_read_rom(&mut self, addr: u32, width: u8) -> Result<u32> {
        if !matches!(width, 1 | 2 | 4) {
            return Err(Error::InvalidParameter(format!(
                "unsupported ROM read width: {width}"
            )));
        }

        let mut cmd = [0u8; 6];
        cmd[0] = OP_READ_ROM;
        BigEndian::write_u32(&mut cmd[1..5], addr);
        cmd[5] = width;

        let payload = self.execute(&cmd, RESP_ROM)?;
        if payload.len() < 4 {
            return Err(Error::Command(format!(
                "short ROM response: {} bytes",
                payload.len()
            )));
        }
        let data = BigEndian::read_u32(&payload[..4]);
        debug!("ROM[{addr:#010x}] ({width}B) = {data:#010x}");
        Ok(data)
    }

    /// Read the Gen8 information-page FWID at `0x40000`.
    pub(crate) fn gen8_read_info_fwid(&mut self, mode: Mode) -> Result<u16> {
        match mode {
            Mode::Normal => {
                let data = self.gen8_read_rom(GEN8_INFO_FWID_ADDR, 2)?;
                Ok(low_word(data))
            },
            Mode::Recovery => {
                // Boot code only supports byte-width access.
                let low = low_byte(low_word(self.gen8_read_rom(GEN8_INFO_FWID_ADDR, 1)?));
                let high = low_byte(low_word(self.gen8_read_rom(GEN8_INFO_FWID_ADDR + 1, 1)?));
                Ok((u16::from(high) << 8) | u16::from(low))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::mock::MockTransport;
    use crate::protocol::frame::OUTPUT_REPORT_ID;

    #[test]
    fn test_rejects_unsupported_width() {
        let mut dev = TouchDevice::new(MockTransport::new());
        assert!(matches!(
            dev.gen8_read_rom(GEN8_INFO_FWID_ADDR, 3),
            Err(Error::InvalidParameter(_))
        ));
        // Nothing hit the wire.
        assert!(dev.transport().sent.is_empty());
    }

    #[test]
    fn test_word_read_command_shape() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[RESP_ROM, 0x00, 0x00, 0x12, 0x34]);

        let mut dev = TouchDevice::new(mock);
        assert_eq!(dev.gen8_read_rom(GEN8_INFO_FWID_ADDR, 2).unwrap(), 0x1234);

        let sent = &dev.transport().sent[0];
        assert_eq!(sent[0], OUTPUT_REPORT_ID);
        assert_eq!(&sent[1..7], &[OP_READ_ROM, 0x00, 0x04, 0x00, 0x00, 0x02]);
    }

    #[test]
    fn test_normal_info_fwid_single_word_read() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[RESP_ROM, 0x00, 0x00, 0x12, 0x34]);

        let mut dev = TouchDevice::new(mock);
        assert_eq!(dev.gen8_read_info_fwid(Mode::Normal).unwrap(), 0x1234);
        assert_eq!(dev.transport().sent.len(), 1);
    }

    #[test]
    fn test_recovery_info_fwid_two_byte_reads() {
        let mut mock = MockTransport::new();
        // Byte at 0x40000 (low), then byte at 0x40001 (high).
        mock.push_reply(&[RESP_ROM, 0x00, 0x00, 0x00, 0xCD]);
        mock.push_reply(&[RESP_ROM, 0x00, 0x00, 0x00, 0xAB]);

        let mut dev = TouchDevice::new(mock);
        assert_eq!(dev.gen8_read_info_fwid(Mode::Recovery).unwrap(), 0xABCD);

        let sent = &dev.transport().sent;
        assert_eq!(&sent[0][1..7], &[OP_READ_ROM, 0x00, 0x04, 0x00, 0x00, 0x01]);
        assert_eq!(&sent[1][1..7], &[OP_READ_ROM, 0x00, 0x04, 0x00, 0x01, 0x01]);
    }
}
