//! ROM access for legacy-generation controllers.

use crate::error::{Error, Result};
use crate::port::Transport;
use crate::probe::Mode;
use crate::protocol::command::{
    OP_READ_ROM, OP_SHOW_BULK_ROM, RESP_BULK_ROM, RESP_ROM, TouchDevice, read_word,
};
use crate::protocol::{high_byte, low_byte};
use crate::rom::LEGACY_INFO_FWID_ADDR;
use log::debug;

/// ROM-read command variant selected by the solution ID.
///
/// Later legacy sub-families (solution IDs `0x30` and up) switched to a new
/// parameter byte for the same opcode.
pub(crate) fn rom_read_variant(solution_id: u8) -> u8 {
    if solution_id >= 0x30 { 0x23 } else { 0x21 }
}

impl<T: Transport> TouchDevice<T> {
    /// Read one 16-bit word from ROM (normal-mode firmware only).
    pub fn legacy_read_rom_word(&mut self, addr: u16, solution_id: u8) -> Result<u16> {
        let cmd = [
            OP_READ_ROM,
            high_byte(addr),
            low_byte(addr),
            rom_read_variant(solution_id),
        ];
        let payload = self.execute(&cmd, RESP_ROM)?;
        let word = read_word(&payload)?;
        debug!("ROM[{addr:#06x}] = {word:#06x}");
        Ok(word)
    }

    /// Read one byte from ROM (recovery-mode boot code only supports
    /// byte-width access).
    pub fn legacy_read_rom_byte(&mut self, addr: u16) -> Result<u8> {
        let cmd = [OP_READ_ROM, high_byte(addr), low_byte(addr), 0x01];
        let payload = self.execute(&cmd, RESP_ROM)?;
        let byte = *payload
            .get(1)
            .ok_or_else(|| Error::Command("short byte-read response".to_string()))?;
        debug!("ROM[{addr:#06x}] = {byte:#04x}");
        Ok(byte)
    }

    /// Read one 16-bit word through the bulk "show ROM data" command.
    ///
    /// This is the recovery-mode raw-ROM fallback for legacy controllers.
    pub fn legacy_read_bulk_rom_word(&mut self, addr: u16) -> Result<u16> {
        let cmd = [
            OP_SHOW_BULK_ROM[0],
            OP_SHOW_BULK_ROM[1],
            high_byte(addr),
            low_byte(addr),
        ];
        let payload = self.execute(&cmd, RESP_BULK_ROM)?;
        let word = read_word(&payload)?;
        debug!("bulk ROM[{addr:#06x}] = {word:#06x}");
        Ok(word)
    }

    /// Read the legacy information-page FWID at `0x8080`.
    pub(crate) fn legacy_read_info_fwid(&mut self, mode: Mode) -> Result<u16> {
        match mode {
            Mode::Normal => {
                let solution_id = self.solution_id()?;
                self.legacy_read_rom_word(LEGACY_INFO_FWID_ADDR, solution_id)
            },
            Mode::Recovery => {
                let low = self.legacy_read_rom_byte(LEGACY_INFO_FWID_ADDR)?;
                let high = self.legacy_read_rom_byte(LEGACY_INFO_FWID_ADDR + 1)?;
                Ok((u16::from(high) << 8) | u16::from(low))
            },
        }
    }
}
