//! Elan I2C-HID command protocol.

pub mod command;
pub mod frame;

/// High byte of a 16-bit word.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn high_byte(word: u16) -> u8 {
    (word >> 8) as u8
}

/// Low byte of a 16-bit word.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn low_byte(word: u16) -> u8 {
    (word & 0x00FF) as u8
}

/// Low 16-bit word of a 32-bit value.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn low_word(dword: u32) -> u16 {
    (dword & 0xFFFF) as u16
}
