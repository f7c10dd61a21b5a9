//! ROM and information-page access for both controller generations.
//!
//! Both implementations expose the same contract: read data at an address
//! given the current operating mode. Normal-mode firmware supports wider
//! reads than recovery-mode boot code, so the information-page FWID is
//! assembled differently per (generation, mode) pair:
//!
//! | Generation | Mode | Access |
//! |---|---|---|
//! | legacy | normal | one solution-ID-variant word read |
//! | legacy | recovery | two byte reads at `a`, `a+1` |
//! | Gen8 | normal | one word-width read |
//! | Gen8 | recovery | two byte-width reads at `a`, `a+1` |

pub mod gen8;
pub mod legacy;

use crate::error::Result;
use crate::port::Transport;
use crate::probe::{DeviceProfile, Generation};
use crate::protocol::command::TouchDevice;

/// Information-page FWID address of legacy controllers.
pub const LEGACY_INFO_FWID_ADDR: u16 = 0x8080;

/// Information-page FWID address of Gen8 controllers.
pub const GEN8_INFO_FWID_ADDR: u32 = 0x40000;

impl<T: Transport> TouchDevice<T> {
    /// Read the on-chip information-page FWID for the detected profile.
    pub fn read_info_fwid(&mut self, profile: &DeviceProfile) -> Result<u16> {
        match profile.generation {
            Generation::Gen8 => self.gen8_read_info_fwid(profile.mode),
            Generation::Legacy => self.legacy_read_info_fwid(profile.mode),
        }
    }
}
