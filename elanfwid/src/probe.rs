//! Hello-packet probe and device mode/generation classification.
//!
//! A single probe byte identifies the running code on the controller:
//!
//! | Hello packet | Mode | Generation |
//! |---|---|---|
//! | `0x21` | normal | Gen8 |
//! | `0x57` | recovery | Gen8 |
//! | `0x20` | normal | legacy, refined by boot-code version |
//! | `0x56` | recovery | legacy, refined by boot-code version |
//!
//! Two Gen8 chips (EKTH7315x1/x2) initially shipped boot code that still
//! reports the legacy hello value. For the legacy hello packets the high
//! byte of the boot-code version is compared against those first-boot-code
//! sentinels to tell the two generations apart; in recovery mode the
//! boot-code version arrives with the hello packet itself, in normal mode
//! it is fetched with a follow-up command.

use crate::error::{Error, Result};
use crate::port::Transport;
use crate::protocol::command::{CMD_HELLO, TouchDevice};
use crate::protocol::high_byte;
use crate::retry::retry_probe;
use byteorder::{BigEndian, ByteOrder};
use log::{debug, info};
use std::fmt;

/// Hello packet of a legacy controller running application firmware.
pub const HELLO_NORMAL: u8 = 0x20;

/// Hello packet of a legacy controller running boot code only.
pub const HELLO_RECOVERY: u8 = 0x56;

/// Hello packet of a Gen8 controller running application firmware.
pub const GEN8_HELLO_NORMAL: u8 = 0x21;

/// Hello packet of a Gen8 controller running boot code only.
pub const GEN8_HELLO_RECOVERY: u8 = 0x57;

/// Boot-code version high bytes of the first Gen8 boot-code builds
/// (EKTH7315x1/x2) that report the legacy hello packet.
pub const GEN8_FIRST_BOOT_CODE_HIGH: [u8; 2] = [0xA5, 0xA6];

/// Operating mode reported by the hello packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Application firmware is running.
    Normal,
    /// Boot code only; reduced command set.
    Recovery,
}

impl Mode {
    /// Get a human-readable name for the mode.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Recovery => "Recovery",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Controller hardware generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    /// Legacy touch series (eKTH3x/5x/6x class).
    Legacy,
    /// Gen8 touch series (EKTH7315x class).
    Gen8,
}

impl Generation {
    /// Get a human-readable name for the generation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Legacy => "Legacy",
            Self::Gen8 => "Gen8",
        }
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw outcome of one hello probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HelloResponse {
    /// The hello packet byte.
    pub packet: u8,
    /// Boot-code version, present only for recovery hello packets.
    pub recovery_bc_version: Option<u16>,
}

/// Classified device identity, immutable once obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// The raw hello packet the classification is based on.
    pub hello: u8,
    /// Operating mode.
    pub mode: Mode,
    /// Hardware generation.
    pub generation: Generation,
    /// Boot-code version, when one was read during classification.
    pub boot_code_version: Option<u16>,
}

impl DeviceProfile {
    /// Whether the controller runs boot code only.
    pub fn in_recovery(&self) -> bool {
        self.mode == Mode::Recovery
    }
}

/// Classify a boot-code version against the first-Gen8 sentinels.
fn generation_from_boot_code(bc_version: u16) -> Generation {
    if GEN8_FIRST_BOOT_CODE_HIGH.contains(&high_byte(bc_version)) {
        Generation::Gen8
    } else {
        Generation::Legacy
    }
}

impl<T: Transport> TouchDevice<T> {
    /// Issue one hello probe.
    ///
    /// Recovery-mode boot code appends its version to the hello frame;
    /// normal-mode firmware does not.
    pub fn hello(&mut self) -> Result<HelloResponse> {
        let data = self.exchange(&CMD_HELLO)?;
        let packet = *data
            .first()
            .ok_or_else(|| Error::Command("empty hello frame".to_string()))?;

        let recovery_bc_version = if packet == HELLO_RECOVERY || packet == GEN8_HELLO_RECOVERY {
            if data.len() < 4 {
                return Err(Error::Command(format!(
                    "short recovery hello frame: {} bytes",
                    data.len()
                )));
            }
            Some(BigEndian::read_u16(&data[2..4]))
        } else {
            None
        };

        debug!("hello packet: {packet:#04x}, bc: {recovery_bc_version:04x?}");
        Ok(HelloResponse {
            packet,
            recovery_bc_version,
        })
    }

    /// Probe the device and classify its mode and generation.
    ///
    /// The hello probe goes through the retry executor; an unrecognized
    /// hello packet is fatal.
    pub fn detect_profile(&mut self) -> Result<DeviceProfile> {
        let retry_count = self.retry_count();
        let hello = retry_probe(retry_count, || self.hello())?;

        let profile = match hello.packet {
            GEN8_HELLO_NORMAL => DeviceProfile {
                hello: hello.packet,
                mode: Mode::Normal,
                generation: Generation::Gen8,
                boot_code_version: None,
            },
            GEN8_HELLO_RECOVERY => DeviceProfile {
                hello: hello.packet,
                mode: Mode::Recovery,
                generation: Generation::Gen8,
                boot_code_version: hello.recovery_bc_version,
            },
            HELLO_NORMAL => {
                let bc_version = self.boot_code_version()?;
                DeviceProfile {
                    hello: hello.packet,
                    mode: Mode::Normal,
                    generation: generation_from_boot_code(bc_version),
                    boot_code_version: Some(bc_version),
                }
            },
            HELLO_RECOVERY => {
                let bc_version = hello.recovery_bc_version.ok_or_else(|| {
                    Error::Command("recovery hello without boot-code version".to_string())
                })?;
                DeviceProfile {
                    hello: hello.packet,
                    mode: Mode::Recovery,
                    generation: generation_from_boot_code(bc_version),
                    boot_code_version: Some(bc_version),
                }
            },
            other => return Err(Error::UnknownDeviceType(other)),
        };

        info!(
            "detected {} controller in {} mode (hello {:#04x})",
            profile.generation, profile.mode, profile.hello
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::mock::MockTransport;
    use crate::protocol::command::RESP_VERSION;

    fn device(mock: MockTransport) -> TouchDevice<MockTransport> {
        TouchDevice::new(mock)
    }

    #[test]
    fn test_gen8_normal_sentinel() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[GEN8_HELLO_NORMAL]);

        let profile = device(mock).detect_profile().unwrap();
        assert_eq!(profile.mode, Mode::Normal);
        assert_eq!(profile.generation, Generation::Gen8);
        assert_eq!(profile.boot_code_version, None);
    }

    #[test]
    fn test_gen8_recovery_sentinel() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[GEN8_HELLO_RECOVERY, 0x00, 0xB1, 0x02]);

        let profile = device(mock).detect_profile().unwrap();
        assert_eq!(profile.mode, Mode::Recovery);
        assert_eq!(profile.generation, Generation::Gen8);
        assert_eq!(profile.boot_code_version, Some(0xB102));
    }

    #[test]
    fn test_legacy_normal_stays_legacy_without_sentinel() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[HELLO_NORMAL]);
        // Boot-code version with a non-Gen8 high byte.
        mock.push_reply(&[RESP_VERSION, 0x60, 0x02]);

        let profile = device(mock).detect_profile().unwrap();
        assert_eq!(profile.mode, Mode::Normal);
        assert_eq!(profile.generation, Generation::Legacy);
        assert_eq!(profile.boot_code_version, Some(0x6002));
    }

    #[test]
    fn test_legacy_normal_refined_to_gen8() {
        for high in GEN8_FIRST_BOOT_CODE_HIGH {
            let mut mock = MockTransport::new();
            mock.push_reply(&[HELLO_NORMAL]);
            mock.push_reply(&[RESP_VERSION, high, 0x01]);

            let profile = device(mock).detect_profile().unwrap();
            assert_eq!(profile.mode, Mode::Normal);
            assert_eq!(profile.generation, Generation::Gen8);
        }
    }

    #[test]
    fn test_legacy_recovery_uses_hello_boot_code() {
        let mut mock = MockTransport::new();
        // Recovery hello carries the boot-code version in bytes 2..4.
        mock.push_reply(&[HELLO_RECOVERY, 0x00, 0x60, 0x02]);

        let mut dev = device(mock);
        let profile = dev.detect_profile().unwrap();
        assert_eq!(profile.mode, Mode::Recovery);
        assert_eq!(profile.generation, Generation::Legacy);
        assert_eq!(profile.boot_code_version, Some(0x6002));
        // No follow-up command after the hello exchange.
        assert_eq!(dev.transport().sent.len(), 1);
    }

    #[test]
    fn test_legacy_recovery_refined_to_gen8() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[HELLO_RECOVERY, 0x00, GEN8_FIRST_BOOT_CODE_HIGH[0], 0x33]);

        let profile = device(mock).detect_profile().unwrap();
        assert_eq!(profile.mode, Mode::Recovery);
        assert_eq!(profile.generation, Generation::Gen8);
    }

    #[test]
    fn test_unknown_hello_is_fatal() {
        let mut mock = MockTransport::new();
        mock.push_reply(&[0x42]);

        match device(mock).detect_profile() {
            Err(Error::UnknownDeviceType(0x42)) => {},
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_hello_probe_retries_transient_failures() {
        let mut mock = MockTransport::new();
        mock.push_error(Error::Command("noise".to_string()));
        mock.push_error(Error::Command("noise".to_string()));
        mock.push_reply(&[GEN8_HELLO_NORMAL]);

        let mut dev = device(mock);
        let profile = dev.detect_profile().unwrap();
        assert_eq!(profile.generation, Generation::Gen8);
        assert_eq!(dev.transport().sent.len(), 3);
    }

    #[test]
    fn test_hello_probe_timeout_not_retried() {
        let mut mock = MockTransport::new();
        mock.push_error(Error::Timeout("deadline".to_string()));

        let mut dev = device(mock);
        assert!(matches!(dev.detect_profile(), Err(Error::Timeout(_))));
        assert_eq!(dev.transport().sent.len(), 1);
    }
}
