//! FWID resolution cascade.
//!
//! Three sources can answer "which firmware does this device want", in
//! strict priority order:
//!
//! 1. mapping table, keyed by the panel identity,
//! 2. on-chip information-page FWID,
//! 3. raw ROM word at the information-page address (legacy only).
//!
//! The mapping table wins whenever the panel is listed with a non-zero
//! FWID; a listed-but-zero field or an unlisted panel falls through to
//! the on-chip sources.

use crate::edid::PanelIdentity;
use crate::error::{Error, Result};
use crate::lcm::{LcmDeviceRecord, OsFamily, lookup_fwid};
use crate::port::Transport;
use crate::probe::{DeviceProfile, Generation, Mode};
use crate::protocol::command::TouchDevice;
use crate::retry::retry_probe;
use crate::rom::LEGACY_INFO_FWID_ADDR;
use log::{debug, info, warn};
use std::fmt;

/// Which source produced the resolved FWID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FwidSource {
    /// Panel mapping table.
    MappingTable,
    /// On-chip information page.
    InfoPage,
    /// Raw ROM word at the information-page address.
    RomFallback,
}

impl FwidSource {
    /// Get a human-readable name for the source.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MappingTable => "mapping table",
            Self::InfoPage => "information page",
            Self::RomFallback => "ROM fallback",
        }
    }
}

impl fmt::Display for FwidSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of one resolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Detected device profile.
    pub profile: DeviceProfile,
    /// Information-page FWID, when it could be read.
    pub info_fwid: Option<u16>,
    /// Source that produced [`Resolution::fwid`].
    pub source: FwidSource,
    /// The resolved firmware ID.
    pub fwid: u16,
}

/// Resolve the FWID for a connected device.
///
/// Probes and classifies the device, reads the information-page FWID, and
/// walks the source cascade. `mapping` carries the loaded table plus the
/// OS family selecting its column; without a panel identity or a table the
/// cascade starts at the information page.
pub fn resolve_fwid<T: Transport>(
    dev: &mut TouchDevice<T>,
    panel: Option<PanelIdentity>,
    mapping: Option<(&[LcmDeviceRecord], OsFamily)>,
) -> Result<Resolution> {
    let profile = dev.detect_profile()?;
    if profile.in_recovery() {
        info!("device is in recovery mode; firmware is not running");
    }

    let info_fwid = match retry_probe(dev.retry_count(), || dev.read_info_fwid(&profile)) {
        Ok(fwid) => Some(fwid),
        // Legacy parts predating the information page can still answer
        // through the raw-ROM fallback.
        Err(e) if profile.generation == Generation::Legacy => {
            warn!("information-page read failed: {e}");
            None
        },
        Err(e) => return Err(e),
    };

    if let (Some(panel), Some((records, os))) = (panel, mapping) {
        match lookup_fwid(records, &panel, os) {
            Ok(fwid) => {
                info!("FWID {fwid:#06x} from mapping table (panel {panel})");
                return Ok(Resolution {
                    profile,
                    info_fwid,
                    source: FwidSource::MappingTable,
                    fwid,
                });
            },
            Err(Error::DataNotFound) => {
                debug!("panel {panel} not in mapping table");
            },
            Err(e) => return Err(e),
        }
    }

    if let Some(fwid) = info_fwid {
        info!("FWID {fwid:#06x} from information page");
        return Ok(Resolution {
            profile,
            info_fwid,
            source: FwidSource::InfoPage,
            fwid,
        });
    }

    let fwid = match profile.mode {
        Mode::Normal => {
            let solution_id = dev.solution_id()?;
            dev.legacy_read_rom_word(LEGACY_INFO_FWID_ADDR, solution_id)?
        },
        Mode::Recovery => dev.legacy_read_bulk_rom_word(LEGACY_INFO_FWID_ADDR)?,
    };
    info!("FWID {fwid:#06x} from raw ROM fallback");
    Ok(Resolution {
        profile,
        info_fwid,
        source: FwidSource::RomFallback,
        fwid,
    })
}
