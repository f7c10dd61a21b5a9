//! Panel EDID identity sourced from the external `modetest` query.
//!
//! The panel's manufacturer and product codes are the 4 hex digits each
//! that directly follow a known EDID header in the `modetest -a` output.
//! Besides the standard header, two vendor-specific headers (AUO, BOE)
//! observed in the field are accepted.

use crate::error::{Error, Result};
use log::debug;
use std::fmt;
use std::io::BufRead;
use std::process::Command;

/// Path of the DRM modetest command used for the EDID query.
pub const MODETEST_CMD: &str = "/usr/bin/modetest";

/// Standard EDID block header.
pub const STANDARD_EDID_HEADER: &str = "00ffffffffffff00";

/// AUO vendor-specific EDID header.
pub const AUO_EDID_HEADER: &str = "b36f0200b004ec04";

/// BOE vendor-specific EDID header.
pub const BOE_EDID_HEADER: &str = "ac700200b0040005";

const EDID_HEADERS: [&str; 3] = [STANDARD_EDID_HEADER, AUO_EDID_HEADER, BOE_EDID_HEADER];

/// Manufacturer/product code pair of the attached panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PanelIdentity {
    /// EDID manufacturer code.
    pub manufacturer_code: u16,
    /// EDID product code.
    pub product_code: u16,
}

impl PanelIdentity {
    /// Mapping-table key in `"mmmm.pppp"` form (lowercase hex, 4 digits
    /// each).
    pub fn key(&self) -> String {
        format!("{:04x}.{:04x}", self.manufacturer_code, self.product_code)
    }
}

impl fmt::Display for PanelIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

/// Query the panel identity via `modetest -a`.
///
/// Fails with [`Error::SystemCommand`] when the command cannot be invoked
/// and with [`Error::DataNotFound`] when no known EDID header appears in
/// its output.
pub fn query_panel_identity() -> Result<PanelIdentity> {
    let output = Command::new(MODETEST_CMD)
        .arg("-a")
        .output()
        .map_err(|e| Error::SystemCommand(format!("{MODETEST_CMD}: {e}")))?;

    parse_panel_identity(output.stdout.as_slice())
}

/// Scan EDID-query output for a known header and parse the codes after it.
pub fn parse_panel_identity(reader: impl BufRead) -> Result<PanelIdentity> {
    for line in reader.lines() {
        let line = line?;
        for header in EDID_HEADERS {
            if let Some(pos) = line.find(header) {
                debug!("EDID header {header:?} found");
                return parse_codes(&line[pos + header.len()..]);
            }
        }
    }

    debug!("no known EDID header in query output");
    Err(Error::DataNotFound)
}

/// Parse `mmmmpppp` immediately following an EDID header.
fn parse_codes(rest: &str) -> Result<PanelIdentity> {
    if rest.len() < 8 || !rest.is_char_boundary(4) || !rest.is_char_boundary(8) {
        return Err(Error::DataNotFound);
    }

    let manufacturer_code =
        u16::from_str_radix(&rest[..4], 16).map_err(|_| Error::DataNotFound)?;
    let product_code = u16::from_str_radix(&rest[4..8], 16).map_err(|_| Error::DataNotFound)?;

    let identity = PanelIdentity {
        manufacturer_code,
        product_code,
    };
    debug!("panel identity: {identity}");
    Ok(identity)
}
