//! Panel-to-FWID mapping table.
//!
//! The mapping file is plain text, one record per line:
//!
//! ```text
//! panel_info,chrome_fwid_hex,windows_fwid_hex
//! ```
//!
//! `panel_info` is the panel identity key (`mmmm.pppp`); the two FWID
//! fields are hex. Parsing is tolerant: missing or malformed fields read
//! as zero, and zero means "no FWID assigned for that OS family".

use crate::edid::PanelIdentity;
use crate::error::{Error, Result};
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One mapping-table record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LcmDeviceRecord {
    /// Panel identity key, lowercase `mmmm.pppp`.
    pub panel_info: String,
    /// FWID assigned for ChromeOS, zero when unassigned.
    pub chrome_fwid: u16,
    /// FWID assigned for Windows, zero when unassigned.
    pub windows_fwid: u16,
}

/// Target operating-system family selecting the mapping column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    /// ChromeOS column.
    Chrome,
    /// Windows column.
    Windows,
}

impl OsFamily {
    /// Get a human-readable name for the OS family.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Windows => "windows",
        }
    }
}

/// Parse a mapping table from a reader.
///
/// Lines without a panel key are skipped; unparseable FWID fields read as
/// zero rather than failing the whole file.
pub fn parse_mapping(reader: impl BufRead) -> Result<Vec<LcmDeviceRecord>> {
    let mut records = Vec::new();

    for line in reader.lines() {
        let line = line?;
        let mut tokens = line.split(',');

        let panel_info = tokens.next().unwrap_or("").trim().to_lowercase();
        if panel_info.is_empty() {
            continue;
        }

        let chrome_fwid = parse_fwid_field(tokens.next());
        let windows_fwid = parse_fwid_field(tokens.next());
        if tokens.next().is_some() {
            debug!("extra fields ignored in mapping line {line:?}");
        }

        records.push(LcmDeviceRecord {
            panel_info,
            chrome_fwid,
            windows_fwid,
        });
    }

    debug!("loaded {} mapping records", records.len());
    Ok(records)
}

fn parse_fwid_field(token: Option<&str>) -> u16 {
    token
        .map(str::trim)
        .and_then(|t| u16::from_str_radix(t, 16).ok())
        .unwrap_or(0)
}

/// Load a mapping table from a file.
pub fn load_mapping_file(path: &Path) -> Result<Vec<LcmDeviceRecord>> {
    let file =
        File::open(path).map_err(|e| Error::FileNotFound(format!("{}: {e}", path.display())))?;
    parse_mapping(BufReader::new(file))
}

/// Look up the FWID for a panel and OS family.
///
/// A missing panel or a zero FWID field both yield [`Error::DataNotFound`].
pub fn lookup_fwid(
    records: &[LcmDeviceRecord],
    panel: &PanelIdentity,
    os: OsFamily,
) -> Result<u16> {
    let key = panel.key();
    let record = records
        .iter()
        .find(|r| r.panel_info == key)
        .ok_or(Error::DataNotFound)?;

    let fwid = match os {
        OsFamily::Chrome => record.chrome_fwid,
        OsFamily::Windows => record.windows_fwid,
    };
    if fwid == 0 {
        return Err(Error::DataNotFound);
    }

    debug!("panel {key} maps to FWID {fwid:#06x} for {}", os.name());
    Ok(fwid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn panel(manufacturer_code: u16, product_code: u16) -> PanelIdentity {
        PanelIdentity {
            manufacturer_code,
            product_code,
        }
    }

    #[test]
    fn test_parse_full_record() {
        let records = parse_mapping(b"04f3.0c01,2a10,2a11\n" as &[u8]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].panel_info, "04f3.0c01");
        assert_eq!(records[0].chrome_fwid, 0x2A10);
        assert_eq!(records[0].windows_fwid, 0x2A11);
    }

    #[test]
    fn test_missing_chrome_field_reads_as_zero() {
        let records = parse_mapping(b"04f3.0201,,1a2b\n" as &[u8]).unwrap();
        assert_eq!(records[0].chrome_fwid, 0);
        assert_eq!(records[0].windows_fwid, 0x1A2B);

        let p = panel(0x04F3, 0x0201);
        assert_eq!(lookup_fwid(&records, &p, OsFamily::Windows).unwrap(), 0x1A2B);
        assert!(matches!(
            lookup_fwid(&records, &p, OsFamily::Chrome),
            Err(Error::DataNotFound)
        ));
    }

    #[test]
    fn test_panel_key_is_case_normalized() {
        let records = parse_mapping(b"04F3.0C01,2a10,2a11\n" as &[u8]).unwrap();
        let p = panel(0x04F3, 0x0C01);
        assert_eq!(lookup_fwid(&records, &p, OsFamily::Chrome).unwrap(), 0x2A10);
    }

    #[test]
    fn test_blank_and_malformed_lines_skipped() {
        let input = b"\n,1234,5678\n04f3.0c01,not-hex,2a11\n" as &[u8];
        let records = parse_mapping(input).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].chrome_fwid, 0);
        assert_eq!(records[0].windows_fwid, 0x2A11);
    }

    #[test]
    fn test_unknown_panel_is_data_not_found() {
        let records = parse_mapping(b"04f3.0c01,2a10,2a11\n" as &[u8]).unwrap();
        assert!(matches!(
            lookup_fwid(&records, &panel(0x30E4, 0x1204), OsFamily::Chrome),
            Err(Error::DataNotFound)
        ));
    }

    #[test]
    fn test_load_mapping_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "04f3.0c01,2a10,2a11").unwrap();

        let records = load_mapping_file(file.path()).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_file_not_found() {
        assert!(matches!(
            load_mapping_file(Path::new("/nonexistent/mapping.txt")),
            Err(Error::FileNotFound(_))
        ));
    }
}
