//! elanfwid CLI - Read the firmware ID of Elan I2C-HID touch controllers.
//!
//! ## Features
//!
//! - Hello-packet probe with mode and generation detection
//! - FWID resolution from mapping table, information page, or raw ROM
//! - Panel EDID identity lookup via `modetest`
//! - HID device enumeration and validation
//! - Quiet machine-readable output for scripting

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use console::style;
use elanfwid::{
    DeviceProfile, Error, HidDeviceDescriptor, HidRawTransport, LcmDeviceRecord, OsFamily,
    PanelIdentity, Resolution, TouchDevice, enumerate_hid_devices, find_elan_device,
    load_mapping_file, query_panel_identity, resolve_fwid, validate_device,
};
use env_logger::Env;
use log::{debug, warn};
use std::io::Write as _;
use std::path::PathBuf;

/// elanfwid - Read the firmware ID of Elan I2C-HID touch controllers.
///
/// Environment variables:
///   ELANFWID_PID   - Default target product ID (decimal)
#[derive(Parser)]
#[command(name = "elanfwid")]
#[command(author, version, about, long_about = None)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Target product ID, decimal (auto-detected if not specified).
    #[arg(short = 'p', long, env = "ELANFWID_PID")]
    pid: Option<u16>,

    /// Target product ID, hexadecimal (e.g. 2a03).
    #[arg(short = 'P', long, value_name = "HEX", conflicts_with = "pid")]
    pid_hex: Option<String>,

    /// Panel-to-FWID mapping file.
    #[arg(short = 'f', long, value_name = "PATH", requires = "system")]
    mapping_file: Option<PathBuf>,

    /// OS family selecting the mapping-file column.
    #[arg(short = 's', long, requires = "mapping_file")]
    system: Option<System>,

    /// Show enumerated HID devices.
    #[arg(short = 'i', long)]
    dev_info: bool,

    /// Emit device info as JSON (with --dev-info).
    #[arg(long, requires = "dev_info")]
    json: bool,

    /// Quiet mode: print only the FWID, in bare hex.
    #[arg(short, long)]
    quiet: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    debug: bool,
}

/// Target operating-system families.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum System {
    /// ChromeOS mapping column.
    Chrome,
    /// Windows mapping column.
    Windows,
}

impl From<System> for OsFamily {
    fn from(system: System) -> Self {
        match system {
            System::Chrome => OsFamily::Chrome,
            System::Windows => OsFamily::Windows,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.quiet {
        eprintln!(
            "{} v{}",
            style("elanfwid").cyan().bold(),
            env!("CARGO_PKG_VERSION")
        );
    }

    let target_pid = parse_target_pid(cli)?;

    let devices = enumerate_hid_devices().context("failed to enumerate HID devices")?;

    let mapping = cli
        .mapping_file
        .as_deref()
        .map(|path| {
            load_mapping_file(path)
                .with_context(|| format!("failed to load mapping file {}", path.display()))
        })
        .transpose()?;

    // The panel identity is optional input to the cascade; a panel without
    // a readable EDID still resolves through the on-chip sources.
    let panel = match query_panel_identity() {
        Ok(panel) => Some(panel),
        Err(Error::DataNotFound) => {
            debug!("no panel EDID identity available");
            None
        },
        Err(e) => {
            warn!("panel EDID query failed: {e}");
            None
        },
    };

    if cli.dev_info {
        print_dev_info(&devices, panel.as_ref(), mapping.as_deref(), cli.json)?;
    }

    let descriptor = match target_pid {
        Some(pid) => {
            let found = validate_device(&devices, pid);
            if !cli.quiet {
                print_validation(pid, found);
            }
            found.with_context(|| format!("no Elan I2C device matching PID {pid:#06x}"))?
        },
        None => find_elan_device(&devices).ok_or(Error::DeviceNotFound)?,
    };
    debug!("opening {descriptor}");

    let transport = HidRawTransport::open(descriptor.vendor_id, descriptor.product_id)
        .with_context(|| format!("failed to open {descriptor}"))?;
    let mut device = TouchDevice::new(transport);

    let os = cli.system.map(OsFamily::from);
    let mapping_arg = mapping.as_deref().zip(os);
    let resolution =
        resolve_fwid(&mut device, panel, mapping_arg).context("FWID resolution failed")?;

    if cli.quiet {
        // Bare hex, no trailing newline, for command substitution.
        print!("{:04x}", resolution.fwid);
        std::io::stdout().flush()?;
    } else {
        print_resolution(&resolution, os);
    }

    Ok(())
}

/// Resolve the target PID from the decimal or hex flag.
fn parse_target_pid(cli: &Cli) -> Result<Option<u16>> {
    if let Some(hex) = cli.pid_hex.as_deref() {
        let trimmed = hex.trim_start_matches("0x");
        let pid = u16::from_str_radix(trimmed, 16)
            .with_context(|| format!("invalid hex product ID {hex:?}"))?;
        return Ok(Some(pid));
    }
    Ok(cli.pid)
}

fn print_validation(pid: u16, found: Option<&HidDeviceDescriptor>) {
    match found {
        Some(d) => eprintln!(
            "  {} device {:04x}:{:04x} present ({})",
            style("✓").green(),
            d.vendor_id,
            d.product_id,
            d.bus
        ),
        None => eprintln!(
            "  {} no Elan I2C device matching PID {pid:#06x}",
            style("✗").red()
        ),
    }
}

fn print_dev_info(
    devices: &[HidDeviceDescriptor],
    panel: Option<&PanelIdentity>,
    mapping: Option<&[LcmDeviceRecord]>,
    json: bool,
) -> Result<()> {
    if json {
        let entries: Vec<serde_json::Value> = devices
            .iter()
            .map(|d| {
                serde_json::json!({
                    "bus": d.bus.name(),
                    "vid": format!("{:04x}", d.vendor_id),
                    "pid": format!("{:04x}", d.product_id),
                })
            })
            .collect();
        let output = serde_json::json!({
            "ok": true,
            "data": {
                "devices": entries,
                "panel": panel.map(elanfwid::PanelIdentity::key),
                "mapping": mapping,
            }
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    eprintln!("{}", style("HID devices:").bold().underlined());
    if devices.is_empty() {
        eprintln!("  {}", style("none found").dim());
    }
    for d in devices {
        eprintln!(
            "  {} {} {}",
            style("•").green(),
            style(format!("{:04x}:{:04x}", d.vendor_id, d.product_id)).cyan(),
            style(format!("[{}]", d.bus)).dim()
        );
    }

    if let Some(panel) = panel {
        eprintln!("{}: {}", style("Panel").bold(), style(panel.key()).cyan());
    }

    if let Some(records) = mapping {
        eprintln!("{}", style("Mapping records:").bold().underlined());
        for r in records {
            eprintln!(
                "  {} {} chrome={:04x} windows={:04x}",
                style("•").green(),
                style(&r.panel_info).cyan(),
                r.chrome_fwid,
                r.windows_fwid
            );
        }
    }

    Ok(())
}

fn print_resolution(resolution: &Resolution, os: Option<OsFamily>) {
    print_profile(&resolution.profile);

    if let Some(os) = os {
        eprintln!("  System: {}", os.name());
    }
    if let Some(info_fwid) = resolution.info_fwid {
        eprintln!("  Information-page FWID: {info_fwid:04x}");
    }
    println!(
        "FWID: {} (from {})",
        style(format!("{:04x}", resolution.fwid)).green().bold(),
        resolution.source
    );
}

fn print_profile(profile: &DeviceProfile) {
    if profile.in_recovery() {
        eprintln!(
            "  {} controller is in recovery mode; firmware is not running",
            style("!").yellow().bold()
        );
    }
    eprint!(
        "  Controller: {} generation, {} mode",
        profile.generation, profile.mode
    );
    match profile.boot_code_version {
        Some(bc) => eprintln!(", boot code {bc:04x}"),
        None => eprintln!(),
    }
}
