//! IP block enumeration from the driver's IP discovery table
//!
//! Layout below a card directory:
//!
//! ```text
//! device/ip_discovery/die/0/
//!     GC -> 11/            (named symlink per IP block)
//!     11/0/major           (one directory per instance)
//!     11/0/minor
//!     11/0/revision
//!     11/0/base_addr       (one address per line)
//! ```

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{MonitorError, Result};
use gpumon_config::defaults;

/// One base address of one IP block instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IpBlock {
    pub name: String,
    /// `major.minor.revision`
    pub version: String,
    pub base_addr: String,
}

/// Enumerate IP blocks of a card, sorted by base address
///
/// With `unique`, only the first record per (name, version) is kept.
pub fn enumerate_ips(card_dir: &Path, unique: bool) -> Result<Vec<IpBlock>> {
    let die_dir = card_dir.join(defaults::source::IP_DISCOVERY_DIE);
    let die_root = die_dir.parent().map(Path::to_path_buf).unwrap_or_else(|| die_dir.clone());
    if !die_root.exists() {
        return Err(MonitorError::IpDiscoveryUnsupported { path: die_root });
    }

    let mut ips: Vec<IpBlock> = Vec::new();
    for (name, ip_path) in ip_links(&die_dir)? {
        for instance in subdirectories(&ip_path)? {
            let version = format!(
                "{}.{}.{}",
                first_line(&instance.join("major"))?,
                first_line(&instance.join("minor"))?,
                first_line(&instance.join("revision"))?
            );

            let base_addrs = read_file(&instance.join("base_addr"))?;
            for base_addr in base_addrs.lines().map(str::trim).filter(|l| !l.is_empty()) {
                let duplicate = ips.iter().any(|ip| ip.name == name && ip.version == version);
                if unique && duplicate {
                    continue;
                }
                ips.push(IpBlock {
                    name: name.clone(),
                    version: version.clone(),
                    base_addr: base_addr.to_string(),
                });
            }
        }
    }

    ips.sort_by(|a, b| a.base_addr.cmp(&b.base_addr));
    debug!("Enumerated {} IP record(s) under {:?}", ips.len(), die_dir);
    Ok(ips)
}

/// One line per record: name right-aligned, version left-aligned
pub fn format_ips(ips: &[IpBlock]) -> String {
    let name_width = ips.iter().map(|ip| ip.name.len()).max().unwrap_or(0);
    let version_width = ips.iter().map(|ip| ip.version.len()).max().unwrap_or(0);

    ips.iter()
        .map(|ip| {
            format!(
                "{:>nw$} {:<vw$} {}\n",
                ip.name,
                ip.version,
                ip.base_addr,
                nw = name_width,
                vw = version_width
            )
        })
        .collect()
}

/// Named symlinks in the die directory, sorted by name
fn ip_links(die_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let entries = fs::read_dir(die_dir).map_err(|e| MonitorError::io(die_dir, e))?;

    let mut links = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MonitorError::io(die_dir, e))?;
        let file_type = entry.file_type().map_err(|e| MonitorError::io(entry.path(), e))?;
        if file_type.is_symlink() && entry.path().is_dir() {
            links.push((entry.file_name().to_string_lossy().into_owned(), entry.path()));
        }
    }
    links.sort();
    Ok(links)
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| MonitorError::io(dir, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| MonitorError::io(dir, e))?;
        if entry.path().is_dir() {
            dirs.push(entry.path());
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MonitorError::io(path, e))
}

fn first_line(path: &Path) -> Result<String> {
    Ok(read_file(path)?.lines().next().unwrap_or("").trim().to_string())
}
