//! Metrics sources
//!
//! A source hands the poller one complete snapshot of the metrics table per
//! call. The driver regenerates `gpu_metrics` on every read, so the sysfs
//! source always reads the whole file from the start.

use crate::error::{MonitorError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Producer of raw metrics table snapshots
pub trait MetricsSource {
    /// Read one snapshot
    fn read_snapshot(&mut self) -> Result<Vec<u8>>;

    /// Human-readable origin for logs
    fn describe(&self) -> String;
}

/// Reads `gpu_metrics` from sysfs
#[derive(Debug, Clone)]
pub struct SysfsSource {
    path: PathBuf,
}

impl SysfsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MetricsSource for SysfsSource {
    fn read_snapshot(&mut self) -> Result<Vec<u8>> {
        let bytes = fs::read(&self.path).map_err(|e| MonitorError::io(&self.path, e))?;
        if bytes.is_empty() {
            return Err(MonitorError::ShortRead {
                path: self.path.clone(),
                got: 0,
            });
        }
        Ok(bytes)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Cycles through recorded snapshots
#[derive(Debug, Clone)]
pub struct ReplaySource {
    snapshots: Vec<Vec<u8>>,
    next: usize,
}

impl ReplaySource {
    pub fn new(snapshots: Vec<Vec<u8>>) -> Result<Self> {
        if snapshots.is_empty() {
            return Err(MonitorError::EmptyReplay);
        }
        Ok(Self { snapshots, next: 0 })
    }

    /// One snapshot per file, replayed in the given order
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let snapshots = paths
            .iter()
            .map(|path| fs::read(path).map_err(|e| MonitorError::io(path.as_ref(), e)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(snapshots)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl MetricsSource for ReplaySource {
    fn read_snapshot(&mut self) -> Result<Vec<u8>> {
        let snapshot = self.snapshots[self.next % self.snapshots.len()].clone();
        self.next = (self.next + 1) % self.snapshots.len();
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("replay of {} snapshot(s)", self.snapshots.len())
    }
}
