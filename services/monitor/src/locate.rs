//! Card discovery under the DRM sysfs class directory

use crate::error::{MonitorError, Result};
use gpumon_config::defaults;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds `cardN` directories below a DRM root
#[derive(Debug, Clone)]
pub struct CardLocator {
    drm_root: PathBuf,
}

impl CardLocator {
    pub fn new(drm_root: impl Into<PathBuf>) -> Self {
        Self {
            drm_root: drm_root.into(),
        }
    }

    pub fn drm_root(&self) -> &Path {
        &self.drm_root
    }

    /// Card directories matching `card[0-9]`, sorted by name
    ///
    /// Connector entries such as `card0-DP-1` do not match.
    pub fn cards(&self) -> Result<Vec<PathBuf>> {
        let root = glob::Pattern::escape(&self.drm_root.to_string_lossy());
        let pattern = format!("{}/card[0-9]", root);

        let mut cards: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(|entry| entry.ok()).collect();
        cards.sort();

        debug!("Found {} card(s) under {:?}", cards.len(), self.drm_root);
        Ok(cards)
    }

    /// The `index`-th card directory
    pub fn card(&self, index: usize) -> Result<PathBuf> {
        let mut cards = self.cards()?;
        let found = cards.len();
        if index >= found {
            return Err(MonitorError::NoCard { index, found });
        }
        Ok(cards.swap_remove(index))
    }

    /// `gpu_metrics` file of the `index`-th card
    pub fn metrics_path(&self, index: usize) -> Result<PathBuf> {
        Ok(self.card(index)?.join(defaults::source::METRICS_FILE))
    }
}
