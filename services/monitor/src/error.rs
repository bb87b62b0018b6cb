//! Error types for the gpumon monitor service

use gpumon_codec::DecodeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No card found at index {index} ({found} card(s) present)")]
    NoCard { index: usize, found: usize },

    #[error("GPU IP discovery not supported at {path} (old kernel?)")]
    IpDiscoveryUnsupported { path: PathBuf },

    #[error("Short read from {path}: got {got} bytes")]
    ShortRead { path: PathBuf, got: usize },

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Replay source has no snapshots")]
    EmptyReplay,

    #[error("Invalid card pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Gave up after {count} consecutive failed polls")]
    TooManyFailures { count: u32 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MonitorError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Revision pair of an unknown-variant decode failure
    pub fn unknown_variant(&self) -> Option<(u8, u8)> {
        match self {
            Self::Decode(DecodeError::UnknownVariant(f, c)) => Some((*f, *c)),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, MonitorError>;
