//! Monitor Configuration Module
//!
//! Loads the monitor configuration from built-in defaults, an optional TOML
//! file and `GPUMON__*` environment variables, in that order of precedence.
//!
//! Loading happens before the tracing subscriber exists, since the logging
//! section decides how it is built. The loader therefore stays silent and the
//! caller reports the result through [`MonitorConfig::log_loaded`] once
//! logging is up.

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File, Map};
use gpumon_codec::FieldPath;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

use crate::defaults;

/// Main monitor configuration structure
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct MonitorConfig {
    /// Where metrics tables come from
    pub source: SourceConfig,

    /// Poll loop timing and failure policy
    pub poll: PollConfig,

    /// What gets printed per sample
    pub display: DisplayConfig,

    pub logging: LoggingConfig,
}

/// Card selection
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SourceConfig {
    pub drm_root: PathBuf,
    pub card_index: usize,

    /// Explicit metrics file; derived from the card when unset
    pub metrics_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PollConfig {
    pub interval_ms: u64,

    /// Stop after this many failed polls in a row; retry forever when unset
    pub max_consecutive_failures: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    pub clear_screen: bool,

    /// Field paths to print; empty means the variant's default set
    pub fields: Vec<String>,

    pub format: OutputFormat,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub level: String,

    /// Emit log lines as JSON
    pub json: bool,
}

/// Frame format written to stdout
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            drm_root: PathBuf::from(defaults::source::DRM_ROOT),
            card_index: defaults::source::CARD_INDEX,
            metrics_path: None,
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_ms: defaults::poll::INTERVAL_MS,
            max_consecutive_failures: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            fields: Vec::new(),
            format: OutputFormat::Text,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::logging::LEVEL.to_string(),
            json: false,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl MonitorConfig {
    /// Load configuration with process environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, taking overrides from `env` instead of the process
    /// environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        // Override with environment variables (GPUMON__SECTION__KEY)
        builder = builder.add_source(
            Environment::with_prefix(defaults::ENV_PREFIX)
                .separator(defaults::ENV_SEPARATOR)
                .try_parsing(true)
                .source(env),
        );

        let config = builder.build().context("Failed to build configuration")?;

        let mut config: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        config.expand_env_vars()?;
        config.validate()?;
        Ok(config)
    }

    /// Report where the configuration came from and what it selects
    pub fn log_loaded(&self, path: Option<&Path>) {
        match path {
            Some(path) => info!("Loaded monitor config from {:?}: {}", path, self.summary()),
            None => info!("Using default monitor config: {}", self.summary()),
        }
        debug!(config = ?self, "Monitor configuration");
    }

    /// One-line description of the effective settings
    pub fn summary(&self) -> String {
        let source = match &self.source.metrics_path {
            Some(path) => path.display().to_string(),
            None => format!(
                "card{} under {}",
                self.source.card_index,
                self.source.drm_root.display()
            ),
        };
        let fields = if self.display.fields.is_empty() {
            "default fields".to_string()
        } else {
            self.display.fields.join(", ")
        };
        format!(
            "{} every {} ms, {} output, {}",
            source, self.poll.interval_ms, self.display.format, fields
        )
    }

    /// Expand `~` and `$VAR` in path values
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.source.drm_root =
            expand_path(&self.source.drm_root).context("Failed to expand drm_root")?;

        if let Some(path) = &self.source.metrics_path {
            self.source.metrics_path =
                Some(expand_path(path).context("Failed to expand metrics_path")?);
        }

        Ok(())
    }

    /// Reject settings the monitor cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.poll.interval_ms == 0 {
            bail!("poll.interval_ms must be greater than zero");
        }

        if self.poll.max_consecutive_failures == Some(0) {
            bail!("poll.max_consecutive_failures must be at least 1 when set");
        }

        if self.source.drm_root.as_os_str().is_empty() && self.source.metrics_path.is_none() {
            bail!("either source.drm_root or source.metrics_path must be set");
        }

        for field in &self.display.fields {
            FieldPath::parse(field)
                .with_context(|| format!("Invalid display field '{}'", field))?;
        }

        Ok(())
    }

    /// Effective configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

fn expand_path(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)?;
    Ok(PathBuf::from(expanded.as_ref()))
}
