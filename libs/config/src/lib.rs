//! # gpumon Configuration
//!
//! Layered configuration for the monitor service.
//!
//! ## Features
//!
//! - **Defaults**: sysfs locations, poll interval, display and logging defaults
//! - **Layering**: built-in defaults → optional TOML file → `GPUMON__*` env vars
//! - **Validation**: zero intervals and malformed display field paths rejected
//!
//! ## Usage
//!
//! ```rust,no_run
//! use gpumon_config::MonitorConfig;
//! use std::path::Path;
//!
//! let config = MonitorConfig::load(Some(Path::new("gpumon.toml"))).unwrap();
//! println!("polling every {} ms", config.poll.interval_ms);
//! ```

pub mod defaults;
pub mod monitor_config;

// Re-export commonly used types
pub use monitor_config::{
    DisplayConfig, LoggingConfig, MonitorConfig, OutputFormat, PollConfig, SourceConfig,
};
