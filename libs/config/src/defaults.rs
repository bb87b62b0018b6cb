//! Monitor defaults
//!
//! Default values shared by the configuration loader and the CLI so both
//! agree on what an unset option means.

/// Card discovery defaults
pub mod source {
    /// DRM class directory in sysfs
    pub const DRM_ROOT: &str = "/sys/class/drm";

    /// First card found under the DRM root
    pub const CARD_INDEX: usize = 0;

    /// Metrics file relative to a card directory
    pub const METRICS_FILE: &str = "device/gpu_metrics";

    /// IP discovery die directory relative to a card directory
    pub const IP_DISCOVERY_DIE: &str = "device/ip_discovery/die/0";
}

/// Poll loop defaults
pub mod poll {
    /// Delay between reads (milliseconds)
    pub const INTERVAL_MS: u64 = 500;

    // No failure limit by default: the loop keeps retrying until interrupted
}

/// Display defaults
pub mod display {
    /// Home cursor and clear screen before each frame
    pub const CLEAR_SEQUENCE: &str = "\x1b[1;1H\x1b[2J";
}

/// Logging defaults
pub mod logging {
    pub const LEVEL: &str = "info";

    /// Env var consulted before the configured level
    pub const FILTER_ENV: &str = "RUST_LOG";
}

/// Prefix for environment overrides (`GPUMON__POLL__INTERVAL_MS=250`)
pub const ENV_PREFIX: &str = "GPUMON";

/// Separator between nested keys in environment overrides
pub const ENV_SEPARATOR: &str = "__";
