//! gpumon Monitor
//!
//! Polls an AMDGPU `gpu_metrics` table, decodes it with `gpumon-codec`, and
//! renders the selected fields to the terminal. Also enumerates IP blocks
//! from the driver's IP discovery table.

pub mod error;
pub mod ip_discovery;
pub mod locate;
pub mod poller;
pub mod render;
pub mod source;

pub use error::{MonitorError, Result};
pub use ip_discovery::{enumerate_ips, format_ips, IpBlock};
pub use locate::CardLocator;
pub use poller::{PollOutcome, PollStats, Poller, RunOptions};
pub use render::Renderer;
pub use source::{MetricsSource, ReplaySource, SysfsSource};
