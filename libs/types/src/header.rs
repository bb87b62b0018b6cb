//! Common Metrics Table Header
//!
//! Every `gpu_metrics` table revision starts with the same 4-byte header.
//! It carries the size the driver claims for the table plus the two-level
//! revision that selects the layout of everything after it.
//!
//! ```text
//! ┌──────────────────┬─────────────────┬──────────────────┬──────────────────┐
//! │ structure_size   │ format_revision │ content_revision │ revision payload │
//! │ u16 (bytes 0-1)  │ u8 (byte 2)     │ u8 (byte 3)      │ (variant layout) │
//! └──────────────────┴─────────────────┴──────────────────┴──────────────────┘
//! ```
//!
//! Multi-byte fields are in native byte order; producer and consumer share a
//! host.

use num_enum::TryFromPrimitive;
use zerocopy::{AsBytes, FromBytes, FromZeroes};

/// Metrics table header (4 bytes)
///
/// The size of this struct never changes across table revisions.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsBytes, FromBytes, FromZeroes)]
pub struct MetricsTableHeader {
    pub structure_size: u16,   // Size claimed by the driver (bytes 0-1)
    pub format_revision: u8,   // Layout family (byte 2)
    pub content_revision: u8,  // Revision within the family (byte 3)
}

impl MetricsTableHeader {
    /// Header size in bytes
    pub const SIZE: usize = 4;

    pub const fn new(structure_size: u16, format_revision: u8, content_revision: u8) -> Self {
        Self {
            structure_size,
            format_revision,
            content_revision,
        }
    }

    /// Size the producer declared for the whole table, header included
    pub fn declared_size(&self) -> u16 {
        self.structure_size
    }
}

/// Table families keyed by `format_revision`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive)]
#[repr(u8)]
pub enum TableFamily {
    /// Discrete GPU tables (`gpu_metrics_v1_x`)
    DiscreteGpu = 1,
    /// APU tables (`gpu_metrics_v2_x`)
    Apu = 2,
}

impl TableFamily {
    pub fn name(&self) -> &'static str {
        match self {
            TableFamily::DiscreteGpu => "discrete-GPU",
            TableFamily::Apu => "APU",
        }
    }

    /// `APU table revision 2.9`, or `table revision 9.9` for an unknown family
    pub fn describe_revision(format_revision: u8, content_revision: u8) -> String {
        match TableFamily::try_from(format_revision) {
            Ok(family) => format!("{} table revision {}.{}", family.name(), format_revision, content_revision),
            Err(_) => format!("table revision {}.{}", format_revision, content_revision),
        }
    }
}
