//! # gpumon Types Library
//!
//! Pure data definitions for the AMDGPU `gpu_metrics` table.
//!
//! ## Design Philosophy
//!
//! - **Layouts as Data**: every table revision is a static [`SchemaVariant`]
//!   with an explicit field table; nothing is read through a struct overlay
//! - **Exact Revision Keys**: variants are selected by the exact
//!   `(format_revision, content_revision)` pair, never by range
//! - **Unit-Carrying Values**: raw integers travel with their declared
//!   [`Unit`], so per-field scaling differences cannot be lost
//! - **Append-Only**: supporting a new driver revision means adding one
//!   variant to the registry, never editing an existing one
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → libs/codec → services/monitor
//!     ↑            ↓               ↓
//! Field tables  Sniff/Decode   Read/Render
//! Units         Bounds checks  Poll loop
//! ```
//!
//! ## Quick Start
//! ```rust
//! use gpumon_types::{SchemaRegistry, Unit};
//!
//! let registry = SchemaRegistry::builtin();
//! let apu = registry.lookup(2, 2).expect("v2.2 is built in");
//! let cpu_power = apu.field("average_cpu_power").unwrap();
//! assert_eq!(cpu_power.unit, Unit::Milliwatts);
//! assert!(registry.lookup(9, 9).is_none());
//! ```

pub mod header;
pub mod schema;

pub use header::{MetricsTableHeader, TableFamily};
pub use schema::{
    field::{FieldShape, FieldSpec, NumericKind},
    registry::SchemaRegistry,
    unit::{FieldGroup, Scale, ScaledValue, Unit},
    variant::{RevisionKey, SchemaVariant},
};
pub use schema::{GPU_METRICS_V1_3, GPU_METRICS_V2_2, GPU_METRICS_V2_3};
