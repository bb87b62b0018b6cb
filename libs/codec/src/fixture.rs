//! Table Fixture Builder
//!
//! Synthesizes metrics table buffers for a given variant, writing raw values
//! through the same field table the decoder reads with. Used by tests,
//! benches and the monitor's replay input.
//!
//! ```rust
//! use gpumon_codec::{decode, TableFixture};
//! use gpumon_types::GPU_METRICS_V2_2;
//!
//! let buffer = TableFixture::new(&GPU_METRICS_V2_2)
//!     .set("average_socket_power", 150)
//!     .set("average_cpu_power", 45000)
//!     .build()
//!     .unwrap();
//!
//! let sample = decode(&buffer).unwrap();
//! assert_eq!(sample.get("average_cpu_power").unwrap().value(), 45.0);
//! ```

use thiserror::Error;

use crate::bounds::write_scalar;
use crate::error::DecodeError;
use gpumon_types::{MetricsTableHeader, SchemaVariant};
use zerocopy::AsBytes;

/// Errors raised while building a fixture
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FixtureError {
    #[error("{variant} has no field {field}")]
    UnknownField { variant: &'static str, field: String },

    #[error("Value {value} does not fit field {field} (max {max})")]
    ValueOutOfRange { field: String, value: u64, max: u64 },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Builder for a well-formed metrics table of one variant
#[derive(Debug, Clone)]
pub struct TableFixture {
    variant: &'static SchemaVariant,
    header: MetricsTableHeader,
    bytes: Vec<u8>,
    truncate_to: Option<usize>,
    error: Option<FixtureError>,
}

impl TableFixture {
    /// Zero-filled table with a header naming `variant` and its exact size
    pub fn new(variant: &'static SchemaVariant) -> Self {
        let header = MetricsTableHeader::new(
            u16::try_from(variant.byte_size).unwrap_or(u16::MAX),
            variant.format_revision(),
            variant.content_revision(),
        );
        Self {
            variant,
            header,
            bytes: vec![0u8; variant.byte_size],
            truncate_to: None,
            error: None,
        }
    }

    /// Set a scalar field (or element 0 of an array field)
    pub fn set(self, field: &str, raw: u64) -> Self {
        self.set_element(field, 0, raw)
    }

    /// Set element `index` of a field
    pub fn set_element(mut self, field: &str, index: usize, raw: u64) -> Self {
        if self.error.is_none() {
            if let Err(error) = self.write(field, index, raw) {
                self.error = Some(error);
            }
        }
        self
    }

    /// Override the `structure_size` written into the header
    pub fn with_declared_size(mut self, declared_size: u16) -> Self {
        self.header.structure_size = declared_size;
        self
    }

    /// Override the revision pair written into the header
    pub fn with_revision(mut self, format_revision: u8, content_revision: u8) -> Self {
        self.header.format_revision = format_revision;
        self.header.content_revision = content_revision;
        self
    }

    /// Cut the finished buffer to `len` bytes
    pub fn truncated(mut self, len: usize) -> Self {
        self.truncate_to = Some(len);
        self
    }

    /// Append `extra` trailing bytes past the table
    pub fn padded(mut self, extra: usize) -> Self {
        self.bytes.resize(self.bytes.len() + extra, 0);
        self
    }

    pub fn build(self) -> Result<Vec<u8>, FixtureError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let mut bytes = self.bytes;
        bytes[..MetricsTableHeader::SIZE].copy_from_slice(self.header.as_bytes());
        if let Some(len) = self.truncate_to {
            bytes.truncate(len);
        }
        Ok(bytes)
    }

    fn write(&mut self, field: &str, index: usize, raw: u64) -> Result<(), FixtureError> {
        let spec = self.variant.field(field).ok_or_else(|| FixtureError::UnknownField {
            variant: self.variant.name,
            field: field.to_string(),
        })?;
        let offset = spec
            .element_offset(index)
            .ok_or_else(|| DecodeError::index_out_of_range(field, index, spec.len()))?;
        if raw > spec.kind.max_value() {
            return Err(FixtureError::ValueOutOfRange {
                field: field.to_string(),
                value: raw,
                max: spec.kind.max_value(),
            });
        }
        write_scalar(&mut self.bytes, offset, spec.kind, raw)?;
        Ok(())
    }
}
