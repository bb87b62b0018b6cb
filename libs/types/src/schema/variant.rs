//! Schema Variants
//!
//! One [`SchemaVariant`] per `(format_revision, content_revision)` pair. A
//! variant is immutable static data: its declared byte size and its field
//! table.

use std::fmt;

use super::field::FieldSpec;

/// `(format_revision, content_revision)` pair identifying a table layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RevisionKey {
    pub format_revision: u8,
    pub content_revision: u8,
}

impl RevisionKey {
    pub const fn new(format_revision: u8, content_revision: u8) -> Self {
        Self {
            format_revision,
            content_revision,
        }
    }
}

impl fmt::Display for RevisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.format_revision, self.content_revision)
    }
}

/// Immutable description of one metrics table layout
#[derive(Debug)]
pub struct SchemaVariant {
    pub key: RevisionKey,
    /// Driver struct name, e.g. `gpu_metrics_v2_2`
    pub name: &'static str,
    pub description: &'static str,
    /// Size of the whole table including the common header
    pub byte_size: usize,
    pub fields: &'static [FieldSpec],
    /// Fields rendered when the user selects none
    pub default_display: &'static [&'static str],
}

impl SchemaVariant {
    pub fn format_revision(&self) -> u8 {
        self.key.format_revision
    }

    pub fn content_revision(&self) -> u8 {
        self.key.content_revision
    }

    /// Look up a field by exact name
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.description)
    }
}

impl PartialEq for SchemaVariant {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for SchemaVariant {}
