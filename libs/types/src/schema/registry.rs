//! # Schema Registry - Known Metrics Table Revisions
//!
//! ## Purpose
//!
//! Single source of truth for which `(format_revision, content_revision)`
//! pairs this build understands. Lookup is an exact key match over an ordered,
//! append-only list; there is no "closest revision" fallback because distinct
//! revision pairs are distinct layouts.
//!
//! ## Adding a Revision
//!
//! Define a new static [`SchemaVariant`] next to its siblings and append it
//! to `BUILTIN_VARIANTS`. Existing entries are never edited.

use std::fmt::Write;

use super::apu::{GPU_METRICS_V2_2, GPU_METRICS_V2_3};
use super::field::FieldShape;
use super::v1_3::GPU_METRICS_V1_3;
use super::variant::{RevisionKey, SchemaVariant};

static BUILTIN_VARIANTS: &[&SchemaVariant] = &[&GPU_METRICS_V1_3, &GPU_METRICS_V2_2, &GPU_METRICS_V2_3];

/// Ordered set of schema variants
#[derive(Debug, Clone, Copy)]
pub struct SchemaRegistry {
    variants: &'static [&'static SchemaVariant],
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaRegistry {
    /// Registry over an explicit variant list
    pub const fn new(variants: &'static [&'static SchemaVariant]) -> Self {
        Self { variants }
    }

    /// The revisions shipped with this crate
    pub fn builtin() -> Self {
        Self::new(BUILTIN_VARIANTS)
    }

    pub fn variants(&self) -> &'static [&'static SchemaVariant] {
        self.variants
    }

    /// Exact-match lookup by revision pair
    pub fn lookup(&self, format_revision: u8, content_revision: u8) -> Option<&'static SchemaVariant> {
        self.lookup_key(RevisionKey::new(format_revision, content_revision))
    }

    pub fn lookup_key(&self, key: RevisionKey) -> Option<&'static SchemaVariant> {
        self.variants.iter().copied().find(|variant| variant.key == key)
    }

    /// Human-readable list of supported revisions, e.g. `1.3, 2.2, 2.3`
    pub fn supported_revisions(&self) -> String {
        self.variants
            .iter()
            .map(|variant| variant.key.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Markdown documentation of every variant's field table
    pub fn generate_markdown_table(&self) -> String {
        let mut out = String::new();
        out.push_str("# Supported gpu_metrics revisions\n\n");
        out.push_str("| Revision | Struct | Description | Size |\n");
        out.push_str("|----------|--------|-------------|------|\n");
        for variant in self.variants {
            let _ = writeln!(
                out,
                "| {} | `{}` | {} | {} bytes |",
                variant.key, variant.name, variant.description, variant.byte_size
            );
        }

        for variant in self.variants {
            let _ = writeln!(out, "\n## {} (revision {})\n", variant.name, variant.key);
            out.push_str("| Field | Offset | Type | Unit | Group |\n");
            out.push_str("|-------|--------|------|------|-------|\n");
            for field in variant.fields {
                let ty = match field.shape {
                    FieldShape::Scalar => field.kind.name().to_string(),
                    FieldShape::Array(len) => format!("{}[{}]", field.kind.name(), len),
                };
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} | {} | {} |",
                    field.name,
                    field.offset,
                    ty,
                    field.unit.raw_symbol(),
                    field.group.name()
                );
            }
        }
        out
    }
}
