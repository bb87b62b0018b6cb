//! Decoded Samples - typed views over validated metrics tables
//!
//! A [`DecodedSample`] borrows the caller's buffer, already cut to exactly
//! the matched variant's `byte_size`. Nothing is converted up front; each
//! accessor resolves the field through the variant's field table and reads
//! the bytes on demand.
//!
//! Field lookups that name something the variant does not have return `None`
//! instead of an error. Asking a v1.3 sample for `temperature_core` is a
//! normal thing for a caller to do, and it never reads neighbouring bytes.

use crate::bounds::read_scalar;
use crate::error::{DecodeError, DecodeResult};
use crate::path::FieldPath;
use gpumon_types::{FieldSpec, MetricsTableHeader, RevisionKey, ScaledValue, SchemaVariant};

/// Value of a whole field: one element or all elements of an array
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Scalar(ScaledValue),
    Array(Vec<ScaledValue>),
}

impl FieldValue {
    /// Elements in table order; a scalar yields one
    pub fn elements(&self) -> &[ScaledValue] {
        match self {
            FieldValue::Scalar(value) => std::slice::from_ref(value),
            FieldValue::Array(values) => values,
        }
    }
}

/// Borrowed, validated view of one metrics table
#[derive(Debug, Clone, Copy)]
pub struct DecodedSample<'a> {
    variant: &'static SchemaVariant,
    header: MetricsTableHeader,
    bytes: &'a [u8],
}

impl<'a> DecodedSample<'a> {
    /// `bytes` must already be exactly `variant.byte_size` long
    pub(crate) fn new(variant: &'static SchemaVariant, header: MetricsTableHeader, bytes: &'a [u8]) -> Self {
        debug_assert_eq!(bytes.len(), variant.byte_size);
        Self {
            variant,
            header,
            bytes,
        }
    }

    pub fn variant(&self) -> &'static SchemaVariant {
        self.variant
    }

    pub fn key(&self) -> RevisionKey {
        self.variant.key
    }

    pub fn header(&self) -> MetricsTableHeader {
        self.header
    }

    /// `structure_size` as claimed by the producer
    pub fn declared_size(&self) -> u16 {
        self.header.declared_size()
    }

    /// Whether the producer's declared size agrees with the matched layout
    ///
    /// Diagnostic only; decoding never depends on it.
    pub fn declared_size_matches(&self) -> bool {
        usize::from(self.header.declared_size()) == self.variant.byte_size
    }

    /// The table bytes, exactly `byte_size` long
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// Scalar field by plain name
    ///
    /// `None` when the variant has no field called `name` or the field is an
    /// array. `name` is never parsed as a path; indexed access goes through
    /// [`DecodedSample::element`] or [`DecodedSample::query`], which report a
    /// bad index.
    pub fn get(&self, name: &str) -> Option<ScaledValue> {
        let spec = self.variant.field(name)?;
        if spec.is_array() {
            return None;
        }
        self.read(spec, 0)
    }

    /// Element `index` of a field
    ///
    /// `Ok(None)` when the variant has no such field. An index past the
    /// field's declared length is an error, never clamped. A scalar field
    /// behaves as a one-element array.
    pub fn element(&self, name: &str, index: usize) -> DecodeResult<Option<ScaledValue>> {
        let Some(spec) = self.variant.field(name) else {
            return Ok(None);
        };
        if index >= spec.len() {
            return Err(DecodeError::index_out_of_range(name, index, spec.len()));
        }
        Ok(self.read(spec, index))
    }

    /// Every element of a field
    pub fn array(&self, name: &str) -> Option<Vec<ScaledValue>> {
        let spec = self.variant.field(name)?;
        (0..spec.len()).map(|index| self.read(spec, index)).collect()
    }

    /// Whole field value, scalar or array
    pub fn value(&self, name: &str) -> Option<FieldValue> {
        let spec = self.variant.field(name)?;
        self.read_value(spec)
    }

    /// Resolve a `name` or `name[index]` path
    ///
    /// A bare array name is rejected because it does not identify one value.
    pub fn query(&self, path: &str) -> DecodeResult<Option<ScaledValue>> {
        let parsed = FieldPath::parse(path)?;
        match parsed.index {
            Some(index) => self.element(&parsed.name, index),
            None => match self.variant.field(&parsed.name) {
                None => Ok(None),
                Some(spec) if spec.is_array() => Err(DecodeError::invalid_field_path(
                    path,
                    format!("{} is an array of {}; add an index", spec.name, spec.len()),
                )),
                Some(spec) => Ok(self.read(spec, 0)),
            },
        }
    }

    /// All fields of the variant in table order
    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, FieldValue)> + '_ {
        self.variant
            .fields
            .iter()
            .filter_map(move |spec| self.read_value(spec).map(|value| (spec, value)))
    }

    /// Copy the table bytes out so the sample can outlive the buffer
    pub fn to_owned_sample(&self) -> OwnedSample {
        OwnedSample {
            variant: self.variant,
            header: self.header,
            bytes: self.bytes.to_vec(),
        }
    }

    fn read(&self, spec: &FieldSpec, index: usize) -> Option<ScaledValue> {
        let offset = spec.element_offset(index)?;
        read_scalar(self.bytes, offset, spec.kind)
            .ok()
            .map(|raw| ScaledValue::new(raw, spec.unit))
    }

    fn read_value(&self, spec: &FieldSpec) -> Option<FieldValue> {
        if spec.is_array() {
            let values = (0..spec.len())
                .map(|index| self.read(spec, index))
                .collect::<Option<Vec<_>>>()?;
            Some(FieldValue::Array(values))
        } else {
            self.read(spec, 0).map(FieldValue::Scalar)
        }
    }
}

/// Decoded sample that owns a copy of its table bytes
///
/// Retained across polls as the last good sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedSample {
    variant: &'static SchemaVariant,
    header: MetricsTableHeader,
    bytes: Vec<u8>,
}

impl OwnedSample {
    /// Borrowed view with the full accessor set
    pub fn as_sample(&self) -> DecodedSample<'_> {
        DecodedSample::new(self.variant, self.header, &self.bytes)
    }

    pub fn variant(&self) -> &'static SchemaVariant {
        self.variant
    }

    pub fn header(&self) -> MetricsTableHeader {
        self.header
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn get(&self, name: &str) -> Option<ScaledValue> {
        self.as_sample().get(name)
    }

    pub fn element(&self, name: &str, index: usize) -> DecodeResult<Option<ScaledValue>> {
        self.as_sample().element(name, index)
    }
}
