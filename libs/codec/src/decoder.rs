//! # Versioned Record Decoder
//!
//! ## Purpose
//!
//! Turns an opaque `gpu_metrics` buffer into a [`DecodedSample`]: sniff the
//! common header, select the layout registered for the exact
//! `(format_revision, content_revision)` pair, check the buffer covers that
//! layout, and bind the two together.
//!
//! ## Decode Steps
//!
//! ```text
//! bytes ──► sniff ──► registry lookup ──► length check ──► DecodedSample
//!            │              │                  │
//!         TooShort   UnknownVariant(f, c)  BufferTooSmall
//! ```
//!
//! ## Performance Profile
//!
//! - **Cost**: O(1) in the buffer size; one 4-byte copy for the header and a
//!   scan of at most a handful of registry entries
//! - **Allocation**: none; the sample borrows the caller's buffer
//! - **Thread Safety**: pure function over immutable static tables, safe to
//!   call from any number of threads at once
//!
//! Trailing bytes past the matched layout are ignored. The header's
//! `structure_size` is not used to accept or reject a buffer; it is exposed on
//! the sample for diagnostics.

use crate::error::{DecodeError, DecodeResult};
use crate::sample::DecodedSample;
use crate::sniffer::sniff;
use gpumon_types::SchemaRegistry;

/// Decode `buffer` against the built-in revisions
pub fn decode(buffer: &[u8]) -> DecodeResult<DecodedSample<'_>> {
    decode_with(&SchemaRegistry::builtin(), buffer)
}

/// Decode `buffer` against an explicit registry
pub fn decode_with<'a>(registry: &SchemaRegistry, buffer: &'a [u8]) -> DecodeResult<DecodedSample<'a>> {
    let header = sniff(buffer)?;

    let variant = registry
        .lookup(header.format_revision, header.content_revision)
        .ok_or(DecodeError::UnknownVariant(
            header.format_revision,
            header.content_revision,
        ))?;

    if buffer.len() < variant.byte_size {
        return Err(DecodeError::buffer_too_small(variant.byte_size, buffer.len()));
    }

    Ok(DecodedSample::new(variant, header, &buffer[..variant.byte_size]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::TableFixture;
    use gpumon_types::{SchemaVariant, GPU_METRICS_V1_3, GPU_METRICS_V2_2, GPU_METRICS_V2_3};

    #[test]
    fn test_decode_each_builtin_variant() {
        for variant in SchemaRegistry::builtin().variants() {
            let buffer = TableFixture::new(variant).build().unwrap();
            let sample = decode(&buffer).unwrap();
            assert_eq!(sample.variant(), *variant);
            assert_eq!(sample.as_bytes().len(), variant.byte_size);
        }
    }

    #[test]
    fn test_decode_too_short() {
        assert_eq!(decode(&[]).unwrap_err(), DecodeError::TooShort { need: 4, got: 0 });
        assert_eq!(decode(&[1, 2, 3]).unwrap_err(), DecodeError::TooShort { need: 4, got: 3 });
    }

    #[test]
    fn test_decode_unknown_variant() {
        let buffer = TableFixture::new(&GPU_METRICS_V2_3)
            .with_revision(9, 9)
            .build()
            .unwrap();
        assert_eq!(decode(&buffer).unwrap_err(), DecodeError::UnknownVariant(9, 9));

        // Header alone is enough to learn the revision is unknown
        assert_eq!(decode(&[0, 0, 3, 0]).unwrap_err(), DecodeError::UnknownVariant(3, 0));
    }

    #[test]
    fn test_decode_buffer_too_small() {
        let buffer = TableFixture::new(&GPU_METRICS_V1_3).truncated(119).build().unwrap();
        assert_eq!(
            decode(&buffer).unwrap_err(),
            DecodeError::BufferTooSmall { expected: 120, actual: 119 }
        );
    }

    #[test]
    fn test_decode_ignores_trailing_bytes() {
        let buffer = TableFixture::new(&GPU_METRICS_V2_2).padded(24).build().unwrap();
        let sample = decode(&buffer).unwrap();
        assert_eq!(sample.as_bytes().len(), 128);
    }

    #[test]
    fn test_decode_with_custom_registry() {
        static ONLY_V2_2: &[&SchemaVariant] = &[&GPU_METRICS_V2_2];
        let registry = SchemaRegistry::new(ONLY_V2_2);

        let v1_3 = TableFixture::new(&GPU_METRICS_V1_3).build().unwrap();
        assert_eq!(decode_with(&registry, &v1_3).unwrap_err(), DecodeError::UnknownVariant(1, 3));

        let v2_2 = TableFixture::new(&GPU_METRICS_V2_2).build().unwrap();
        assert_eq!(decode_with(&registry, &v2_2).unwrap().key(), GPU_METRICS_V2_2.key);
    }
}
