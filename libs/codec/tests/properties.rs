//! Property tests: decoding arbitrary bytes never panics and never misreports

use gpumon_codec::{decode, sniff, DecodeError, TableFixture};
use gpumon_types::{SchemaRegistry, SchemaVariant};
use proptest::prelude::*;

fn builtin_variant() -> impl Strategy<Value = &'static SchemaVariant> {
    let variants = SchemaRegistry::builtin().variants();
    (0..variants.len()).prop_map(move |index| variants[index])
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        match decode(&bytes) {
            Ok(sample) => {
                prop_assert!(bytes.len() >= sample.variant().byte_size);
                // Every field of a decoded sample is readable
                prop_assert_eq!(sample.fields().count(), sample.variant().fields.len());
            }
            Err(DecodeError::TooShort { need, got }) => {
                prop_assert_eq!(need, 4);
                prop_assert_eq!(got, bytes.len());
            }
            Err(DecodeError::UnknownVariant(f, c)) => {
                prop_assert_eq!((f, c), (bytes[2], bytes[3]));
                prop_assert!(SchemaRegistry::builtin().lookup(f, c).is_none());
            }
            Err(DecodeError::BufferTooSmall { expected, actual }) => {
                prop_assert_eq!(actual, bytes.len());
                prop_assert!(actual < expected);
            }
            Err(other) => prop_assert!(false, "unexpected error {:?}", other),
        }
    }

    #[test]
    fn short_buffers_are_too_short(bytes in proptest::collection::vec(any::<u8>(), 0..4)) {
        prop_assert_eq!(
            decode(&bytes).unwrap_err(),
            DecodeError::TooShort { need: 4, got: bytes.len() }
        );
        prop_assert!(sniff(&bytes).is_err());
    }

    #[test]
    fn truncation_reports_exact_sizes(variant in builtin_variant(), cut in 4usize..152) {
        prop_assume!(cut < variant.byte_size);
        let buffer = TableFixture::new(variant).truncated(cut).build().unwrap();
        prop_assert_eq!(
            decode(&buffer).unwrap_err(),
            DecodeError::BufferTooSmall { expected: variant.byte_size, actual: cut }
        );
    }

    #[test]
    fn declared_size_never_affects_decoding(variant in builtin_variant(), declared in any::<u16>()) {
        let buffer = TableFixture::new(variant).with_declared_size(declared).build().unwrap();
        let sample = decode(&buffer).unwrap();
        prop_assert_eq!(sample.declared_size(), declared);
        prop_assert_eq!(sample.key(), variant.key);
    }

    #[test]
    fn trailing_bytes_are_ignored(variant in builtin_variant(), extra in 0usize..256) {
        let buffer = TableFixture::new(variant).padded(extra).build().unwrap();
        let sample = decode(&buffer).unwrap();
        prop_assert_eq!(sample.as_bytes().len(), variant.byte_size);
    }
}
