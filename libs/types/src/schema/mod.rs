//! Metrics table schemas
//!
//! Field tables for every known `gpu_metrics` revision and the registry that
//! selects among them.

pub mod apu;
pub mod field;
pub mod registry;
pub mod unit;
pub mod v1_3;
pub mod variant;

pub use apu::{GPU_METRICS_V2_2, GPU_METRICS_V2_3};
pub use v1_3::GPU_METRICS_V1_3;

#[cfg(test)]
mod tests {
    use super::registry::SchemaRegistry;
    use super::unit::Unit;
    use crate::header::MetricsTableHeader;
    use std::collections::HashSet;

    #[test]
    fn test_fields_within_table_and_after_header() {
        for variant in SchemaRegistry::builtin().variants() {
            for field in variant.fields {
                assert!(
                    field.offset >= MetricsTableHeader::SIZE,
                    "{}.{} overlaps the common header",
                    variant.name,
                    field.name
                );
                assert!(
                    field.end() <= variant.byte_size,
                    "{}.{} ends at {} past table size {}",
                    variant.name,
                    field.name,
                    field.end(),
                    variant.byte_size
                );
                assert_eq!(
                    field.offset % field.kind.width(),
                    0,
                    "{}.{} is misaligned",
                    variant.name,
                    field.name
                );
            }
        }
    }

    #[test]
    fn test_no_overlapping_fields() {
        for variant in SchemaRegistry::builtin().variants() {
            for (i, a) in variant.fields.iter().enumerate() {
                for b in &variant.fields[i + 1..] {
                    assert!(!a.overlaps(b), "{}: {} overlaps {}", variant.name, a.name, b.name);
                }
            }
        }
    }

    #[test]
    fn test_unique_field_names() {
        for variant in SchemaRegistry::builtin().variants() {
            let mut seen = HashSet::new();
            for field in variant.fields {
                assert!(seen.insert(field.name), "{}: duplicate {}", variant.name, field.name);
            }
        }
    }

    #[test]
    fn test_default_display_fields_exist() {
        for variant in SchemaRegistry::builtin().variants() {
            for name in variant.default_display {
                assert!(variant.has_field(name), "{}: missing {}", variant.name, name);
            }
        }
    }

    #[test]
    fn test_v2_3_extends_v2_2() {
        let v2_2 = &super::GPU_METRICS_V2_2;
        let v2_3 = &super::GPU_METRICS_V2_3;

        assert_eq!(&v2_3.fields[..v2_2.fields.len()], v2_2.fields);
        for extra in &v2_3.fields[v2_2.fields.len()..] {
            assert!(extra.offset >= v2_2.byte_size);
            assert!(extra.name.starts_with("average_temperature_"));
        }
    }

    #[test]
    fn test_power_units_per_variant() {
        let registry = SchemaRegistry::builtin();
        let unit_of = |f: u8, c: u8, name: &str| registry.lookup(f, c).unwrap().field(name).unwrap().unit;

        assert_eq!(unit_of(1, 3, "average_socket_power"), Unit::Watts);
        for content in [2, 3] {
            assert_eq!(unit_of(2, content, "average_socket_power"), Unit::Watts);
            assert_eq!(unit_of(2, content, "average_cpu_power"), Unit::Milliwatts);
            assert_eq!(unit_of(2, content, "average_soc_power"), Unit::Milliwatts);
            assert_eq!(unit_of(2, content, "average_gfx_power"), Unit::Milliwatts);
            assert_eq!(unit_of(2, content, "average_core_power"), Unit::Milliwatts);
        }
    }

    #[test]
    fn test_temperature_units_per_variant() {
        let registry = SchemaRegistry::builtin();
        let unit_of = |f: u8, c: u8, name: &str| registry.lookup(f, c).unwrap().field(name).unwrap().unit;

        for name in ["temperature_edge", "temperature_hotspot", "temperature_mem", "temperature_hbm"] {
            assert_eq!(unit_of(1, 3, name), Unit::Celsius, "v1.3 {}", name);
        }
        for content in [2, 3] {
            assert_eq!(unit_of(2, content, "temperature_gfx"), Unit::CentiCelsius);
            assert_eq!(unit_of(2, content, "temperature_soc"), Unit::CentiCelsius);
            assert_eq!(unit_of(2, content, "temperature_core"), Unit::CentiCelsius);
        }
        assert_eq!(unit_of(2, 3, "average_temperature_gfx"), Unit::CentiCelsius);
    }

    #[test]
    fn test_cross_variant_fields_absent() {
        let registry = SchemaRegistry::builtin();
        let v1_3 = registry.lookup(1, 3).unwrap();
        let v2_2 = registry.lookup(2, 2).unwrap();

        assert!(!v1_3.has_field("temperature_core"));
        assert!(!v1_3.has_field("average_cpu_power"));
        assert!(!v2_2.has_field("temperature_hbm"));
        assert!(!v2_2.has_field("average_temperature_gfx"));
    }
}
