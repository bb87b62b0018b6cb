//! `gpu_metrics_v2_2` and `gpu_metrics_v2_3`: APU metrics tables
//!
//! v2.3 repeats the v2.2 layout byte for byte and appends an averaged
//! temperature block at offset 128. Both tables are expanded from the same
//! field list so the shared prefix cannot drift.
//!
//! `average_socket_power` is stored in whole watts while the per-domain
//! powers (`average_cpu_power`, `average_soc_power`, `average_gfx_power`,
//! `average_core_power`) are milliwatts.

use super::field::{FieldSpec, NumericKind::*};
use super::unit::{FieldGroup::*, Unit::*};
use super::variant::{RevisionKey, SchemaVariant};

/// CPU cores reported by the v2 tables
pub const NUM_CORES: usize = 8;
/// L3 cache complexes reported by the v2 tables
pub const NUM_L3: usize = 2;

/// Expands to the v2.2 field list followed by any extra entries
macro_rules! apu_v2_fields {
    ($($extra:expr),* $(,)?) => {
        &[
            // Temperature
            FieldSpec::scalar("temperature_gfx", 4, U16, CentiCelsius, Temperature),
            FieldSpec::scalar("temperature_soc", 6, U16, CentiCelsius, Temperature),
            FieldSpec::array("temperature_core", 8, U16, NUM_CORES, CentiCelsius, Temperature),
            FieldSpec::array("temperature_l3", 24, U16, NUM_L3, CentiCelsius, Temperature),
            // Utilization
            FieldSpec::scalar("average_gfx_activity", 28, U16, Percent, Utilization),
            FieldSpec::scalar("average_mm_activity", 30, U16, Percent, Utilization),
            // Driver attached timestamp
            FieldSpec::scalar("system_clock_counter", 32, U64, Nanoseconds, Timestamp),
            // Power/Energy
            FieldSpec::scalar("average_socket_power", 40, U16, Watts, Power),
            FieldSpec::scalar("average_cpu_power", 42, U16, Milliwatts, Power),
            FieldSpec::scalar("average_soc_power", 44, U16, Milliwatts, Power),
            FieldSpec::scalar("average_gfx_power", 46, U16, Milliwatts, Power),
            FieldSpec::array("average_core_power", 48, U16, NUM_CORES, Milliwatts, Power),
            // Average clocks
            FieldSpec::scalar("average_gfxclk_frequency", 64, U16, Megahertz, Clock),
            FieldSpec::scalar("average_socclk_frequency", 66, U16, Megahertz, Clock),
            FieldSpec::scalar("average_uclk_frequency", 68, U16, Megahertz, Clock),
            FieldSpec::scalar("average_fclk_frequency", 70, U16, Megahertz, Clock),
            FieldSpec::scalar("average_vclk_frequency", 72, U16, Megahertz, Clock),
            FieldSpec::scalar("average_dclk_frequency", 74, U16, Megahertz, Clock),
            // Current clocks
            FieldSpec::scalar("current_gfxclk", 76, U16, Megahertz, Clock),
            FieldSpec::scalar("current_socclk", 78, U16, Megahertz, Clock),
            FieldSpec::scalar("current_uclk", 80, U16, Megahertz, Clock),
            FieldSpec::scalar("current_fclk", 82, U16, Megahertz, Clock),
            FieldSpec::scalar("current_vclk", 84, U16, Megahertz, Clock),
            FieldSpec::scalar("current_dclk", 86, U16, Megahertz, Clock),
            FieldSpec::array("current_coreclk", 88, U16, NUM_CORES, Megahertz, Clock),
            FieldSpec::array("current_l3clk", 104, U16, NUM_L3, Megahertz, Clock),
            // Throttle status (ASIC dependent)
            FieldSpec::scalar("throttle_status", 108, U32, Bitmask, Throttle),
            // Fans
            FieldSpec::scalar("fan_pwm", 112, U16, Counter, Fan),
            // Throttle status (ASIC independent)
            FieldSpec::scalar("indep_throttle_status", 120, U64, Bitmask, Throttle),
            $($extra,)*
        ]
    };
}

const APU_DEFAULT_DISPLAY: &[&str] = &["average_socket_power", "average_cpu_power", "average_soc_power"];

const V2_2_FIELDS: &[FieldSpec] = apu_v2_fields!();

const V2_3_FIELDS: &[FieldSpec] = apu_v2_fields!(
    // Average temperature
    FieldSpec::scalar("average_temperature_gfx", 128, U16, CentiCelsius, Temperature),
    FieldSpec::scalar("average_temperature_soc", 130, U16, CentiCelsius, Temperature),
    FieldSpec::array("average_temperature_core", 132, U16, NUM_CORES, CentiCelsius, Temperature),
    FieldSpec::array("average_temperature_l3", 148, U16, NUM_L3, CentiCelsius, Temperature),
);

pub static GPU_METRICS_V2_2: SchemaVariant = SchemaVariant {
    key: RevisionKey::new(2, 2),
    name: "gpu_metrics_v2_2",
    description: "APU metrics table v2.2",
    byte_size: 128,
    fields: V2_2_FIELDS,
    default_display: APU_DEFAULT_DISPLAY,
};

pub static GPU_METRICS_V2_3: SchemaVariant = SchemaVariant {
    key: RevisionKey::new(2, 3),
    name: "gpu_metrics_v2_3",
    description: "APU metrics table v2.3",
    byte_size: 152,
    fields: V2_3_FIELDS,
    default_display: APU_DEFAULT_DISPLAY,
};
