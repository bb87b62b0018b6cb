//! `gpu_metrics_v1_3`: discrete-GPU metrics table, revision 1.3
//!
//! Offsets follow the natural C alignment of the driver struct. Padding
//! members (`padding` at 78, `padding1` at 110) are not listed. Temperatures
//! are whole degrees Celsius, unlike the centi-degree APU tables.

use super::field::{FieldSpec, NumericKind::*};
use super::unit::{FieldGroup::*, Unit::*};
use super::variant::{RevisionKey, SchemaVariant};

/// Number of HBM stacks reported by v1.3
pub const NUM_HBM_INSTANCES: usize = 4;

const FIELDS: &[FieldSpec] = &[
    // Temperature
    FieldSpec::scalar("temperature_edge", 4, U16, Celsius, Temperature),
    FieldSpec::scalar("temperature_hotspot", 6, U16, Celsius, Temperature),
    FieldSpec::scalar("temperature_mem", 8, U16, Celsius, Temperature),
    FieldSpec::scalar("temperature_vrgfx", 10, U16, Celsius, Temperature),
    FieldSpec::scalar("temperature_vrsoc", 12, U16, Celsius, Temperature),
    FieldSpec::scalar("temperature_vrmem", 14, U16, Celsius, Temperature),
    // Utilization
    FieldSpec::scalar("average_gfx_activity", 16, U16, Percent, Utilization),
    FieldSpec::scalar("average_umc_activity", 18, U16, Percent, Utilization),
    FieldSpec::scalar("average_mm_activity", 20, U16, Percent, Utilization),
    // Power/Energy
    FieldSpec::scalar("average_socket_power", 22, U16, Watts, Power),
    FieldSpec::scalar("energy_accumulator", 24, U64, Counter, Energy),
    // Driver attached timestamp
    FieldSpec::scalar("system_clock_counter", 32, U64, Nanoseconds, Timestamp),
    // Average clocks
    FieldSpec::scalar("average_gfxclk_frequency", 40, U16, Megahertz, Clock),
    FieldSpec::scalar("average_socclk_frequency", 42, U16, Megahertz, Clock),
    FieldSpec::scalar("average_uclk_frequency", 44, U16, Megahertz, Clock),
    FieldSpec::scalar("average_vclk0_frequency", 46, U16, Megahertz, Clock),
    FieldSpec::scalar("average_dclk0_frequency", 48, U16, Megahertz, Clock),
    FieldSpec::scalar("average_vclk1_frequency", 50, U16, Megahertz, Clock),
    FieldSpec::scalar("average_dclk1_frequency", 52, U16, Megahertz, Clock),
    // Current clocks
    FieldSpec::scalar("current_gfxclk", 54, U16, Megahertz, Clock),
    FieldSpec::scalar("current_socclk", 56, U16, Megahertz, Clock),
    FieldSpec::scalar("current_uclk", 58, U16, Megahertz, Clock),
    FieldSpec::scalar("current_vclk0", 60, U16, Megahertz, Clock),
    FieldSpec::scalar("current_dclk0", 62, U16, Megahertz, Clock),
    FieldSpec::scalar("current_vclk1", 64, U16, Megahertz, Clock),
    FieldSpec::scalar("current_dclk1", 66, U16, Megahertz, Clock),
    // Throttle status (ASIC dependent)
    FieldSpec::scalar("throttle_status", 68, U32, Bitmask, Throttle),
    // Fans
    FieldSpec::scalar("current_fan_speed", 72, U16, Rpm, Fan),
    // Link width/speed
    FieldSpec::scalar("pcie_link_width", 74, U16, Lanes, Link),
    FieldSpec::scalar("pcie_link_speed", 76, U16, DeciGigatransfers, Link),
    FieldSpec::scalar("gfx_activity_acc", 80, U32, Counter, ActivityAccumulator),
    FieldSpec::scalar("mem_activity_acc", 84, U32, Counter, ActivityAccumulator),
    FieldSpec::array("temperature_hbm", 88, U16, NUM_HBM_INSTANCES, Celsius, Temperature),
    // PMFW attached timestamp
    FieldSpec::scalar("firmware_timestamp", 96, U64, TenNanoseconds, Timestamp),
    // Voltage
    FieldSpec::scalar("voltage_soc", 104, U16, Millivolts, Voltage),
    FieldSpec::scalar("voltage_gfx", 106, U16, Millivolts, Voltage),
    FieldSpec::scalar("voltage_mem", 108, U16, Millivolts, Voltage),
    // Throttle status (ASIC independent)
    FieldSpec::scalar("indep_throttle_status", 112, U64, Bitmask, Throttle),
];

pub static GPU_METRICS_V1_3: SchemaVariant = SchemaVariant {
    key: RevisionKey::new(1, 3),
    name: "gpu_metrics_v1_3",
    description: "discrete-GPU metrics table v1.3",
    byte_size: 120,
    fields: FIELDS,
    default_display: &["average_socket_power"],
};
