//! Field table layout validation against `#[repr(C)]` mirrors of the driver structs
//!
//! The field tables are hand-written offsets. These tests mirror the kernel's
//! `kgd_pp_interface.h` definitions as C-layout Rust structs and require every
//! table offset to equal `offset_of!` on the mirror, and every table size to
//! equal `size_of`. The mirrors derive `AsBytes`, which also proves they carry
//! no implicit padding.

use gpumon_types::{
    FieldSpec, MetricsTableHeader, SchemaVariant, GPU_METRICS_V1_3, GPU_METRICS_V2_2,
    GPU_METRICS_V2_3,
};
use std::mem::{offset_of, size_of};
use zerocopy::{AsBytes, FromBytes, FromZeroes};

#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes)]
struct GpuMetricsV1_3 {
    common_header: MetricsTableHeader,
    temperature_edge: u16,
    temperature_hotspot: u16,
    temperature_mem: u16,
    temperature_vrgfx: u16,
    temperature_vrsoc: u16,
    temperature_vrmem: u16,
    average_gfx_activity: u16,
    average_umc_activity: u16,
    average_mm_activity: u16,
    average_socket_power: u16,
    energy_accumulator: u64,
    system_clock_counter: u64,
    average_gfxclk_frequency: u16,
    average_socclk_frequency: u16,
    average_uclk_frequency: u16,
    average_vclk0_frequency: u16,
    average_dclk0_frequency: u16,
    average_vclk1_frequency: u16,
    average_dclk1_frequency: u16,
    current_gfxclk: u16,
    current_socclk: u16,
    current_uclk: u16,
    current_vclk0: u16,
    current_dclk0: u16,
    current_vclk1: u16,
    current_dclk1: u16,
    throttle_status: u32,
    current_fan_speed: u16,
    pcie_link_width: u16,
    pcie_link_speed: u16,
    padding: u16,
    gfx_activity_acc: u32,
    mem_activity_acc: u32,
    temperature_hbm: [u16; 4],
    firmware_timestamp: u64,
    voltage_soc: u16,
    voltage_gfx: u16,
    voltage_mem: u16,
    padding1: u16,
    indep_throttle_status: u64,
}

#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes)]
struct GpuMetricsV2_2 {
    common_header: MetricsTableHeader,
    temperature_gfx: u16,
    temperature_soc: u16,
    temperature_core: [u16; 8],
    temperature_l3: [u16; 2],
    average_gfx_activity: u16,
    average_mm_activity: u16,
    system_clock_counter: u64,
    average_socket_power: u16,
    average_cpu_power: u16,
    average_soc_power: u16,
    average_gfx_power: u16,
    average_core_power: [u16; 8],
    average_gfxclk_frequency: u16,
    average_socclk_frequency: u16,
    average_uclk_frequency: u16,
    average_fclk_frequency: u16,
    average_vclk_frequency: u16,
    average_dclk_frequency: u16,
    current_gfxclk: u16,
    current_socclk: u16,
    current_uclk: u16,
    current_fclk: u16,
    current_vclk: u16,
    current_dclk: u16,
    current_coreclk: [u16; 8],
    current_l3clk: [u16; 2],
    throttle_status: u32,
    fan_pwm: u16,
    padding: [u16; 3],
    indep_throttle_status: u64,
}

#[repr(C)]
#[derive(AsBytes, FromBytes, FromZeroes)]
struct GpuMetricsV2_3 {
    base: GpuMetricsV2_2,
    average_temperature_gfx: u16,
    average_temperature_soc: u16,
    average_temperature_core: [u16; 8],
    average_temperature_l3: [u16; 2],
}

fn field<'a>(variant: &'a SchemaVariant, name: &str) -> &'a FieldSpec {
    variant
        .field(name)
        .unwrap_or_else(|| panic!("{} has no field {}", variant.name, name))
}

macro_rules! assert_offsets {
    ($variant:expr, $mirror:ty, [$($name:ident),* $(,)?]) => {
        $(
            assert_eq!(
                field($variant, stringify!($name)).offset,
                offset_of!($mirror, $name),
                "{}.{}",
                $variant.name,
                stringify!($name)
            );
        )*
    };
}

#[test]
fn test_v1_3_matches_c_layout() {
    let v = &GPU_METRICS_V1_3;
    assert_eq!(v.byte_size, size_of::<GpuMetricsV1_3>());
    assert_offsets!(
        v,
        GpuMetricsV1_3,
        [
            temperature_edge, temperature_hotspot, temperature_mem, temperature_vrgfx,
            temperature_vrsoc, temperature_vrmem, average_gfx_activity, average_umc_activity,
            average_mm_activity, average_socket_power, energy_accumulator, system_clock_counter,
            average_gfxclk_frequency, average_socclk_frequency, average_uclk_frequency,
            average_vclk0_frequency, average_dclk0_frequency, average_vclk1_frequency,
            average_dclk1_frequency, current_gfxclk, current_socclk, current_uclk, current_vclk0,
            current_dclk0, current_vclk1, current_dclk1, throttle_status, current_fan_speed,
            pcie_link_width, pcie_link_speed, gfx_activity_acc, mem_activity_acc,
            temperature_hbm, firmware_timestamp, voltage_soc, voltage_gfx, voltage_mem,
            indep_throttle_status,
        ]
    );
    // Every non-padding member of the mirror is in the table
    assert_eq!(v.fields.len(), 38);
}

#[test]
fn test_v2_2_matches_c_layout() {
    let v = &GPU_METRICS_V2_2;
    assert_eq!(v.byte_size, size_of::<GpuMetricsV2_2>());
    assert_offsets!(
        v,
        GpuMetricsV2_2,
        [
            temperature_gfx, temperature_soc, temperature_core, temperature_l3,
            average_gfx_activity, average_mm_activity, system_clock_counter,
            average_socket_power, average_cpu_power, average_soc_power, average_gfx_power,
            average_core_power, average_gfxclk_frequency, average_socclk_frequency,
            average_uclk_frequency, average_fclk_frequency, average_vclk_frequency,
            average_dclk_frequency, current_gfxclk, current_socclk, current_uclk, current_fclk,
            current_vclk, current_dclk, current_coreclk, current_l3clk, throttle_status,
            fan_pwm, indep_throttle_status,
        ]
    );
    assert_eq!(v.fields.len(), 29);
}

#[test]
fn test_v2_3_matches_c_layout() {
    let v = &GPU_METRICS_V2_3;
    assert_eq!(v.byte_size, size_of::<GpuMetricsV2_3>());
    assert_offsets!(
        v,
        GpuMetricsV2_3,
        [
            average_temperature_gfx,
            average_temperature_soc,
            average_temperature_core,
            average_temperature_l3,
        ]
    );
    // Inherited prefix sits at the same offsets as in v2.2
    for inherited in GPU_METRICS_V2_2.fields {
        assert_eq!(field(v, inherited.name).offset, inherited.offset);
    }
    assert_eq!(v.fields.len(), 33);
}

#[test]
fn test_array_widths_match_c_layout() {
    assert_eq!(field(&GPU_METRICS_V1_3, "temperature_hbm").width(), size_of::<[u16; 4]>());
    assert_eq!(field(&GPU_METRICS_V2_2, "temperature_core").width(), size_of::<[u16; 8]>());
    assert_eq!(field(&GPU_METRICS_V2_2, "current_l3clk").width(), size_of::<[u16; 2]>());
    assert_eq!(field(&GPU_METRICS_V1_3, "energy_accumulator").width(), size_of::<u64>());
}

#[test]
fn test_mirror_bytes_line_up_with_table() {
    let mut table = GpuMetricsV2_2::new_zeroed();
    table.common_header = MetricsTableHeader::new(128, 2, 2);
    table.average_cpu_power = 45000;
    table.temperature_core[3] = 4250;

    let bytes = table.as_bytes();
    let cpu = field(&GPU_METRICS_V2_2, "average_cpu_power");
    assert_eq!(&bytes[cpu.offset..cpu.end()], &45000u16.to_ne_bytes());

    let core = field(&GPU_METRICS_V2_2, "temperature_core");
    let third = core.element_offset(3).unwrap();
    assert_eq!(&bytes[third..third + 2], &4250u16.to_ne_bytes());
}
