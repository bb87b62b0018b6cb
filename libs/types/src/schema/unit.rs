//! Units, Scales and Scaled Values
//!
//! The driver stores every metric as an unsigned integer. What that integer
//! means differs per field *and* per table revision: `average_socket_power`
//! is whole watts in v1.3 and v2.x, while the v2.x per-domain powers are
//! milliwatts. Temperatures are whole degrees in v1.x and centi-degrees in
//! v2.x. The unit therefore lives in each field table entry and travels
//! with every value read from a table.

use std::fmt;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Conversion from a raw count to the unit's base value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    /// Raw value already is the base value
    Identity,
    /// `raw / n`
    Divide(u32),
    /// `raw * n`
    Multiply(u32),
}

impl Scale {
    /// Apply the scale as a single floating-point operation
    pub fn apply(&self, raw: u64) -> f64 {
        match *self {
            Scale::Identity => raw as f64,
            Scale::Divide(n) => raw as f64 / n as f64,
            Scale::Multiply(n) => raw as f64 * n as f64,
        }
    }
}

/// Declared unit of a raw table value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum Unit {
    /// Whole degrees Celsius
    Celsius,
    /// Hundredths of a degree Celsius
    CentiCelsius,
    Percent,
    Watts,
    Milliwatts,
    Megahertz,
    Millivolts,
    Rpm,
    Lanes,
    /// Tenths of a gigatransfer per second
    DeciGigatransfers,
    Nanoseconds,
    /// Firmware timestamps tick every 10 ns
    TenNanoseconds,
    Bitmask,
    /// Unitless accumulator or raw register value
    Counter,
}

impl Unit {
    pub fn scale(&self) -> Scale {
        match self {
            Unit::CentiCelsius => Scale::Divide(100),
            Unit::Milliwatts => Scale::Divide(1000),
            Unit::DeciGigatransfers => Scale::Divide(10),
            Unit::TenNanoseconds => Scale::Multiply(10),
            _ => Scale::Identity,
        }
    }

    /// Symbol of the value produced by [`ScaledValue::value`]
    pub fn base_symbol(&self) -> &'static str {
        match self {
            Unit::Celsius | Unit::CentiCelsius => "°C",
            Unit::Percent => "%",
            Unit::Watts | Unit::Milliwatts => "W",
            Unit::Megahertz => "MHz",
            Unit::Millivolts => "mV",
            Unit::Rpm => "RPM",
            Unit::Lanes => "lanes",
            Unit::DeciGigatransfers => "GT/s",
            Unit::Nanoseconds | Unit::TenNanoseconds => "ns",
            Unit::Bitmask | Unit::Counter => "",
        }
    }

    /// Symbol of the raw stored value
    pub fn raw_symbol(&self) -> &'static str {
        match self {
            Unit::CentiCelsius => "c°C",
            Unit::Milliwatts => "mW",
            Unit::DeciGigatransfers => "0.1 GT/s",
            Unit::TenNanoseconds => "10 ns",
            other => other.base_symbol(),
        }
    }

    /// Whether the raw value must be scaled before display
    pub fn is_scaled(&self) -> bool {
        self.scale() != Scale::Identity
    }
}

/// Display grouping, following the section comments of the driver structs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serialization", serde(rename_all = "snake_case"))]
pub enum FieldGroup {
    Temperature,
    Utilization,
    Power,
    Energy,
    Timestamp,
    Clock,
    Throttle,
    Fan,
    Link,
    ActivityAccumulator,
    Voltage,
}

impl FieldGroup {
    pub fn name(&self) -> &'static str {
        match self {
            FieldGroup::Temperature => "Temperature",
            FieldGroup::Utilization => "Utilization",
            FieldGroup::Power => "Power",
            FieldGroup::Energy => "Energy",
            FieldGroup::Timestamp => "Timestamp",
            FieldGroup::Clock => "Clock",
            FieldGroup::Throttle => "Throttle",
            FieldGroup::Fan => "Fan",
            FieldGroup::Link => "Link",
            FieldGroup::ActivityAccumulator => "Activity accumulator",
            FieldGroup::Voltage => "Voltage",
        }
    }
}

/// Raw table value together with its declared unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ScaledValue {
    pub raw: u64,
    pub unit: Unit,
}

impl ScaledValue {
    pub const fn new(raw: u64, unit: Unit) -> Self {
        Self { raw, unit }
    }

    /// Value in the unit's base unit (watts for milliwatt fields, °C for
    /// centi-degrees, ...)
    pub fn value(&self) -> f64 {
        self.unit.scale().apply(self.raw)
    }
}

impl fmt::Display for ScaledValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Bitmask => write!(f, "{:#x}", self.raw),
            Unit::Counter => write!(f, "{}", self.raw),
            unit if unit.is_scaled() => write!(f, "{:.2} {}", self.value(), unit.base_symbol()),
            unit => write!(f, "{} {}", self.raw, unit.base_symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milliwatts_divide_exactly() {
        let cpu = ScaledValue::new(45000, Unit::Milliwatts);
        assert_eq!(cpu.value(), 45.0);
        assert_eq!(cpu.value(), 45000.0 / 1000.0);

        let odd = ScaledValue::new(12345, Unit::Milliwatts);
        assert_eq!(odd.value(), 12345.0 / 1000.0);
    }

    #[test]
    fn test_watts_unscaled() {
        let socket = ScaledValue::new(150, Unit::Watts);
        assert_eq!(socket.value(), 150.0);
        assert!(!Unit::Watts.is_scaled());
        assert!(Unit::Milliwatts.is_scaled());
    }

    #[test]
    fn test_other_scales() {
        assert_eq!(ScaledValue::new(4250, Unit::CentiCelsius).value(), 42.5);
        assert_eq!(ScaledValue::new(160, Unit::DeciGigatransfers).value(), 16.0);
        assert_eq!(ScaledValue::new(7, Unit::TenNanoseconds).value(), 70.0);
        assert_eq!(ScaledValue::new(1800, Unit::Megahertz).value(), 1800.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(ScaledValue::new(150, Unit::Watts).to_string(), "150 W");
        assert_eq!(ScaledValue::new(45000, Unit::Milliwatts).to_string(), "45.00 W");
        assert_eq!(ScaledValue::new(0x24, Unit::Bitmask).to_string(), "0x24");
        assert_eq!(ScaledValue::new(99, Unit::Counter).to_string(), "99");
        assert_eq!(ScaledValue::new(4250, Unit::CentiCelsius).to_string(), "42.50 °C");
    }

    #[test]
    fn test_whole_degrees_unscaled() {
        let edge = ScaledValue::new(65, Unit::Celsius);
        assert!(!Unit::Celsius.is_scaled());
        assert_eq!(edge.value(), 65.0);
        assert_eq!(edge.to_string(), "65 °C");
        assert_eq!(Unit::Celsius.raw_symbol(), "°C");
    }

    #[cfg(feature = "serialization")]
    #[test]
    fn test_serialize_scaled_value() {
        let json = serde_json::to_string(&ScaledValue::new(45000, Unit::Milliwatts)).unwrap();
        assert_eq!(json, r#"{"raw":45000,"unit":"milliwatts"}"#);
    }
}
