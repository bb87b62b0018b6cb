//! Field Table Entries
//!
//! A [`FieldSpec`] locates one named metric inside a table: its byte offset
//! from the start of the table (header included), the numeric kind of each
//! element, whether it is a scalar or a fixed-length array, and its unit.

use super::unit::{FieldGroup, Unit};

/// Unsigned integer kinds used by the metrics tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericKind {
    U8,
    U16,
    U32,
    U64,
}

impl NumericKind {
    /// Byte width of one element
    pub const fn width(&self) -> usize {
        match self {
            NumericKind::U8 => 1,
            NumericKind::U16 => 2,
            NumericKind::U32 => 4,
            NumericKind::U64 => 8,
        }
    }

    pub const fn max_value(&self) -> u64 {
        match self {
            NumericKind::U8 => u8::MAX as u64,
            NumericKind::U16 => u16::MAX as u64,
            NumericKind::U32 => u32::MAX as u64,
            NumericKind::U64 => u64::MAX,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::U8 => "u8",
            NumericKind::U16 => "u16",
            NumericKind::U32 => "u32",
            NumericKind::U64 => "u64",
        }
    }
}

/// Scalar or fixed-length array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldShape {
    Scalar,
    Array(usize),
}

impl FieldShape {
    /// Number of elements
    pub const fn len(&self) -> usize {
        match self {
            FieldShape::Scalar => 1,
            FieldShape::Array(len) => *len,
        }
    }
}

/// One entry of a variant's field table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    /// Byte offset from the start of the table
    pub offset: usize,
    pub kind: NumericKind,
    pub shape: FieldShape,
    pub unit: Unit,
    pub group: FieldGroup,
}

impl FieldSpec {
    pub const fn scalar(
        name: &'static str,
        offset: usize,
        kind: NumericKind,
        unit: Unit,
        group: FieldGroup,
    ) -> Self {
        Self {
            name,
            offset,
            kind,
            shape: FieldShape::Scalar,
            unit,
            group,
        }
    }

    pub const fn array(
        name: &'static str,
        offset: usize,
        kind: NumericKind,
        len: usize,
        unit: Unit,
        group: FieldGroup,
    ) -> Self {
        Self {
            name,
            offset,
            kind,
            shape: FieldShape::Array(len),
            unit,
            group,
        }
    }

    /// Total width in bytes of all elements
    pub const fn width(&self) -> usize {
        self.kind.width() * self.shape.len()
    }

    /// First byte past the field
    pub const fn end(&self) -> usize {
        self.offset + self.width()
    }

    pub const fn len(&self) -> usize {
        self.shape.len()
    }

    pub const fn is_array(&self) -> bool {
        matches!(self.shape, FieldShape::Array(_))
    }

    /// Byte offset of element `index`, or `None` when out of range
    pub const fn element_offset(&self, index: usize) -> Option<usize> {
        if index < self.shape.len() {
            Some(self.offset + index * self.kind.width())
        } else {
            None
        }
    }

    /// Whether two fields share any byte
    pub fn overlaps(&self, other: &FieldSpec) -> bool {
        self.offset < other.end() && other.offset < self.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        let scalar = FieldSpec::scalar("a", 4, NumericKind::U16, Unit::Watts, FieldGroup::Power);
        assert_eq!(scalar.width(), 2);
        assert_eq!(scalar.end(), 6);
        assert!(!scalar.is_array());

        let array =
            FieldSpec::array("b", 8, NumericKind::U16, 8, Unit::CentiCelsius, FieldGroup::Temperature);
        assert_eq!(array.width(), 16);
        assert_eq!(array.end(), 24);
        assert_eq!(array.len(), 8);
        assert!(array.is_array());
    }

    #[test]
    fn test_element_offset() {
        let array =
            FieldSpec::array("b", 8, NumericKind::U16, 8, Unit::CentiCelsius, FieldGroup::Temperature);
        assert_eq!(array.element_offset(0), Some(8));
        assert_eq!(array.element_offset(7), Some(22));
        assert_eq!(array.element_offset(8), None);

        let wide = FieldSpec::scalar("c", 24, NumericKind::U64, Unit::Counter, FieldGroup::Energy);
        assert_eq!(wide.element_offset(0), Some(24));
        assert_eq!(wide.element_offset(1), None);
    }

    #[test]
    fn test_overlap() {
        let a = FieldSpec::scalar("a", 4, NumericKind::U32, Unit::Counter, FieldGroup::Energy);
        let b = FieldSpec::scalar("b", 6, NumericKind::U16, Unit::Counter, FieldGroup::Energy);
        let c = FieldSpec::scalar("c", 8, NumericKind::U16, Unit::Counter, FieldGroup::Energy);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_kind_limits() {
        assert_eq!(NumericKind::U16.max_value(), 65535);
        assert_eq!(NumericKind::U64.width(), 8);
        assert_eq!(NumericKind::U32.name(), "u32");
    }
}
