//! Field paths: `name` or `name[index]`

use std::fmt;
use std::str::FromStr;

use crate::error::DecodeError;

/// Parsed reference to a field or to one element of an array field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    pub name: String,
    pub index: Option<usize>,
}

impl FieldPath {
    pub fn parse(path: &str) -> Result<Self, DecodeError> {
        let trimmed = path.trim();
        let (name, index) = match trimmed.find('[') {
            None => (trimmed, None),
            Some(open) => {
                let rest = &trimmed[open + 1..];
                let digits = rest
                    .strip_suffix(']')
                    .ok_or_else(|| DecodeError::invalid_field_path(path, "unterminated index"))?;
                let index = digits.parse::<usize>().map_err(|_| {
                    DecodeError::invalid_field_path(path, format!("index {:?} is not a number", digits))
                })?;
                (&trimmed[..open], Some(index))
            }
        };

        if name.is_empty() {
            return Err(DecodeError::invalid_field_path(path, "empty field name"));
        }
        if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DecodeError::invalid_field_path(path, "field names are [A-Za-z0-9_]"));
        }

        Ok(Self {
            name: name.to_string(),
            index,
        })
    }
}

impl FromStr for FieldPath {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.name, index),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_indexed() {
        assert_eq!(
            FieldPath::parse("average_cpu_power").unwrap(),
            FieldPath { name: "average_cpu_power".into(), index: None }
        );
        assert_eq!(
            FieldPath::parse("temperature_core[0]").unwrap(),
            FieldPath { name: "temperature_core".into(), index: Some(0) }
        );
        assert_eq!(FieldPath::parse(" current_l3clk[1] ").unwrap().index, Some(1));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "[0]", "temperature_core[", "temperature_core[x]", "temperature_core[-1]", "a b", "a[0]x"] {
            let err = FieldPath::parse(bad).unwrap_err();
            assert!(matches!(err, DecodeError::InvalidFieldPath { .. }), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_display_roundtrip() {
        for path in ["temperature_core[7]", "fan_pwm"] {
            assert_eq!(path.parse::<FieldPath>().unwrap().to_string(), path);
        }
    }
}
