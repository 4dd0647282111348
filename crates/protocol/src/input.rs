//! Client → Server input messages.
//!
//! One message per key transition, formatted as `dx,dy,action` with
//! `dx`/`dy` in `{-1, 0, 1}` and `action` in `{0, 1}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::FIELD_SEPARATOR;

/// Movement and action intent derived from the held keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputVector {
    /// Horizontal direction: -1 left, 1 right.
    pub dx: i8,
    /// Vertical direction in screen space: -1 up, 1 down.
    pub dy: i8,
    /// Whether the action key is held.
    pub action: bool,
}

impl InputVector {
    /// Vector with no movement and no action.
    pub const IDLE: InputVector = InputVector {
        dx: 0,
        dy: 0,
        action: false,
    };

    /// Compute the vector from held-key state.
    ///
    /// Opposing directions cancel out, so holding both up and down yields `dy == 0`.
    pub fn from_held(up: bool, down: bool, left: bool, right: bool, action: bool) -> Self {
        Self {
            dx: i8::from(right) - i8::from(left),
            dy: i8::from(down) - i8::from(up),
            action,
        }
    }

    /// Build a vector, checking each component is in range.
    pub fn new(dx: i8, dy: i8, action: bool) -> Result<Self, InputParseError> {
        check_axis("dx", dx)?;
        check_axis("dy", dy)?;
        Ok(Self { dx, dy, action })
    }

    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

fn check_axis(field: &'static str, value: i8) -> Result<(), InputParseError> {
    if (-1..=1).contains(&value) {
        Ok(())
    } else {
        Err(InputParseError::OutOfRange {
            field,
            value: i64::from(value),
        })
    }
}

impl fmt::Display for InputVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}",
            self.dx,
            self.dy,
            u8::from(self.action),
            sep = FIELD_SEPARATOR
        )
    }
}

/// Errors from parsing an input message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputParseError {
    #[error("expected 3 fields, found {0}")]
    FieldCount(usize),

    #[error("field `{field}` is not an integer: {raw:?}")]
    NotAnInteger { field: &'static str, raw: String },

    #[error("field `{field}` out of range: {value}")]
    OutOfRange { field: &'static str, value: i64 },
}

fn parse_field(field: &'static str, raw: &str) -> Result<i64, InputParseError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InputParseError::NotAnInteger {
            field,
            raw: raw.to_string(),
        })
}

impl FromStr for InputVector {
    type Err = InputParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(FIELD_SEPARATOR).collect();
        let [dx, dy, action] = parts.as_slice() else {
            return Err(InputParseError::FieldCount(parts.len()));
        };

        let dx = parse_field("dx", dx)?;
        let dy = parse_field("dy", dy)?;
        let action = match parse_field("action", action)? {
            0 => false,
            1 => true,
            value => {
                return Err(InputParseError::OutOfRange {
                    field: "action",
                    value,
                })
            }
        };

        let axis = |field: &'static str, value: i64| {
            i8::try_from(value)
                .ok()
                .filter(|v| (-1..=1).contains(v))
                .ok_or(InputParseError::OutOfRange { field, value })
        };

        Ok(Self {
            dx: axis("dx", dx)?,
            dy: axis("dy", dy)?,
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_held_matches_key_arithmetic() {
        for bits in 0u8..32 {
            let up = bits & 1 != 0;
            let down = bits & 2 != 0;
            let left = bits & 4 != 0;
            let right = bits & 8 != 0;
            let action = bits & 16 != 0;

            let v = InputVector::from_held(up, down, left, right, action);
            assert_eq!(v.dx, right as i8 - left as i8);
            assert_eq!(v.dy, down as i8 - up as i8);
            assert_eq!(v.action, action);
        }
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let v = InputVector::from_held(true, true, true, true, false);
        assert!(v.is_idle());
    }

    #[test]
    fn test_display_has_no_whitespace() {
        for dx in -1..=1 {
            for dy in -1..=1 {
                for action in [false, true] {
                    let v = InputVector::new(dx, dy, action).unwrap();
                    let expected = format!("{},{},{}", dx, dy, u8::from(action));
                    assert_eq!(v.to_string(), expected);
                }
            }
        }
    }

    #[test]
    fn test_display_examples() {
        assert_eq!(InputVector::new(1, 0, false).unwrap().to_string(), "1,0,0");
        assert_eq!(InputVector::new(-1, -1, true).unwrap().to_string(), "-1,-1,1");
    }

    #[test]
    fn test_parse_valid() {
        let v: InputVector = "-1,1,1".parse().unwrap();
        assert_eq!(v, InputVector::new(-1, 1, true).unwrap());
    }

    #[test]
    fn test_parse_wrong_field_count() {
        assert_eq!(
            "1,0".parse::<InputVector>(),
            Err(InputParseError::FieldCount(2))
        );
        assert_eq!(
            "1,0,0,0".parse::<InputVector>(),
            Err(InputParseError::FieldCount(4))
        );
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert!(matches!(
            "2,0,0".parse::<InputVector>(),
            Err(InputParseError::OutOfRange { field: "dx", value: 2 })
        ));
        assert!(matches!(
            "0,0,5".parse::<InputVector>(),
            Err(InputParseError::OutOfRange {
                field: "action",
                value: 5
            })
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            "up,0,0".parse::<InputVector>(),
            Err(InputParseError::NotAnInteger { field: "dx", .. })
        ));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(InputVector::new(0, -2, false).is_err());
    }
}
