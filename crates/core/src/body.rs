use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A point mass with a 2D position, a 2D velocity, and a scalar mass.
///
/// Bodies carry no validation of their own. A non-positive `mass` produces
/// degenerate dynamics rather than a panic, so callers are expected to reject
/// or clamp it before handing bodies to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub mass: f64,
}

impl Body {
    /// Creates a body from its position, velocity, and mass.
    #[must_use]
    pub fn new(x: f64, y: f64, vx: f64, vy: f64, mass: f64) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            mass,
        }
    }

    /// Returns the value of a single field.
    #[must_use]
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::X => self.x,
            Field::Y => self.y,
            Field::Vx => self.vx,
            Field::Vy => self.vy,
            Field::Mass => self.mass,
        }
    }

    /// Overwrites a single field.
    pub fn set(&mut self, field: Field, value: f64) {
        match field {
            Field::X => self.x = value,
            Field::Y => self.y = value,
            Field::Vx => self.vx = value,
            Field::Vy => self.vy = value,
            Field::Mass => self.mass = value,
        }
    }

    /// Returns `true` if every field is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        Field::ALL.iter().all(|&field| self.get(field).is_finite())
    }
}

/// Names one editable field of a [`Body`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    X,
    Y,
    Vx,
    Vy,
    Mass,
}

impl Field {
    /// Every field, in state-vector order followed by mass.
    pub const ALL: [Field; 5] = [Field::X, Field::Y, Field::Vx, Field::Vy, Field::Mass];

    /// Returns the lowercase name of the field.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Field::X => "x",
            Field::Y => "y",
            Field::Vx => "vx",
            Field::Vy => "vy",
            Field::Mass => "mass",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string does not name a [`Field`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown body field `{0}` (expected one of: x, y, vx, vy, mass)")]
pub struct ParseFieldError(pub String);

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseFieldError(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set_address_the_same_field() {
        let mut body = Body::new(1.0, 2.0, 3.0, 4.0, 5.0);

        for (i, field) in Field::ALL.into_iter().enumerate() {
            let value = 10.0 + f64::from(u8::try_from(i).unwrap());
            body.set(field, value);
            assert_eq!(body.get(field), value);
        }

        assert_eq!(body, Body::new(10.0, 11.0, 12.0, 13.0, 14.0));
    }

    #[test]
    fn parses_field_names() {
        assert_eq!("x".parse(), Ok(Field::X));
        assert_eq!("VY".parse(), Ok(Field::Vy));
        assert_eq!(" mass ".parse(), Ok(Field::Mass));
        assert_eq!(
            "speed".parse::<Field>(),
            Err(ParseFieldError("speed".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for field in Field::ALL {
            assert_eq!(field.to_string().parse(), Ok(field));
        }
    }

    #[test]
    fn detects_non_finite_fields() {
        assert!(Body::new(0.0, 0.0, 0.0, 0.0, 1.0).is_finite());
        assert!(!Body::new(f64::NAN, 0.0, 0.0, 0.0, 1.0).is_finite());
        assert!(!Body::new(0.0, 0.0, 0.0, 0.0, f64::INFINITY).is_finite());
    }
}
