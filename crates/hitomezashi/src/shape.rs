//! Lattice shapes and the axes each one needs start states for.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::HitomezashiError;

/// The kind of lattice a block is laid out on.
///
/// This is a closed set: renderers match on it exhaustively, so adding a
/// variant is a compile error everywhere it isn't handled yet.
///
/// Serde goes through [`Shape::from_name`], so recipes get the same
/// case-insensitive names and aliases as the command line, and an unknown
/// name fails with [`HitomezashiError::InvalidShape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Shape {
    /// Orthogonal rows and columns.
    #[default]
    Square,
    /// Three families of lines (base, left, right) meeting at each point.
    Triangle,
}

/// One family of parallel lattice lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal lines of a square lattice.
    Row,
    /// Vertical lines of a square lattice.
    Column,
    /// Horizontal lines of a triangular lattice.
    Base,
    /// Lines running down and to the left.
    Left,
    /// Lines running down and to the right.
    Right,
}

impl Shape {
    /// Get all supported shapes.
    pub fn all() -> &'static [Shape] {
        &[Shape::Square, Shape::Triangle]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Square => "square",
            Shape::Triangle => "triangle",
        }
    }

    /// Parse from a user-facing name, accepting the older aliases.
    pub fn from_name(name: &str) -> Option<Shape> {
        match name.trim().to_lowercase().as_str() {
            "square" | "rectangle" => Some(Shape::Square),
            "triangle" | "trapezoid" => Some(Shape::Triangle),
            _ => None,
        }
    }

    /// The axes that need a start-state sequence, in generation order.
    ///
    /// Randomized policies draw axes in exactly this order, which keeps a
    /// seeded pattern stable across runs.
    pub fn axes(&self) -> &'static [Axis] {
        match self {
            Shape::Square => &[Axis::Column, Axis::Row],
            Shape::Triangle => &[Axis::Base, Axis::Left, Axis::Right],
        }
    }
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Row => "row",
            Axis::Column => "column",
            Axis::Base => "base",
            Axis::Left => "left",
            Axis::Right => "right",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Shape {
    type Err = HitomezashiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shape::from_name(s).ok_or_else(|| HitomezashiError::InvalidShape(s.to_string()))
    }
}

impl TryFrom<String> for Shape {
    type Error = HitomezashiError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl From<Shape> for String {
    fn from(shape: Shape) -> Self {
        shape.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use serde::de::IntoDeserializer;
    use serde::de::value::{Error as ValueError, StrDeserializer};

    use super::*;

    fn deserialize(name: &str) -> Result<Shape, ValueError> {
        let de: StrDeserializer<'_, ValueError> = name.into_deserializer();
        Shape::deserialize(de)
    }

    #[test]
    fn parses_names_and_aliases() {
        assert_eq!("square".parse::<Shape>(), Ok(Shape::Square));
        assert_eq!("Rectangle".parse::<Shape>(), Ok(Shape::Square));
        assert_eq!(" TRIANGLE ".parse::<Shape>(), Ok(Shape::Triangle));
    }

    #[test]
    fn rejects_unknown_shape() {
        assert_eq!(
            "hexagon".parse::<Shape>(),
            Err(HitomezashiError::InvalidShape("hexagon".to_string()))
        );
    }

    #[test]
    fn deserializes_through_from_name() {
        assert_eq!(deserialize("Triangle").unwrap(), Shape::Triangle);
        assert_eq!(deserialize(" SQUARE ").unwrap(), Shape::Square);
        assert_eq!(deserialize("trapezoid").unwrap(), Shape::Triangle);

        let err = deserialize("hexagon").unwrap_err();
        assert_eq!(
            err.to_string(),
            HitomezashiError::InvalidShape("hexagon".to_string()).to_string()
        );
    }

    #[test]
    fn serializes_as_canonical_name() {
        assert_eq!(String::from(Shape::Triangle), "triangle");
        assert_eq!(String::from(Shape::default()), "square");
    }

    #[test]
    fn axes_per_shape() {
        assert_eq!(Shape::Square.axes(), &[Axis::Column, Axis::Row]);
        assert_eq!(Shape::Triangle.axes(), &[Axis::Base, Axis::Left, Axis::Right]);
    }

    #[test]
    fn names_round_trip() {
        for shape in Shape::all() {
            assert_eq!(Shape::from_name(shape.name()), Some(*shape));
        }
    }
}
