//! Core geometry types for hitomezashi.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = lets you print with `{:?}`
//! - `Clone` / `Copy` = small stack values can be duplicated implicitly
//! - `PartialEq` = can compare with `==`
//! - `Serialize` / `Deserialize` = serde can read/write it (YAML recipes, JSON dumps)

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates.
///
/// Coordinates are in canvas pixels, y increasing downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// An RGBA color, 8 bits per channel.
///
/// Alpha defaults to fully opaque when omitted from a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// True when both coordinates are finite (no NaN or infinity).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Build a line from two points.
    #[inline]
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    /// Get the start point of the line.
    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    /// Get the end point of the line.
    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }
}

impl Color {
    /// Fully transparent black. The default fill of every cell.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// True when the color would not show up on the canvas.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Format as an SVG/CSS color (`#rrggbb`).
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Opacity in the range [0, 1].
    #[inline]
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_between_points() {
        let line = Line::between(Point::new(1.0, 2.0), Point::new(5.0, 2.0));
        assert_eq!(line.start(), Point::new(1.0, 2.0));
        assert_eq!(line.end(), Point::new(5.0, 2.0));
    }

    #[test]
    fn non_finite_point() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f64::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn color_hex() {
        assert_eq!(Color::BLUE.to_hex(), "#0000ff");
        assert_eq!(Color::rgb(18, 52, 86).to_hex(), "#123456");
    }

    #[test]
    fn default_color_is_transparent() {
        assert!(Color::default().is_transparent());
        assert!(!Color::BLACK.is_transparent());
    }
}
