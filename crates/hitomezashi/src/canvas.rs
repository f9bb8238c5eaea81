//! The drawing surface the renderers write to.
//!
//! The core never owns pixels. It emits draw calls against anything that
//! implements [`Canvas`]; the CLI provides a raster implementation, and this
//! module provides two lightweight ones:
//!
//! - [`RecordingCanvas`] keeps every call, for tests and JSON dumps.
//! - [`SvgCanvas`] writes SVG elements into a string.

use serde::Serialize;

use crate::geometry::{Color, Line, Point};

/// A surface that can draw lines, rectangles and polygons.
///
/// Drawing never fails from the caller's point of view; an implementation
/// that can't represent a shape should skip it.
pub trait Canvas {
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: f64);

    fn draw_filled_rect(&mut self, top_left: Point, bottom_right: Point, fill: Color, outline: Color);

    fn draw_polygon(&mut self, vertices: &[Point], fill: Color, outline: Color);
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: f64) {
        (**self).draw_line(start, end, color, width);
    }

    fn draw_filled_rect(&mut self, top_left: Point, bottom_right: Point, fill: Color, outline: Color) {
        (**self).draw_filled_rect(top_left, bottom_right, fill, outline);
    }

    fn draw_polygon(&mut self, vertices: &[Point], fill: Color, outline: Color) {
        (**self).draw_polygon(vertices, fill, outline);
    }
}

/// One recorded canvas call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCall {
    Line {
        line: Line,
        color: Color,
        width: f64,
    },
    FilledRect {
        top_left: Point,
        bottom_right: Point,
        fill: Color,
        outline: Color,
    },
    Polygon {
        vertices: Vec<Point>,
        fill: Color,
        outline: Color,
    },
}

/// Canvas that remembers what was drawn, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Just the line segments, in draw order.
    pub fn lines(&self) -> Vec<Line> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line { line, .. } => Some(*line),
                _ => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: f64) {
        self.calls.push(DrawCall::Line { line: Line::between(start, end), color, width });
    }

    fn draw_filled_rect(&mut self, top_left: Point, bottom_right: Point, fill: Color, outline: Color) {
        self.calls.push(DrawCall::FilledRect { top_left, bottom_right, fill, outline });
    }

    fn draw_polygon(&mut self, vertices: &[Point], fill: Color, outline: Color) {
        self.calls.push(DrawCall::Polygon { vertices: vertices.to_vec(), fill, outline });
    }
}

/// Canvas that builds an SVG document.
///
/// Elements are appended as they're drawn; [`SvgCanvas::finish`] wraps them
/// in an `<svg>` root sized to the canvas.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    background: Color,
    body: String,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self { width, height, background, body: String::new() }
    }

    /// Produce the complete SVG document.
    pub fn finish(self) -> String {
        let mut svg = String::new();
        svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
"#,
            w = self.width,
            h = self.height,
        ));
        if !self.background.is_transparent() {
            svg.push_str(&format!(
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
                self.background.to_hex()
            ));
        }
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

/// `fill="..."` plus opacity, or `fill="none"` for transparent colors.
fn paint_attr(name: &str, color: Color) -> String {
    if color.is_transparent() {
        format!("{name}=\"none\"")
    } else if color.a == 255 {
        format!("{name}=\"{}\"", color.to_hex())
    } else {
        format!("{name}=\"{}\" {name}-opacity=\"{:.3}\"", color.to_hex(), color.opacity())
    }
}

impl Canvas for SvgCanvas {
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: f64) {
        self.body.push_str(&format!(
            "  <line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" {} stroke-width=\"{}\"/>\n",
            start.x,
            start.y,
            end.x,
            end.y,
            paint_attr("stroke", color),
            width
        ));
    }

    fn draw_filled_rect(&mut self, top_left: Point, bottom_right: Point, fill: Color, outline: Color) {
        self.body.push_str(&format!(
            "  <rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" {} {}/>\n",
            top_left.x,
            top_left.y,
            (bottom_right.x - top_left.x).max(0.0),
            (bottom_right.y - top_left.y).max(0.0),
            paint_attr("fill", fill),
            paint_attr("stroke", outline)
        ));
    }

    fn draw_polygon(&mut self, vertices: &[Point], fill: Color, outline: Color) {
        if vertices.len() < 3 {
            return;
        }

        // Build points string: "x1,y1 x2,y2 x3,y3 ..."
        let points: String = vertices
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" ");

        self.body.push_str(&format!(
            "  <polygon points=\"{}\" {} {}/>\n",
            points,
            paint_attr("fill", fill),
            paint_attr("stroke", outline)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_order() {
        let mut canvas = RecordingCanvas::new();
        canvas.draw_line(Point::new(0.0, 0.0), Point::new(1.0, 0.0), Color::BLACK, 1.0);
        canvas.draw_filled_rect(Point::new(0.0, 0.0), Point::new(2.0, 2.0), Color::BLUE, Color::BLACK);
        canvas.draw_line(Point::new(0.0, 1.0), Point::new(1.0, 1.0), Color::BLACK, 1.0);

        assert_eq!(canvas.len(), 3);
        assert_eq!(
            canvas.lines(),
            vec![Line::new(0.0, 0.0, 1.0, 0.0), Line::new(0.0, 1.0, 1.0, 1.0)]
        );
    }

    #[test]
    fn borrowed_canvas_forwards() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut borrowed = &mut canvas;
            let tri = [Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(0.0, 1.0)];
            Canvas::draw_polygon(&mut borrowed, &tri, Color::TRANSPARENT, Color::BLACK);
        }
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn svg_document_structure() {
        let mut canvas = SvgCanvas::new(100.0, 50.0, Color::WHITE);
        canvas.draw_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), Color::BLUE, 1.0);
        canvas.draw_filled_rect(Point::new(1.0, 1.0), Point::new(5.0, 5.0), Color::TRANSPARENT, Color::BLACK);
        let svg = canvas.finish();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 100 50\""));
        assert!(svg.contains("<rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>"));
        assert!(svg.contains("<line x1=\"0.00\" y1=\"0.00\" x2=\"10.00\" y2=\"0.00\" stroke=\"#0000ff\""));
        assert!(svg.contains("fill=\"none\" stroke=\"#000000\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn svg_skips_degenerate_polygon() {
        let mut canvas = SvgCanvas::new(10.0, 10.0, Color::TRANSPARENT);
        canvas.draw_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 1.0)], Color::BLUE, Color::BLACK);
        assert!(!canvas.finish().contains("<polygon"));
    }
}
