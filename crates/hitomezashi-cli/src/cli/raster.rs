//! Raster canvas backed by a tiny-skia pixmap.
//!
//! Shapes tiny-skia can't build (zero-length strokes, degenerate rects,
//! non-finite coordinates) are skipped rather than reported.

use anyhow::{Context, Result};
use image::RgbaImage;
use tiny_skia::{FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};

use hitomezashi::{Canvas, Color, Point};

/// Outline width for filled cells.
const OUTLINE_WIDTH: f32 = 1.0;

pub struct RasterCanvas {
    pixmap: Pixmap,
}

impl RasterCanvas {
    /// A `width × height` canvas cleared to `background`.
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(width, height)
            .with_context(|| format!("Failed to create {}x{} pixmap", width, height))?;
        pixmap.fill(tiny_skia::Color::from_rgba8(
            background.r,
            background.g,
            background.b,
            background.a,
        ));
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Convert to an `image` buffer, undoing tiny-skia's premultiplied alpha.
    pub fn into_image(self) -> Result<RgbaImage> {
        let (width, height) = (self.width(), self.height());
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        RgbaImage::from_raw(width, height, data).context("Failed to create image")
    }

    fn stroke_path(&mut self, builder: PathBuilder, color: Color, width: f32) {
        if color.is_transparent() || !(width > 0.0) {
            return;
        }
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }
}

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint
}

impl Canvas for RasterCanvas {
    fn draw_line(&mut self, start: Point, end: Point, color: Color, width: f64) {
        let mut builder = PathBuilder::new();
        builder.move_to(start.x as f32, start.y as f32);
        builder.line_to(end.x as f32, end.y as f32);
        self.stroke_path(builder, color, width as f32);
    }

    fn draw_filled_rect(&mut self, top_left: Point, bottom_right: Point, fill: Color, outline: Color) {
        if !(bottom_right.x > top_left.x && bottom_right.y > top_left.y) {
            return;
        }
        let Some(rect) = Rect::from_ltrb(
            top_left.x as f32,
            top_left.y as f32,
            bottom_right.x as f32,
            bottom_right.y as f32,
        ) else {
            return;
        };

        if !fill.is_transparent() {
            self.pixmap.fill_rect(rect, &paint(fill), Transform::identity(), None);
        }
        let mut builder = PathBuilder::new();
        builder.push_rect(rect);
        self.stroke_path(builder, outline, OUTLINE_WIDTH);
    }

    fn draw_polygon(&mut self, vertices: &[Point], fill: Color, outline: Color) {
        let [first, rest @ ..] = vertices else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(first.x as f32, first.y as f32);
        for p in rest {
            builder.line_to(p.x as f32, p.y as f32);
        }
        builder.close();

        if !fill.is_transparent() {
            if let Some(path) = builder.clone().finish() {
                self.pixmap.fill_path(&path, &paint(fill), FillRule::Winding, Transform::identity(), None);
            }
        }
        self.stroke_path(builder, outline, OUTLINE_WIDTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn starts_as_background() {
        let canvas = RasterCanvas::new(8, 6, Color::WHITE).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (8, 6));
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn image_buffer_holds_every_pixel() {
        let image = RasterCanvas::new(37, 11, Color::BLUE).unwrap().into_image().unwrap();
        assert_eq!(image.dimensions(), (37, 11));
        assert_eq!(image.as_raw().len(), 37 * 11 * 4);
    }

    #[test]
    fn zero_size_is_an_error() {
        assert!(RasterCanvas::new(0, 10, Color::WHITE).is_err());
    }

    #[test]
    fn filled_rect_covers_its_interior() {
        let mut canvas = RasterCanvas::new(20, 20, Color::WHITE).unwrap();
        canvas.draw_filled_rect(Point::new(4.0, 4.0), Point::new(16.0, 16.0), Color::BLUE, Color::TRANSPARENT);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(10, 10), &Rgba([0, 0, 255, 255]));
        assert_eq!(image.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn lines_are_stroked() {
        let mut canvas = RasterCanvas::new(20, 20, Color::WHITE).unwrap();
        canvas.draw_line(Point::new(0.0, 10.0), Point::new(20.0, 10.0), Color::BLACK, 4.0);
        let image = canvas.into_image().unwrap();
        assert_eq!(image.get_pixel(10, 10), &Rgba([0, 0, 0, 255]));
        assert_eq!(image.get_pixel(10, 2), &Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn degenerate_shapes_are_skipped() {
        let mut canvas = RasterCanvas::new(10, 10, Color::WHITE).unwrap();
        canvas.draw_polygon(&[], Color::BLACK, Color::BLACK);
        canvas.draw_filled_rect(Point::new(5.0, 5.0), Point::new(5.0, 5.0), Color::BLACK, Color::BLACK);
        canvas.draw_line(Point::new(1.0, 1.0), Point::new(9.0, 9.0), Color::TRANSPARENT, 2.0);
        let image = canvas.into_image().unwrap();
        assert!(image.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }
}
