//! Filled-cell rendering.
//!
//! Independent of the stitches: every cell of a block is drawn with its fill
//! color from the block's mask and outlined in the block's line color. Square
//! blocks draw inset rectangles; triangular blocks draw trapezoids whose left
//! and right edges follow the block's slope, narrowing row by row.

use tracing::trace;

use crate::block::LatticeBlock;
use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::shape::Shape;

/// Draw every cell of `block`. Returns the number of cells drawn.
pub fn draw_cells<C: Canvas + ?Sized>(block: &LatticeBlock, canvas: &mut C) -> usize {
    let drawn = match block.shape() {
        Shape::Square => draw_rect_cells(block, canvas),
        Shape::Triangle => draw_trapezoid_cells(block, canvas),
    };
    trace!(block = block.name(), drawn, "drew cells");
    drawn
}

/// Corners of square cell `(col, row)`, inset by twice the line width.
pub fn rect_cell(block: &LatticeBlock, col: usize, row: usize) -> (Point, Point) {
    let (w, h) = block.cell_size();
    let lw = block.line_width();
    let origin = block.origin();

    let x = origin.x + col as f64 * block.column_step() + 2.0 * lw;
    let y = origin.y + row as f64 * block.row_step() + 2.0 * lw;
    (Point::new(x, y), Point::new(x + w - 2.0 * lw, y + h - 2.0 * lw))
}

/// Vertices of trapezoid cell `(col, row)`, clockwise from top-left.
///
/// Sloping up from left to right is a positive gradient. Each row pulls
/// both sides in by `h · row · gradient`.
pub fn trapezoid_cell(block: &LatticeBlock, col: usize, row: usize) -> [Point; 4] {
    let (w, h) = block.cell_size();
    let (left, right) = block.slope();
    let lw = block.line_width();
    let origin = block.origin();

    let x = origin.x + col as f64 * block.column_step() + lw;
    let y = origin.y + row as f64 * block.row_step() + lw;
    let (top, bottom) = (row as f64, (row + 1) as f64);

    [
        Point::new(x + h * top * left, y),
        Point::new(x + w - h * top * right, y),
        Point::new(x + w - h * bottom * right, y + h),
        Point::new(x + h * bottom * left, y + h),
    ]
}

fn draw_rect_cells<C: Canvas + ?Sized>(block: &LatticeBlock, canvas: &mut C) -> usize {
    let (cols, rows) = block.grid();
    let outline = block.line_color();
    for col in 0..cols {
        for row in 0..rows {
            let (top_left, bottom_right) = rect_cell(block, col, row);
            canvas.draw_filled_rect(top_left, bottom_right, block.fill_color(col, row), outline);
        }
    }
    cols * rows
}

fn draw_trapezoid_cells<C: Canvas + ?Sized>(block: &LatticeBlock, canvas: &mut C) -> usize {
    let (cols, rows) = block.grid();
    let outline = block.line_color();
    for col in 0..cols {
        for row in 0..rows {
            let vertices = trapezoid_cell(block, col, row);
            canvas.draw_polygon(&vertices, block.fill_color(col, row), outline);
        }
    }
    cols * rows
}
