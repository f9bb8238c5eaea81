//! Stitch rendering: turning a block's start states into dashes.
//!
//! Each lattice line is a run of dashes that alternate on/off from the line's
//! start state. A dash at offset `k` along a line with start state `s` is on
//! when `(s + k) mod 2 == 1`.
//!
//! [`dashes`] enumerates every candidate dash of a block lazily, on and off
//! alike, so callers can inspect the full lattice. [`draw_stitches`] forwards
//! just the "on" dashes to a [`Canvas`].

mod square;
mod triangle;

pub use square::SquareDashes;
pub use triangle::{TriIndex, TriangleDashes, tri_index};

use tracing::trace;

use crate::block::LatticeBlock;
use crate::canvas::Canvas;
use crate::geometry::Line;
use crate::shape::{Axis, Shape};

/// One candidate dash on the lattice.
///
/// `col`/`row` are the lattice coordinates the dash was generated from: the
/// interior line and cell for square blocks, the tier point for triangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dash {
    /// The line family this dash belongs to.
    pub axis: Axis,
    pub col: usize,
    pub row: usize,
    pub line: Line,
    /// Whether the dash is stitched.
    pub on: bool,
}

/// `(start + offset) mod 2 == 1`.
///
/// Start states above 1 (from the randomized policy) reduce the same way.
#[inline]
pub fn stitch_state(start: u32, offset: usize) -> bool {
    (start as u64 + offset as u64) % 2 == 1
}

/// Start state at `idx`, or 0 past the end of the sequence.
#[inline]
pub(crate) fn start_at(sequence: &[u32], idx: usize) -> u32 {
    sequence.get(idx).copied().unwrap_or(0)
}

/// Candidate dashes of a block, whichever shape it is.
#[derive(Debug, Clone)]
pub enum Dashes<'a> {
    Square(SquareDashes<'a>),
    Triangle(TriangleDashes<'a>),
}

impl Iterator for Dashes<'_> {
    type Item = Dash;

    fn next(&mut self) -> Option<Dash> {
        match self {
            Dashes::Square(inner) => inner.next(),
            Dashes::Triangle(inner) => inner.next(),
        }
    }
}

/// Enumerate every candidate dash of `block`, dispatching on its shape.
pub fn dashes(block: &LatticeBlock) -> Dashes<'_> {
    match block.shape() {
        Shape::Square => Dashes::Square(SquareDashes::new(block)),
        Shape::Triangle => Dashes::Triangle(TriangleDashes::new(block)),
    }
}

/// Draw every "on" dash of `block` onto `canvas`.
///
/// Returns the number of dashes drawn.
pub fn draw_stitches<C: Canvas + ?Sized>(block: &LatticeBlock, canvas: &mut C) -> usize {
    let color = block.line_color();
    let width = block.line_width();

    let mut drawn = 0;
    for dash in dashes(block).filter(|d| d.on) {
        canvas.draw_line(dash.line.start(), dash.line.end(), color, width);
        drawn += 1;
    }

    trace!(block = block.name(), shape = %block.shape(), drawn, "drew stitches");
    drawn
}
