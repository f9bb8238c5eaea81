//! Cloths: named collections of blocks stitched onto one canvas.
//!
//! A cloth owns its blocks in insertion order and knows how big a canvas
//! they need. Sizes are derived on demand from the blocks every time they
//! are asked for, so adding a block can never leave a stale size behind.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::block::{BlockConfig, LatticeBlock};
use crate::canvas::Canvas;
use crate::cells;
use crate::error::{HitomezashiError, Result};
use crate::geometry::{Color, Point};
use crate::rng::RandomSource;
use crate::shape::Shape;
use crate::start_state::GenerationPolicy;
use crate::stitch;

/// Name given to the single block of a preset cloth.
pub const PRESET_BLOCK: &str = "A";

/// Margins around the stitched area, in pixels.
///
/// Either margin can be omitted in a recipe and keeps its default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Offsets {
    /// Extra canvas width on the right.
    pub width: f64,
    /// Extra canvas height at the bottom.
    pub height: f64,
}

impl Default for Offsets {
    fn default() -> Self {
        Self { width: 200.0, height: 100.0 }
    }
}

/// A named set of blocks drawn together.
#[derive(Debug, Clone, PartialEq)]
pub struct Cloth {
    name: String,
    blocks: Vec<LatticeBlock>,
    pub offsets: Offsets,
    pub background: Color,
}

impl Cloth {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            offsets: Offsets::default(),
            background: Color::WHITE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_offsets(mut self, offsets: Offsets) -> Self {
        self.offsets = offsets;
        self
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Add a block. Block names must be unique within a cloth.
    pub fn add_block(&mut self, block: LatticeBlock) -> Result<()> {
        if self.block(block.name()).is_some() {
            return Err(HitomezashiError::DuplicateBlock(block.name().to_string()));
        }
        debug!(cloth = %self.name, block = block.name(), "added block");
        self.blocks.push(block);
        Ok(())
    }

    pub fn blocks(&self) -> &[LatticeBlock] {
        &self.blocks
    }

    pub fn block(&self, name: &str) -> Option<&LatticeBlock> {
        self.blocks.iter().find(|b| b.name() == name)
    }

    pub fn block_mut(&mut self, name: &str) -> Option<&mut LatticeBlock> {
        self.blocks.iter_mut().find(|b| b.name() == name)
    }

    /// Width and height of the stitched area: the furthest block extents.
    ///
    /// `(0, 0)` for an empty cloth.
    pub fn dimensions(&self) -> (f64, f64) {
        self.blocks.iter().map(LatticeBlock::extent).fold((0.0, 0.0), |(w, h), Point { x, y }| {
            (w.max(x), h.max(y))
        })
    }

    /// Pixel size of a canvas that fits the stitched area plus margins.
    pub fn canvas_size(&self) -> (u32, u32) {
        let (w, h) = self.dimensions();
        (
            (w + self.offsets.width).ceil().max(1.0) as u32,
            (h + self.offsets.height).ceil().max(1.0) as u32,
        )
    }

    /// Draw the stitches of every block, in insertion order.
    pub fn draw_stitches<C: Canvas + ?Sized>(&self, canvas: &mut C) -> usize {
        self.blocks.iter().map(|block| stitch::draw_stitches(block, canvas)).sum()
    }

    /// Draw the filled cells of every block, in insertion order.
    pub fn draw_cells<C: Canvas + ?Sized>(&self, canvas: &mut C) -> usize {
        self.blocks.iter().map(|block| cells::draw_cells(block, canvas)).sum()
    }

    /// Reset every block's fill mask.
    pub fn clear_fills(&mut self) {
        for block in &mut self.blocks {
            block.clear();
        }
    }

    /// A square cloth: one block of `quant × quant` cells at the origin,
    /// stitched in blue.
    pub fn square<R: RandomSource + ?Sized>(
        name: impl Into<String>,
        grid: (usize, usize),
        quant: f64,
        policy: &GenerationPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let config = BlockConfig::new(PRESET_BLOCK, (quant, quant), grid).with_line_color(Color::BLUE);
        let mut cloth = Cloth::new(name);
        cloth.add_block(LatticeBlock::new(config, policy, rng)?)?;
        Ok(cloth)
    }

    /// A triangular cloth: one block whose sides both have gradient `slope`.
    ///
    /// Cells are `quant` wide and `quant · cos(atan(slope))` tall, so the
    /// sloped edges keep unit length.
    pub fn triangle<R: RandomSource + ?Sized>(
        name: impl Into<String>,
        grid: (usize, usize),
        quant: f64,
        slope: f64,
        policy: &GenerationPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        let config = BlockConfig::new(PRESET_BLOCK, (quant, triangle_cell_height(quant, slope)), grid)
            .with_shape(Shape::Triangle)
            .with_slope((slope, slope))
            .with_line_color(Color::BLUE);
        let mut cloth = Cloth::new(name);
        cloth.add_block(LatticeBlock::new(config, policy, rng)?)?;
        Ok(cloth)
    }
}

/// Height of a triangular cell of width `quant` with side gradient `slope`.
pub fn triangle_cell_height(quant: f64, slope: f64) -> f64 {
    quant * slope.atan().cos()
}

/// Grid for a triangle of `rows` rows whose sides have gradient `slope`.
///
/// The vertical cell count shrinks with the cell height so the fill mask
/// covers the same area as the stitches.
pub fn triangle_grid(rows: usize, slope: f64) -> (usize, usize) {
    (rows, (rows as f64 * triangle_cell_height(1.0, slope)).ceil() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RecordingCanvas;
    use crate::rng::Rng;
    use crate::shape::Axis;

    fn alternating_square() -> GenerationPolicy {
        GenerationPolicy::alternating([(Axis::Column, 0), (Axis::Row, 1)])
    }

    #[test]
    fn empty_cloth_has_zero_dimensions() {
        let cloth = Cloth::new("empty");
        assert_eq!(cloth.dimensions(), (0.0, 0.0));
        assert_eq!(cloth.canvas_size(), (200, 100));
    }

    #[test]
    fn dimensions_track_furthest_block() {
        let mut cloth = Cloth::new("two");
        let policy = alternating_square();
        let a = LatticeBlock::new(BlockConfig::new("A", (10.0, 10.0), (5, 5)), &policy, &mut Rng::default()).unwrap();
        cloth.add_block(a).unwrap();
        assert_eq!(cloth.dimensions(), (50.0, 50.0));

        let b = LatticeBlock::new(
            BlockConfig::new("B", (10.0, 10.0), (2, 8)).with_origin(Point::new(60.0, 0.0)),
            &policy,
            &mut Rng::default(),
        )
        .unwrap();
        cloth.add_block(b).unwrap();
        assert_eq!(cloth.dimensions(), (80.0, 80.0));
        assert_eq!(cloth.canvas_size(), (280, 180));
    }

    #[test]
    fn rejects_duplicate_names() {
        let mut cloth = Cloth::square("c", (4, 4), 10.0, &alternating_square(), &mut Rng::default()).unwrap();
        let again = LatticeBlock::new(BlockConfig::new(PRESET_BLOCK, (10.0, 10.0), (2, 2)), &alternating_square(), &mut Rng::default()).unwrap();
        assert_eq!(
            cloth.add_block(again),
            Err(HitomezashiError::DuplicateBlock("A".to_string()))
        );
    }

    #[test]
    fn square_preset() {
        let cloth = Cloth::square("c", (50, 50), 20.0, &alternating_square(), &mut Rng::default()).unwrap();
        let block = cloth.block(PRESET_BLOCK).unwrap();
        assert_eq!(block.cell_size(), (20.0, 20.0));
        assert_eq!(block.line_color(), Color::BLUE);
        assert_eq!(cloth.dimensions(), (1000.0, 1000.0));
    }

    #[test]
    fn triangle_preset_geometry() {
        let policy = GenerationPolicy::randomized([
            (Axis::Base, 17.0),
            (Axis::Left, 67.0),
            (Axis::Right, 50.0),
        ]);
        let grid = triangle_grid(50, 0.5);
        assert_eq!(grid, (50, 45));

        let cloth = Cloth::triangle("t", grid, 20.0, 0.5, &policy, &mut Rng::new(4)).unwrap();
        let block = cloth.block(PRESET_BLOCK).unwrap();
        assert_eq!(block.shape(), Shape::Triangle);
        assert_eq!(block.slope(), (0.5, 0.5));
        assert!((block.cell_size().1 - 17.888_543_8).abs() < 1e-6);
    }

    #[test]
    fn draws_all_blocks_and_clears_fills() {
        let mut cloth = Cloth::square("c", (6, 6), 10.0, &alternating_square(), &mut Rng::default()).unwrap();
        cloth.block_mut(PRESET_BLOCK).unwrap().set_fill(0, 0, Color::BLACK).unwrap();

        let mut canvas = RecordingCanvas::new();
        let stitches = cloth.draw_stitches(&mut canvas);
        let cells = cloth.draw_cells(&mut canvas);
        assert_eq!(cells, 36);
        assert_eq!(canvas.len(), stitches + cells);

        cloth.clear_fills();
        assert_eq!(cloth.block(PRESET_BLOCK).unwrap().fill_color(0, 0), Color::TRANSPARENT);
    }
}
