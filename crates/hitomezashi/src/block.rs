//! Lattice blocks: the geometric descriptor a pattern is stitched over.
//!
//! A block is a rectangular run of identical cells. Its geometry (cell size,
//! origin, grid, skip, slope) is fixed once built; only the per-cell fill
//! mask can change afterwards.
//!
//! ## Grid convention
//!
//! `grid` is read differently per shape:
//! - Square: `(columns, rows)`. The column axis has `grid.0` lines, the row
//!   axis `grid.1`.
//! - Triangle: `(rows, vertical cells)`. `grid.0` is the total row count and
//!   the dimension of all three axes; `grid.1` only sets the block's vertical
//!   extent and the size of the fill mask.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HitomezashiError, Result};
use crate::geometry::{Color, Point};
use crate::rng::{RandomSource, Rng};
use crate::shape::{Axis, Shape};
use crate::start_state::{self, AxisSequence, GenerationPolicy};

/// Geometry and styling of a block, before start states are attached.
///
/// Deserializes straight from a recipe; omitted fields take the defaults
/// listed on each field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockConfig {
    pub name: String,
    /// Cell width and height in pixels.
    pub cell_size: (f64, f64),
    /// Top-left corner of the block. Default (0, 0).
    #[serde(default)]
    pub origin: Point,
    /// See the module docs for how each shape reads this.
    pub grid: (usize, usize),
    /// Cells skipped between neighbours, for interleaving blocks. Default (0, 0).
    #[serde(default)]
    pub skip: (usize, usize),
    #[serde(default)]
    pub shape: Shape,
    /// Gradients of the left and right cell edges. Default (0, 0).
    #[serde(default)]
    pub slope: (f64, f64),
    /// Default 1.
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    /// Default black.
    #[serde(default = "default_line_color")]
    pub line_color: Color,
}

fn default_line_width() -> f64 {
    1.0
}

fn default_line_color() -> Color {
    Color::BLACK
}

impl BlockConfig {
    /// A square block at the origin with default styling.
    pub fn new(name: impl Into<String>, cell_size: (f64, f64), grid: (usize, usize)) -> Self {
        Self {
            name: name.into(),
            cell_size,
            origin: Point::default(),
            grid,
            skip: (0, 0),
            shape: Shape::Square,
            slope: (0.0, 0.0),
            line_width: default_line_width(),
            line_color: default_line_color(),
        }
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_skip(mut self, skip: (usize, usize)) -> Self {
        self.skip = skip;
        self
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_slope(mut self, slope: (f64, f64)) -> Self {
        self.slope = slope;
        self
    }

    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    pub fn with_line_color(mut self, line_color: Color) -> Self {
        self.line_color = line_color;
        self
    }

    /// `(axis, line count)` for every axis the shape needs, in generation order.
    pub fn axis_dimensions(&self) -> Vec<(Axis, usize)> {
        self.shape
            .axes()
            .iter()
            .map(|&axis| (axis, axis_dimension(self.shape, self.grid, axis)))
            .collect()
    }

    /// Check everything that doesn't depend on start states.
    pub fn validate(&self) -> Result<()> {
        let (g0, g1) = self.grid;
        if g0 == 0 || g1 == 0 {
            return Err(HitomezashiError::InvalidGrid(g0, g1));
        }

        let (w, h) = self.cell_size;
        if !(w.is_finite() && h.is_finite()) {
            return Err(HitomezashiError::NonFinite("cell size"));
        }
        if w <= 0.0 || h <= 0.0 {
            return Err(HitomezashiError::NonPositive("cell size"));
        }
        if !self.origin.is_finite() {
            return Err(HitomezashiError::NonFinite("origin"));
        }
        if !(self.slope.0.is_finite() && self.slope.1.is_finite()) {
            return Err(HitomezashiError::NonFinite("slope"));
        }
        if !self.line_width.is_finite() {
            return Err(HitomezashiError::NonFinite("line width"));
        }
        Ok(())
    }
}

/// Number of lattice lines along `axis`.
///
/// Axes that don't belong to `shape` have no lines.
pub fn axis_dimension(shape: Shape, grid: (usize, usize), axis: Axis) -> usize {
    match (shape, axis) {
        (Shape::Square, Axis::Column) => grid.0,
        (Shape::Square, Axis::Row) => grid.1,
        (Shape::Triangle, Axis::Base | Axis::Left | Axis::Right) => grid.0,
        _ => 0,
    }
}

/// A validated block with its start states and fill mask.
#[derive(Debug, Clone, PartialEq)]
pub struct LatticeBlock {
    config: BlockConfig,
    sequences: BTreeMap<Axis, AxisSequence>,
    /// Indexed `[col][row]`.
    fill: Vec<Vec<Color>>,
}

impl LatticeBlock {
    /// Validate `config` and populate start states under `policy`.
    ///
    /// `rng` is only drawn from by the randomized policy.
    pub fn new<R: RandomSource + ?Sized>(
        config: BlockConfig,
        policy: &GenerationPolicy,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;
        let sequences = start_state::generate(policy, &config.axis_dimensions(), rng)?;

        debug!(
            block = %config.name,
            shape = %config.shape,
            policy = policy.name(),
            grid = ?config.grid,
            "built lattice block"
        );

        let fill = empty_mask(config.grid);
        Ok(Self { config, sequences, fill })
    }

    /// Build with caller-supplied sequences (the explicit policy).
    pub fn from_sequences<I>(config: BlockConfig, sequences: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Axis, AxisSequence)>,
    {
        let policy = GenerationPolicy::explicit(sequences);
        Self::new(config, &policy, &mut Rng::default())
    }

    pub fn config(&self) -> &BlockConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn shape(&self) -> Shape {
        self.config.shape
    }

    pub fn cell_size(&self) -> (f64, f64) {
        self.config.cell_size
    }

    pub fn origin(&self) -> Point {
        self.config.origin
    }

    pub fn grid(&self) -> (usize, usize) {
        self.config.grid
    }

    pub fn skip(&self) -> (usize, usize) {
        self.config.skip
    }

    pub fn slope(&self) -> (f64, f64) {
        self.config.slope
    }

    pub fn line_width(&self) -> f64 {
        self.config.line_width
    }

    pub fn line_color(&self) -> Color {
        self.config.line_color
    }

    /// Start states for `axis`. Empty for axes the shape doesn't use.
    pub fn sequence(&self, axis: Axis) -> &[u32] {
        self.sequences.get(&axis).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All start-state sequences, keyed by axis.
    pub fn sequences(&self) -> &BTreeMap<Axis, AxisSequence> {
        &self.sequences
    }

    pub fn axis_dimension(&self, axis: Axis) -> usize {
        axis_dimension(self.config.shape, self.config.grid, axis)
    }

    /// Horizontal tiers of a triangular block (`grid.0 - 1`).
    pub fn layers(&self) -> usize {
        self.config.grid.0.saturating_sub(1)
    }

    /// Horizontal distance between neighbouring columns, skip included.
    pub fn column_step(&self) -> f64 {
        (1 + self.config.skip.0) as f64 * self.config.cell_size.0
    }

    /// Vertical distance between neighbouring rows, skip included.
    pub fn row_step(&self) -> f64 {
        (1 + self.config.skip.1) as f64 * self.config.cell_size.1
    }

    /// Width covered by the block: `grid.0` column steps.
    pub fn total_width(&self) -> f64 {
        self.config.grid.0 as f64 * self.column_step()
    }

    /// Height covered by the block: `grid.1` row steps.
    pub fn total_height(&self) -> f64 {
        self.config.grid.1 as f64 * self.row_step()
    }

    /// Bottom-right corner of the block, derived fresh on every call.
    pub fn extent(&self) -> Point {
        Point::new(
            self.config.origin.x + self.total_width(),
            self.config.origin.y + self.total_height(),
        )
    }

    /// Fill color of a cell. Transparent if never set or out of range.
    pub fn fill_color(&self, col: usize, row: usize) -> Color {
        self.fill
            .get(col)
            .and_then(|column| column.get(row))
            .copied()
            .unwrap_or(Color::TRANSPARENT)
    }

    pub fn set_fill(&mut self, col: usize, row: usize, color: Color) -> Result<()> {
        let cell = self
            .fill
            .get_mut(col)
            .and_then(|column| column.get_mut(row))
            .ok_or(HitomezashiError::CellOutOfRange { col, row })?;
        *cell = color;
        Ok(())
    }

    /// Reset every cell to transparent.
    pub fn clear(&mut self) {
        self.fill = empty_mask(self.config.grid);
    }
}

fn empty_mask(grid: (usize, usize)) -> Vec<Vec<Color>> {
    vec![vec![Color::TRANSPARENT; grid.1]; grid.0]
}
