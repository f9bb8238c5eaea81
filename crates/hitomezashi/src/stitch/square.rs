//! Square lattice dashes.
//!
//! Interior vertical lines sit at `x = origin.x + (col+1)·step_x + lw` for
//! `col in 0..W-1`, interior horizontal lines at
//! `y = origin.y + (row+1)·step_y + lw` for `row in 0..H-1`. The outer
//! border (`col = W-1`, `row = H-1`) is never stitched.
//!
//! - Vertical dash `(col, row)`: `(x, y) → (x, y + h)`, on when
//!   `(column[col] + row) mod 2 == 1`.
//! - Horizontal dash `(col, row)`: `(x, y) → (x + w, y)`, on when
//!   `(row[row] + col) mod 2 == 1`.
//!
//! All vertical dashes come first (column-major), then all horizontal dashes
//! (row-major).

use crate::block::LatticeBlock;
use crate::geometry::Line;
use crate::shape::Axis;

use super::{Dash, start_at, stitch_state};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Vertical,
    Horizontal,
    Done,
}

/// Lazy iterator over every candidate dash of a square block.
#[derive(Debug, Clone)]
pub struct SquareDashes<'a> {
    columns: &'a [u32],
    rows: &'a [u32],
    /// Interior line counts: `(W-1, H-1)`.
    interior: (usize, usize),
    origin: (f64, f64),
    cell: (f64, f64),
    step: (f64, f64),
    line_width: f64,
    pass: Pass,
    outer: usize,
    inner: usize,
}

impl<'a> SquareDashes<'a> {
    pub fn new(block: &'a LatticeBlock) -> Self {
        let (cols, rows) = block.grid();
        let origin = block.origin();
        Self {
            columns: block.sequence(Axis::Column),
            rows: block.sequence(Axis::Row),
            interior: (cols.saturating_sub(1), rows.saturating_sub(1)),
            origin: (origin.x, origin.y),
            cell: block.cell_size(),
            step: (block.column_step(), block.row_step()),
            line_width: block.line_width(),
            pass: Pass::Vertical,
            outer: 0,
            inner: 0,
        }
    }

    #[inline]
    fn x(&self, col: usize) -> f64 {
        self.origin.0 + (col + 1) as f64 * self.step.0 + self.line_width
    }

    #[inline]
    fn y(&self, row: usize) -> f64 {
        self.origin.1 + (row + 1) as f64 * self.step.1 + self.line_width
    }

    fn vertical(&self, col: usize, row: usize) -> Dash {
        let (x, y) = (self.x(col), self.y(row));
        Dash {
            axis: Axis::Column,
            col,
            row,
            line: Line::new(x, y, x, y + self.cell.1),
            on: stitch_state(start_at(self.columns, col), row),
        }
    }

    fn horizontal(&self, col: usize, row: usize) -> Dash {
        let (x, y) = (self.x(col), self.y(row));
        Dash {
            axis: Axis::Row,
            col,
            row,
            line: Line::new(x, y, x + self.cell.0, y),
            on: stitch_state(start_at(self.rows, row), col),
        }
    }
}

impl Iterator for SquareDashes<'_> {
    type Item = Dash;

    fn next(&mut self) -> Option<Dash> {
        let (inner_cols, inner_rows) = self.interior;
        loop {
            match self.pass {
                Pass::Vertical => {
                    // outer = col, inner = row
                    if self.outer >= inner_cols {
                        self.pass = Pass::Horizontal;
                        self.outer = 0;
                        self.inner = 0;
                    } else if self.inner >= inner_rows {
                        self.outer += 1;
                        self.inner = 0;
                    } else {
                        let dash = self.vertical(self.outer, self.inner);
                        self.inner += 1;
                        return Some(dash);
                    }
                }
                Pass::Horizontal => {
                    // outer = row, inner = col
                    if self.outer >= inner_rows {
                        self.pass = Pass::Done;
                    } else if self.inner >= inner_cols {
                        self.outer += 1;
                        self.inner = 0;
                    } else {
                        let dash = self.horizontal(self.inner, self.outer);
                        self.inner += 1;
                        return Some(dash);
                    }
                }
                Pass::Done => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::block::BlockConfig;
    use crate::geometry::Point;
    use crate::rng::Rng;
    use crate::start_state::GenerationPolicy;

    fn block(grid: (usize, usize), columns: Vec<u32>, rows: Vec<u32>) -> LatticeBlock {
        LatticeBlock::from_sequences(
            BlockConfig::new("A", (10.0, 10.0), grid),
            [(Axis::Column, columns), (Axis::Row, rows)],
        )
        .unwrap()
    }

    fn on_set(block: &LatticeBlock, axis: Axis) -> BTreeSet<(usize, usize)> {
        SquareDashes::new(block)
            .filter(|d| d.on && d.axis == axis)
            .map(|d| (d.col, d.row))
            .collect()
    }

    #[test]
    fn four_by_four_scenario() {
        let b = block((4, 4), vec![1, 0, 1], vec![0, 1, 0]);

        let vertical: BTreeSet<_> = [(0, 0), (0, 2), (1, 1), (2, 0), (2, 2)].into_iter().collect();
        let horizontal: BTreeSet<_> = [(1, 0), (0, 1), (2, 1), (1, 2)].into_iter().collect();
        assert_eq!(on_set(&b, Axis::Column), vertical);
        assert_eq!(on_set(&b, Axis::Row), horizontal);

        // 3 interior columns * 3 rows, twice
        assert_eq!(SquareDashes::new(&b).count(), 18);
    }

    #[test]
    fn border_is_never_drawn() {
        let policy = GenerationPolicy::randomized([(Axis::Column, 30.0), (Axis::Row, 55.0)]);
        let b = LatticeBlock::new(
            BlockConfig::new("A", (10.0, 10.0), (7, 5)),
            &policy,
            &mut Rng::new(11),
        )
        .unwrap();

        for dash in SquareDashes::new(&b) {
            assert!(dash.col < 6, "col {} on the border", dash.col);
            assert!(dash.row < 4, "row {} on the border", dash.row);
        }
    }

    #[test]
    fn state_is_pure_function_and_alternates() {
        let b = block((6, 6), vec![1, 0, 3, 2, 1, 0], vec![0; 6]);
        let columns = b.sequence(Axis::Column).to_vec();

        let vertical: Vec<Dash> = SquareDashes::new(&b).filter(|d| d.axis == Axis::Column).collect();
        for dash in &vertical {
            assert_eq!(dash.on, (columns[dash.col] + dash.row as u32) % 2 == 1);
        }
        for pair in vertical.windows(2) {
            if pair[0].col == pair[1].col {
                assert_eq!(pair[1].row, pair[0].row + 1);
                assert_ne!(pair[0].on, pair[1].on, "state must flip each row");
            }
        }
    }

    #[test]
    fn coordinates_include_skip_and_line_width() {
        let config = BlockConfig::new("A", (10.0, 20.0), (3, 3))
            .with_origin(Point::new(100.0, 50.0))
            .with_skip((1, 0))
            .with_line_width(2.0);
        let b = LatticeBlock::from_sequences(
            config,
            [(Axis::Column, vec![1, 1, 1]), (Axis::Row, vec![1, 1, 1])],
        )
        .unwrap();

        let first = SquareDashes::new(&b).next().unwrap();
        assert_eq!(first.axis, Axis::Column);
        // x = 100 + 1 * (1 + 1) * 10 + 2 ; y = 50 + 1 * 20 + 2
        assert_eq!(first.line, Line::new(122.0, 72.0, 122.0, 92.0));

        let horizontal = SquareDashes::new(&b).find(|d| d.axis == Axis::Row).unwrap();
        assert_eq!(horizontal.line, Line::new(122.0, 72.0, 132.0, 72.0));
    }

    #[test]
    fn single_cell_grid_has_no_dashes() {
        let b = block((1, 1), vec![1], vec![1]);
        assert_eq!(SquareDashes::new(&b).count(), 0);

        let thin = block((5, 1), vec![1; 5], vec![1]);
        assert_eq!(SquareDashes::new(&thin).count(), 0);
    }
}
