//! Triangular lattice dashes.
//!
//! A triangular block with `grid.0` rows has `layers = grid.0 - 1` tiers.
//! Tier `row` holds `row` interior points (`col in 0..row`); tier 0 is the
//! apex and holds none.
//!
//! Three line families meet at every point, so each point carries a
//! three-part index:
//!
//! ```text
//! r_idx = (layers - row) + col
//! l_idx = 2·(layers - 1) - row - r_idx
//! base  = row
//! ```
//!
//! From each point up to three dashes leave, each gated by its own line's
//! start state and the point's column:
//!
//! | dash  | end point                 | gate                     | drawn when            |
//! |-------|---------------------------|--------------------------|-----------------------|
//! | right | `(x + w·right, y + h)`    | `right[l_idx] + col`     | always                |
//! | left  | `(x - w·left, y + h)`     | `left[r_idx] + col`      | `col < row`           |
//! | base  | `(x + w, y)`              | `base[row] + col`        | `row ≥ 1, col < row-1`|
//!
//! The guards keep dashes off the triangle's outer boundary.
//!
//! Point position:
//!
//! ```text
//! x = origin.x + 0.25·total_width + col·step_x + (⌊grid.0 / 2⌋ - row)·mean_slope·w + lw
//! y = origin.y + row·step_y + lw
//! ```
//!
//! The per-tier shift uses the total row count `grid.0`, not `layers`; that
//! is what keeps the apex centred as the tiers widen.

use crate::block::LatticeBlock;
use crate::geometry::Line;
use crate::shape::Axis;

use super::{Dash, start_at, stitch_state};

/// Share of the block width used as a fixed left inset.
const APEX_INSET: f64 = 0.25;

/// The three-axis index of an interior point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriIndex {
    /// `(layers - row) + col`. Selects the start state on the left sequence.
    pub r_idx: usize,
    /// `2·(layers - 1) - row - r_idx`. Selects the start state on the right sequence.
    pub l_idx: usize,
    /// Equal to the tier. Selects the start state on the base sequence.
    pub base: usize,
}

/// Index of point `(row, col)` in a lattice with `layers` tiers.
///
/// `None` unless `col < row < layers`.
pub fn tri_index(layers: usize, row: usize, col: usize) -> Option<TriIndex> {
    if !(col < row && row < layers) {
        return None;
    }
    let r_idx = (layers - row) + col;
    // 2(layers-1) - row - r_idx simplifies to layers - 2 - col, which the
    // bounds above keep non-negative
    let l_idx = (2 * (layers - 1)).checked_sub(row + r_idx)?;
    Some(TriIndex { r_idx, l_idx, base: row })
}

/// Lazy iterator over every candidate dash of a triangular block.
///
/// Points are visited tier by tier, left to right; each point yields its
/// right, left and base dashes in that order (skipping guarded ones).
#[derive(Debug, Clone)]
pub struct TriangleDashes<'a> {
    base: &'a [u32],
    left: &'a [u32],
    right: &'a [u32],
    layers: usize,
    /// x of point (row 0, col 0) before the per-tier shift.
    x0: f64,
    y0: f64,
    /// Horizontal shift per tier step: `mean_slope · w`.
    tier_shift: f64,
    /// `⌊grid.0 / 2⌋`.
    centre_tier: f64,
    cell: (f64, f64),
    slope: (f64, f64),
    step: (f64, f64),
    row: usize,
    col: usize,
    slot: u8,
}

impl<'a> TriangleDashes<'a> {
    pub fn new(block: &'a LatticeBlock) -> Self {
        let (w, h) = block.cell_size();
        let (left_slope, right_slope) = block.slope();
        let origin = block.origin();
        let lw = block.line_width();

        Self {
            base: block.sequence(Axis::Base),
            left: block.sequence(Axis::Left),
            right: block.sequence(Axis::Right),
            layers: block.layers(),
            x0: origin.x + APEX_INSET * block.total_width() + lw,
            y0: origin.y + lw,
            tier_shift: (left_slope + right_slope) / 2.0 * w,
            centre_tier: (block.grid().0 / 2) as f64,
            cell: (w, h),
            slope: (left_slope, right_slope),
            step: (block.column_step(), block.row_step()),
            row: 0,
            col: 0,
            slot: 0,
        }
    }

    /// Position of interior point `(row, col)`.
    #[inline]
    fn point(&self, row: usize, col: usize) -> (f64, f64) {
        let x = self.x0
            + col as f64 * self.step.0
            + (self.centre_tier - row as f64) * self.tier_shift;
        let y = self.y0 + row as f64 * self.step.1;
        (x, y)
    }

    /// Dash number `slot` (0 right, 1 left, 2 base) leaving `(row, col)`,
    /// or `None` where a guard suppresses it.
    fn dash(&self, row: usize, col: usize, slot: u8) -> Option<Dash> {
        let idx = tri_index(self.layers, row, col)?;
        let (x, y) = self.point(row, col);
        let (w, h) = self.cell;

        let (axis, end, start) = match slot {
            0 => (Axis::Right, (x + w * self.slope.1, y + h), start_at(self.right, idx.l_idx)),
            1 if col < row => (Axis::Left, (x - w * self.slope.0, y + h), start_at(self.left, idx.r_idx)),
            2 if row >= 1 && col + 1 < row => (Axis::Base, (x + w, y), start_at(self.base, idx.base)),
            _ => return None,
        };

        Some(Dash {
            axis,
            col,
            row,
            line: Line::new(x, y, end.0, end.1),
            on: stitch_state(start, col),
        })
    }
}

impl Iterator for TriangleDashes<'_> {
    type Item = Dash;

    fn next(&mut self) -> Option<Dash> {
        loop {
            if self.row >= self.layers {
                return None;
            }
            if self.col >= self.row {
                self.row += 1;
                self.col = 0;
                self.slot = 0;
                continue;
            }
            if self.slot > 2 {
                self.col += 1;
                self.slot = 0;
                continue;
            }

            let slot = self.slot;
            self.slot += 1;
            if let Some(dash) = self.dash(self.row, self.col, slot) {
                return Some(dash);
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
    use crate::shape::Shape;

    fn triangle(rows: usize, base: Vec<u32>, left: Vec<u32>, right: Vec<u32>) -> LatticeBlock {
        let config = BlockConfig::new("T", (10.0, 10.0), (rows, rows))
            .with_shape(Shape::Triangle)
            .with_slope((0.5, 0.5));
        LatticeBlock::from_sequences(
            config,
            [(Axis::Base, base), (Axis::Left, left), (Axis::Right, right)],
        )
        .unwrap()
    }

    fn all_on(rows: usize) -> LatticeBlock {
        triangle(rows, vec![1; rows], vec![1; rows], vec![1; rows])
    }

    #[test]
    fn index_identities() {
        for layers in 1..12 {
            for row in 0..layers {
                let mut last_r = None;
                for col in 0..row {
                    let idx = tri_index(layers, row, col).unwrap();
                    assert_eq!(idx.l_idx + idx.r_idx, 2 * (layers - 1) - row);
                    assert_eq!(idx.base, row);
                    assert!(idx.r_idx < layers, "r_idx stays inside a layers-long sequence");
                    if let Some(prev) = last_r {
                        assert!(idx.r_idx > prev, "r_idx must increase with col");
                    }
                    last_r = Some(idx.r_idx);
                }
            }
        }
    }

    #[test]
    fn index_outside_tier_is_none() {
        assert_eq!(tri_index(3, 0, 0), None);
        assert_eq!(tri_index(3, 2, 2), None);
        assert_eq!(tri_index(3, 3, 0), None);
        assert_eq!(tri_index(3, 2, 1), Some(TriIndex { r_idx: 2, l_idx: 0, base: 2 }));
    }

    #[test]
    fn four_row_scenario_visits_three_points() {
        let block = all_on(4);
        assert_eq!(block.layers(), 3);

        let points: BTreeSet<(usize, usize)> =
            TriangleDashes::new(&block).map(|d| (d.row, d.col)).collect();
        assert_eq!(points, [(1, 0), (2, 0), (2, 1)].into_iter().collect());

        let base: Vec<(usize, usize)> = TriangleDashes::new(&block)
            .filter(|d| d.axis == Axis::Base)
            .map(|d| (d.row, d.col))
            .collect();
        assert_eq!(base, vec![(2, 0)]);

        // right + left at every point, base only at (2, 0)
        assert_eq!(TriangleDashes::new(&block).count(), 7);
    }

    #[test]
    fn guards_hold_for_larger_lattices() {
        let block = all_on(12);
        for dash in TriangleDashes::new(&block) {
            assert!(dash.col < dash.row);
            match dash.axis {
                Axis::Base => assert!(dash.row >= 1 && dash.col + 1 < dash.row),
                Axis::Left => assert!(dash.col < dash.row),
                Axis::Right => {}
                other => panic!("unexpected axis {other}"),
            }
        }
    }

    #[test]
    fn gates_read_the_crossed_index() {
        // right[l_idx] + col: (1,0) and (2,0) read right[1], (2,1) reads right[0]
        let block = triangle(4, vec![0; 4], vec![0; 4], vec![0, 1, 0, 0]);
        let right_on: Vec<(usize, usize)> = TriangleDashes::new(&block)
            .filter(|d| d.axis == Axis::Right && d.on)
            .map(|d| (d.row, d.col))
            .collect();
        // (1,0): l=1 -> 1+0 odd ; (2,0): l=1 -> odd ; (2,1): l=0 -> 0+1 odd
        assert_eq!(right_on, vec![(1, 0), (2, 0), (2, 1)]);

        // left[r_idx]: (1,0) r=2, (2,0) r=1, (2,1) r=2
        let block = triangle(4, vec![0; 4], vec![0, 0, 1, 0], vec![0; 4]);
        let left_on: Vec<(usize, usize)> = TriangleDashes::new(&block)
            .filter(|d| d.axis == Axis::Left && d.on)
            .map(|d| (d.row, d.col))
            .collect();
        assert_eq!(left_on, vec![(1, 0)]);
    }

    #[test]
    fn dashes_join_neighbouring_points() {
        let block = all_on(4);
        let dashes: Vec<Dash> = TriangleDashes::new(&block).collect();
        let find = |axis: Axis, row: usize, col: usize| {
            dashes
                .iter()
                .find(|d| d.axis == axis && d.row == row && d.col == col)
                .copied()
                .unwrap()
        };

        // total width 40, inset 10, centre tier 2, shift 5, line width 1
        let p10 = find(Axis::Right, 1, 0);
        assert_eq!(p10.line.start(), Point::new(16.0, 11.0));
        assert_eq!(p10.line.end(), Point::new(21.0, 21.0));

        let left = find(Axis::Left, 1, 0);
        assert_eq!(left.line.end(), Point::new(11.0, 21.0));

        // Right dash from (1,0) lands on (2,1); left dash lands on (2,0)
        assert_eq!(find(Axis::Right, 2, 1).line.start(), p10.line.end());
        assert_eq!(find(Axis::Right, 2, 0).line.start(), left.line.end());

        let base = find(Axis::Base, 2, 0);
        assert_eq!(base.line, Line::new(11.0, 21.0, 21.0, 21.0));
    }

    #[test]
    fn centring_uses_total_row_count() {
        // Odd and even row counts shift tiers by floor(rows / 2)
        for rows in [5usize, 6, 9] {
            let block = all_on(rows);
            let first = TriangleDashes::new(&block).next().unwrap();
            let total_width = rows as f64 * 10.0;
            let expected_x = 0.25 * total_width + ((rows / 2) as f64 - 1.0) * 5.0 + 1.0;
            assert_eq!((first.row, first.col), (1, 0));
            assert!((first.line.x1 - expected_x).abs() < 1e-9);
        }
    }

    #[test]
    fn tiny_triangles_have_no_points() {
        assert_eq!(TriangleDashes::new(&all_on(1)).count(), 0);
        assert_eq!(TriangleDashes::new(&all_on(2)).count(), 0);
    }
}
