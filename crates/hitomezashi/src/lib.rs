//! # hitomezashi
//!
//! Start-state generation and stitch geometry for hitomezashi patterns:
//! dashed lines over a square or triangular lattice, where every line's
//! on/off phase comes from a per-axis start-state sequence.
//!
//! ```
//! use hitomezashi::{Axis, BlockConfig, GenerationPolicy, LatticeBlock, RecordingCanvas, Rng};
//!
//! let policy = GenerationPolicy::randomized([(Axis::Column, 34.0), (Axis::Row, 46.0)]);
//! let block = LatticeBlock::new(BlockConfig::new("A", (20.0, 20.0), (10, 10)), &policy, &mut Rng::new(7))?;
//!
//! let mut canvas = RecordingCanvas::new();
//! hitomezashi::draw_stitches(&block, &mut canvas);
//! # Ok::<(), hitomezashi::HitomezashiError>(())
//! ```
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod block;
pub mod canvas;
pub mod cells;
pub mod cloth;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod shape;
pub mod start_state;
pub mod stitch;

// Re-export common types at crate root for convenience.
pub use block::{BlockConfig, LatticeBlock};
pub use canvas::{Canvas, DrawCall, RecordingCanvas, SvgCanvas};
pub use cells::draw_cells;
pub use cloth::{Cloth, Offsets};
pub use error::{HitomezashiError, Result};
pub use geometry::{Color, Line, Point};
pub use rng::{RandomSource, Rng};
pub use shape::{Axis, Shape};
pub use start_state::{AxisSequence, GenerationPolicy, modular_sequence};
pub use stitch::{Dash, dashes, draw_stitches};
