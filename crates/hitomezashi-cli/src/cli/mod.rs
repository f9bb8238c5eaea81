//! CLI command implementations.
//!
//! This module contains the implementations for the various CLI subcommands:
//! - `render` - Render a multi-block cloth from a YAML recipe
//! - `square` - Render the square preset
//! - `triangle` - Render the triangle preset
//! - `shapes` - List supported shapes and their axes
//! - `example` - Print an example recipe

pub mod common;
pub mod frames;
pub mod presets;
pub mod raster;
pub mod recipe;

pub use presets::{SquareArgs, TriangleArgs, cmd_shapes, cmd_square, cmd_triangle};
pub use recipe::{RenderArgs, cmd_example, cmd_render};
