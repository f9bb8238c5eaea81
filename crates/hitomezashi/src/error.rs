//! Error type for block construction and start-state generation.
//!
//! ## Rust Lesson #20: Error Handling
//!
//! Rust uses `Result<T, E>` instead of exceptions. `thiserror` writes the
//! `Display` and `std::error::Error` impls from the `#[error(...)]` attributes,
//! so each variant carries its own message.
//!
//! Every variant here is a configuration mistake surfaced at construction
//! time. Once a block exists, rendering it cannot fail.

use thiserror::Error;

use crate::shape::Axis;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum HitomezashiError {
    /// Explicit policy chosen without a sequence for this axis.
    #[error("no start-state pattern provided for the {0} axis")]
    MissingPattern(Axis),

    /// Alternating policy chosen without a first state for this axis.
    #[error("no first state provided for the {0} axis")]
    MissingFirstState(Axis),

    /// Randomized policy chosen without a usable (positive, finite) threshold.
    #[error("no positive threshold provided for the {0} axis")]
    MissingThreshold(Axis),

    #[error("{axis} sequence has {actual} entries, expected {expected}")]
    DimensionMismatch {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported shape '{0}' (expected square or triangle)")]
    InvalidShape(String),

    #[error("grid dimensions must be positive, got ({0}, {1})")]
    InvalidGrid(usize, usize),

    #[error("{0} must be finite")]
    NonFinite(&'static str),

    #[error("{0} must be positive")]
    NonPositive(&'static str),

    #[error("cell ({col}, {row}) is outside the block")]
    CellOutOfRange { col: usize, row: usize },

    #[error("a block named '{0}' already exists")]
    DuplicateBlock(String),
}

pub type Result<T> = std::result::Result<T, HitomezashiError>;
