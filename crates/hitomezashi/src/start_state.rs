//! Start-state generation.
//!
//! Every lattice line starts either "on" (1) or "off" (0) and then alternates
//! one dash at a time. The per-axis sequence of starting states is what gives
//! a hitomezashi pattern its character; this module builds those sequences
//! under one of three policies:
//!
//! - **Explicit**: the caller supplies each sequence.
//! - **Alternating**: `seq[i] = (i + first_state) mod 2`.
//! - **Randomized**: `seq[i] = floor(draw / threshold)` with `draw` uniform in
//!   `[0, 100)`.
//!
//! The randomized rule is not a coin flip. Draws below the threshold give 0,
//! and a threshold under 50 can give values above 1 (a threshold of 10 yields
//! values up to 9). Consumers only ever look at `value mod 2`, so the larger
//! values still read as on/off, but the distribution is the one above, not
//! Bernoulli(p).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{HitomezashiError, Result};
use crate::rng::RandomSource;
use crate::shape::Axis;

/// Start states for one axis, one entry per lattice line.
pub type AxisSequence = Vec<u32>;

/// Upper bound (exclusive) of the uniform draw used by the randomized policy.
pub const DRAW_RANGE: f64 = 100.0;

/// How a block's start states are produced.
///
/// Consumed once when the block is built and then dropped.
///
/// In a YAML recipe the variant is picked by a `logic` key:
///
/// ```yaml
/// logic: random
/// thresholds: { column: 34, row: 46 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "logic", rename_all = "lowercase")]
pub enum GenerationPolicy {
    /// Sequences supplied directly by the caller.
    #[serde(alias = "pattern")]
    Explicit {
        #[serde(default)]
        sequences: BTreeMap<Axis, AxisSequence>,
    },
    /// Period-2 sequences starting from a given state per axis.
    #[serde(alias = "alternate")]
    Alternating {
        #[serde(default)]
        first_states: BTreeMap<Axis, u32>,
    },
    /// `floor(draw / threshold)` per line, thresholds in (0, 100).
    #[serde(alias = "random", alias = "rand")]
    Randomized {
        #[serde(default)]
        thresholds: BTreeMap<Axis, f64>,
    },
}

impl GenerationPolicy {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            GenerationPolicy::Explicit { .. } => "explicit",
            GenerationPolicy::Alternating { .. } => "alternating",
            GenerationPolicy::Randomized { .. } => "randomized",
        }
    }

    /// Explicit policy from `(axis, sequence)` pairs.
    pub fn explicit<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = (Axis, AxisSequence)>,
    {
        GenerationPolicy::Explicit { sequences: sequences.into_iter().collect() }
    }

    /// Alternating policy from `(axis, first_state)` pairs.
    pub fn alternating<I>(first_states: I) -> Self
    where
        I: IntoIterator<Item = (Axis, u32)>,
    {
        GenerationPolicy::Alternating { first_states: first_states.into_iter().collect() }
    }

    /// Randomized policy from `(axis, threshold)` pairs.
    pub fn randomized<I>(thresholds: I) -> Self
    where
        I: IntoIterator<Item = (Axis, f64)>,
    {
        GenerationPolicy::Randomized { thresholds: thresholds.into_iter().collect() }
    }
}

/// Period-2 sequence: `seq[i] = (i + first_state) mod 2`.
pub fn alternating_sequence(len: usize, first_state: u32) -> AxisSequence {
    (0..len).map(|i| ((i as u64 + first_state as u64) % 2) as u32).collect()
}

/// `len` independent draws in `[0, 100)`, each mapped to `floor(draw / threshold)`.
///
/// The threshold is assumed to be positive and finite; [`generate`] checks that
/// before calling this.
pub fn randomized_sequence<R: RandomSource + ?Sized>(
    len: usize,
    threshold: f64,
    rng: &mut R,
) -> AxisSequence {
    (0..len)
        .map(|_| {
            let draw = rng.next_range(0.0, DRAW_RANGE);
            (draw / threshold).floor() as u32
        })
        .collect()
}

/// Sequence from a modular rule: entry `k` (1-based) is on when
/// `k mod modulo > cutoff`.
///
/// With `cutoff >= modulo` nothing is ever on. A modulo of zero is treated as
/// "no rule" and gives all zeros.
pub fn modular_sequence(len: usize, modulo: u32, cutoff: u32) -> AxisSequence {
    if modulo == 0 {
        return vec![0; len];
    }
    (1..=len as u64)
        .map(|k| u32::from(k % modulo as u64 > cutoff as u64))
        .collect()
}

/// Check a sequence against the dimension of its axis.
///
/// A full-length sequence (`dimension` entries) is what the policies produce.
/// One entry fewer is also accepted: the border line is never drawn, so its
/// start state is never read.
pub fn check_length(axis: Axis, dimension: usize, sequence: &[u32]) -> Result<()> {
    let actual = sequence.len();
    if actual == dimension || actual + 1 == dimension {
        Ok(())
    } else {
        Err(HitomezashiError::DimensionMismatch { axis, expected: dimension, actual })
    }
}

/// Produce one sequence per `(axis, dimension)` pair under `policy`.
///
/// Axes are processed in the order given, so a seeded source always lands
/// the same draws on the same axes. All inputs are validated before any
/// random value is consumed.
pub fn generate<R: RandomSource + ?Sized>(
    policy: &GenerationPolicy,
    axes: &[(Axis, usize)],
    rng: &mut R,
) -> Result<BTreeMap<Axis, AxisSequence>> {
    let mut out = BTreeMap::new();

    match policy {
        GenerationPolicy::Explicit { sequences } => {
            for &(axis, _) in axes {
                if !sequences.contains_key(&axis) {
                    return Err(HitomezashiError::MissingPattern(axis));
                }
            }
            for &(axis, dimension) in axes {
                let seq = &sequences[&axis];
                check_length(axis, dimension, seq)?;
                out.insert(axis, seq.clone());
            }
        }
        GenerationPolicy::Alternating { first_states } => {
            for &(axis, dimension) in axes {
                let first = first_states
                    .get(&axis)
                    .copied()
                    .ok_or(HitomezashiError::MissingFirstState(axis))?;
                out.insert(axis, alternating_sequence(dimension, first));
            }
        }
        GenerationPolicy::Randomized { thresholds } => {
            let mut checked = Vec::with_capacity(axes.len());
            for &(axis, dimension) in axes {
                match thresholds.get(&axis) {
                    Some(&t) if t.is_finite() && t > 0.0 => checked.push((axis, dimension, t)),
                    _ => return Err(HitomezashiError::MissingThreshold(axis)),
                }
            }
            for (axis, dimension, threshold) in checked {
                out.insert(axis, randomized_sequence(dimension, threshold, rng));
            }
        }
    }

    debug!(
        policy = policy.name(),
        axes = axes.len(),
        "generated start states"
    );

    Ok(out)
}
