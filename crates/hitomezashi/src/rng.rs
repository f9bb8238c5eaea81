//! Seedable random sources for start-state generation.
//!
//! Randomized start states never touch process-wide randomness: callers pass
//! a [`RandomSource`] in, so a fixed seed always reproduces the same pattern.

/// Anything that can hand out uniform values in `[0, 1)`.
///
/// ## Rust Lesson #12: Traits as Seams
///
/// A trait is like a TypeScript interface. Functions take `&mut impl RandomSource`
/// (or `&mut dyn RandomSource`) so tests can inject a scripted source while the
/// CLI uses the seeded [`Rng`].
pub trait RandomSource {
    /// Get a random f64 in the range [0, 1).
    fn next_f64(&mut self) -> f64;

    /// Get a random f64 in the range [min, max).
    #[inline]
    fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }
}

/// A fast, deterministic pseudo-random number generator.
///
/// Uses a Linear Congruential Generator (LCG) with the Knuth MMIX
/// multiplier and increment.
///
/// # Example
/// ```
/// use hitomezashi::rng::{RandomSource, Rng};
///
/// let mut rng = Rng::new(12345);
/// let value = rng.next_f64(); // Returns value in [0, 1)
/// assert!((0.0..1.0).contains(&value));
/// ```
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    ///
    /// The same seed will always produce the same sequence of numbers.
    #[inline]
    pub fn new(seed: u64) -> Self {
        Self { state: seed.wrapping_add(1) }
    }

    /// Get the next raw u64 value.
    #[inline]
    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }
}

impl RandomSource for Rng {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        // Use high bits for better distribution
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl Default for Rng {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    #[inline]
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Handy for pinning exact draws in tests and examples.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are fractions in [0, 1), the same scale as [`RandomSource::next_f64`].
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
