//! Recipe selection policy for fresh meal slots.
//!
//! Recipes are grouped into frequency buckets, highest weight first.
//! The first bucket holding a recipe that stock can cover and that is
//! still under its usage cap yields a uniformly random pick. When no
//! bucket qualifies, the least-shortage recipe is suggested instead.
//!
//! # Usage cap
//!
//! `cap = ceil(total_slots * (0.10 + weight / 10 * 0.03))`
//!
//! A weight-10 recipe may take at most 13% of the plan's fresh picks
//! and a weight-1 recipe about 10%, rounded up, so no single recipe
//! dominates a plan.
//!
//! # Usage
//!
//! ```
//! use u_mealplan::selection::{usage_cap, RandomSource, SequenceSource};
//!
//! assert_eq!(usage_cap(14, 5), 2);
//! let mut rng = SequenceSource::new(vec![0.25, 0.75]);
//! assert_eq!(rng.next(), 0.25);
//! ```

mod context;
mod policy;

pub use context::SelectionContext;
pub use policy::{Pick, SelectionPolicy};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform randomness in `[0, 1)`.
///
/// Injected into the scheduler so runs can be replayed exactly.
pub trait RandomSource {
    /// Next value in `[0, 1)`.
    fn next(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize {
        let idx = (self.next() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }
}

/// Adapts any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R: Rng>(pub R);

impl RngSource<StdRng> {
    /// Seeded standard generator.
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self(StdRng::from_os_rng())
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn next(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    pos: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, pos: 0 }
    }
}

impl RandomSource for SequenceSource {
    fn next(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.pos % self.values.len()];
        self.pos += 1;
        v.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Maximum fresh selections of a recipe with `weight` in a plan of
/// `total_slots` slots.
///
/// Integer form of `ceil(total_slots * (100 + 3 * weight) / 1000)`, which
/// avoids floating-point overshoot at exact multiples.
pub fn usage_cap(total_slots: usize, weight: u8) -> u32 {
    let numerator = total_slots as u64 * (100 + 3 * u64::from(weight));
    numerator.div_ceil(1000) as u32
}
