//! Uniform random sources.
//!
//! The selector needs exactly one operation from its randomness: the next
//! value in `[0, 1)`. Any `rand` generator provides it; [`ScriptedDraws`]
//! replays a fixed sequence so a selection can be reproduced exactly.

use rand::{Rng, RngCore};

/// Produces uniform values in `[0, 1)`.
pub trait UniformSource {
    fn next_unit(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> UniformSource for R {
    #[inline]
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Values are passed through unchanged, so a script may hold draws a real
/// generator would never produce (for instance `1.0 - 1e-12`) to exercise
/// the sweep boundary.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedDraws {
    /// # Panics
    ///
    /// Panics if `draws` is empty.
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "ScriptedDraws needs at least one draw");
        Self { draws, cursor: 0 }
    }

    /// A source that always returns `draw`.
    pub fn constant(draw: f64) -> Self {
        Self::new(vec![draw])
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl UniformSource for ScriptedDraws {
    fn next_unit(&mut self) -> f64 {
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        draw
    }
}
