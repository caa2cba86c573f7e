//! Extension traits that hang the selector off slices and vectors.
//!
//! ```
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use weightpick_core::ext::{WeightedSliceExt, WeightedVecExt};
//!
//! let mut rng = StdRng::seed_from_u64(1);
//! let loot = ["coin", "gem", "crown"];
//! let pick = loot.choose_weighted(&[80.0, 19.0, 1.0], &mut rng).unwrap();
//! assert!(pick.index < 3);
//!
//! let mut deck = vec![1, 2, 3, 4];
//! let card = deck.pop_weighted_by(|&c| c as f64, None, &mut rng).unwrap();
//! assert_eq!(deck.len(), 3);
//! assert!(!deck.contains(&card.item));
//! ```

use crate::error::SelectResult;
use crate::selector::{self, Selection};
use crate::source::UniformSource;

/// Read-only selection on a slice.
pub trait WeightedSliceExt<T> {
    fn choose_weighted<S>(&self, weights: &[f64], source: &mut S) -> SelectResult<Selection<&T>>
    where
        S: UniformSource + ?Sized;

    fn choose_weighted_by<F, S>(
        &self,
        weight_fn: F,
        precomputed_total: Option<f64>,
        source: &mut S,
    ) -> SelectResult<Selection<&T>>
    where
        F: FnMut(&T) -> f64,
        S: UniformSource + ?Sized;

    fn choose_uniform<S>(&self, source: &mut S) -> SelectResult<Selection<&T>>
    where
        S: UniformSource + ?Sized;
}

impl<T> WeightedSliceExt<T> for [T] {
    fn choose_weighted<S>(&self, weights: &[f64], source: &mut S) -> SelectResult<Selection<&T>>
    where
        S: UniformSource + ?Sized,
    {
        selector::select_by_weights(self, weights, source)
    }

    fn choose_weighted_by<F, S>(
        &self,
        weight_fn: F,
        precomputed_total: Option<f64>,
        source: &mut S,
    ) -> SelectResult<Selection<&T>>
    where
        F: FnMut(&T) -> f64,
        S: UniformSource + ?Sized,
    {
        selector::select_by_weight_fn(self, weight_fn, precomputed_total, source)
    }

    fn choose_uniform<S>(&self, source: &mut S) -> SelectResult<Selection<&T>>
    where
        S: UniformSource + ?Sized,
    {
        selector::select_uniform(self, source)
    }
}

/// Destructive selection on a vector.
pub trait WeightedVecExt<T> {
    fn pop_weighted<S>(&mut self, weights: &[f64], source: &mut S) -> SelectResult<Selection<T>>
    where
        S: UniformSource + ?Sized;

    fn pop_weighted_by<F, S>(
        &mut self,
        weight_fn: F,
        precomputed_total: Option<f64>,
        source: &mut S,
    ) -> SelectResult<Selection<T>>
    where
        F: FnMut(&T) -> f64,
        S: UniformSource + ?Sized;

    fn pop_uniform<S>(&mut self, source: &mut S) -> SelectResult<Selection<T>>
    where
        S: UniformSource + ?Sized;
}

impl<T> WeightedVecExt<T> for Vec<T> {
    fn pop_weighted<S>(&mut self, weights: &[f64], source: &mut S) -> SelectResult<Selection<T>>
    where
        S: UniformSource + ?Sized,
    {
        selector::pop_by_weights(self, weights, source)
    }

    fn pop_weighted_by<F, S>(
        &mut self,
        weight_fn: F,
        precomputed_total: Option<f64>,
        source: &mut S,
    ) -> SelectResult<Selection<T>>
    where
        F: FnMut(&T) -> f64,
        S: UniformSource + ?Sized,
    {
        selector::pop_by_weight_fn(self, weight_fn, precomputed_total, source)
    }

    fn pop_uniform<S>(&mut self, source: &mut S) -> SelectResult<Selection<T>>
    where
        S: UniformSource + ?Sized,
    {
        selector::pop_uniform(self, source)
    }
}
