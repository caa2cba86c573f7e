//! Owned weighted bag for repeated draws and pops.
//!
//! The free functions in [`crate::selector`] leave the weights with the
//! caller, so a pop shrinks the element list but not a parallel weight
//! slice. `WeightedBag` keeps both in lockstep: a pop removes the item and
//! its weight together, which makes sampling without replacement a loop of
//! `pop` calls.

use crate::error::{SelectError, SelectResult};
use crate::float::is_valid_weight;
use crate::selector::{self, Selection};
use crate::source::UniformSource;

#[derive(Debug, Clone, PartialEq)]
pub struct WeightedBag<T> {
    items: Vec<T>,
    weights: Vec<f64>,
}

impl<T> Default for WeightedBag<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> WeightedBag<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            weights: Vec::with_capacity(capacity),
        }
    }

    /// Build a bag from `(item, weight)` pairs, rejecting the first invalid weight.
    pub fn from_pairs<I>(pairs: I) -> SelectResult<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let pairs = pairs.into_iter();
        let mut bag = Self::with_capacity(pairs.size_hint().0);
        for (item, weight) in pairs {
            bag.push(item, weight)?;
        }
        Ok(bag)
    }

    /// Add an item. Negative, NaN and infinite weights are rejected.
    pub fn push(&mut self, item: T, weight: f64) -> SelectResult<()> {
        if !is_valid_weight(weight) {
            return Err(SelectError::InvalidWeight {
                index: self.items.len(),
                weight,
            });
        }
        self.items.push(item);
        self.weights.push(weight);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the remaining weights.
    ///
    /// Recomputed on each call rather than kept as a running total, so pops
    /// never accumulate subtraction error.
    pub fn total_weight(&self) -> f64 {
        self.weights.iter().sum()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn iter(&self) -> impl Iterator<Item = (&T, f64)> {
        self.items.iter().zip(self.weights.iter().copied())
    }

    /// Probability that the next draw selects `index`.
    ///
    /// Mirrors the sweep's fallback: when every weight is zero the last item
    /// carries all the mass.
    pub fn probability(&self, index: usize) -> Option<f64> {
        let weight = *self.weights.get(index)?;
        let total = self.total_weight();
        if total > 0.0 {
            Some(weight / total)
        } else if index + 1 == self.len() {
            Some(1.0)
        } else {
            Some(0.0)
        }
    }

    /// Select with replacement.
    pub fn draw<S>(&self, source: &mut S) -> SelectResult<Selection<&T>>
    where
        S: UniformSource + ?Sized,
    {
        selector::select_by_weights(&self.items, &self.weights, source)
    }

    /// Select without replacement: the winner and its weight leave the bag.
    ///
    /// The returned index is the winner's position before removal.
    pub fn pop<S>(&mut self, source: &mut S) -> SelectResult<Selection<T>>
    where
        S: UniformSource + ?Sized,
    {
        let picked = selector::pop_by_weights(&mut self.items, &self.weights, source)?;
        self.weights.remove(picked.index);
        Ok(picked)
    }

    /// Pop until the bag is empty, yielding items in draw order.
    pub fn drain_weighted<'b, S>(&'b mut self, source: &'b mut S) -> DrainWeighted<'b, T, S>
    where
        S: UniformSource + ?Sized,
    {
        DrainWeighted { bag: self, source }
    }

    pub fn into_pairs(self) -> Vec<(T, f64)> {
        self.items.into_iter().zip(self.weights).collect()
    }
}

impl<T> FromIterator<(T, f64)> for WeightedBag<T> {
    /// Collect pairs, clamping invalid weights to zero.
    ///
    /// Use [`WeightedBag::from_pairs`] to reject them instead.
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut bag = Self::new();
        for (item, weight) in iter {
            let weight = if is_valid_weight(weight) { weight } else { 0.0 };
            bag.items.push(item);
            bag.weights.push(weight);
        }
        bag
    }
}

/// Iterator returned by [`WeightedBag::drain_weighted`].
pub struct DrainWeighted<'b, T, S: ?Sized> {
    bag: &'b mut WeightedBag<T>,
    source: &'b mut S,
}

impl<T, S> Iterator for DrainWeighted<'_, T, S>
where
    S: UniformSource + ?Sized,
{
    type Item = Selection<T>;

    fn next(&mut self) -> Option<Self::Item> {
        // Weights were validated on the way in, so the only failure left is
        // an empty bag.
        self.bag.pop(&mut *self.source).ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.bag.len(), Some(self.bag.len()))
    }
}

impl<T, S> ExactSizeIterator for DrainWeighted<'_, T, S> where S: UniformSource + ?Sized {}
