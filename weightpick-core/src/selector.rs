//! Weighted selector: probability-proportional choice from an ordered collection.
//!
//! Every entry point reduces to one cumulative sweep: draw `u` in `[0, 1)`,
//! scale it by the weight total, and walk the weights left to right until
//! the running sum reaches the scaled draw. The entry points differ only in
//! how weights are looked up:
//! - an explicit slice parallel to the elements
//! - a weight function evaluated per element (cached, or lazily when the
//!   caller already knows the total)
//!
//! Pop variants run the same selection and then remove the winner from the
//! caller's `Vec`.
//!
//! Each selection consumes exactly one draw from the source, including the
//! degenerate cases (single element, zero total), so replaying a source
//! always replays the same selections.

use crate::error::{SelectError, SelectResult};
use crate::float::{approximately, is_valid_weight};
use crate::source::UniformSource;

/// A selected element together with its index in the input sequence.
///
/// The index always refers to the sequence as it was when the call began,
/// even for pops that have since removed the element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection<T> {
    pub item: T,
    pub index: usize,
}

impl<T> Selection<T> {
    pub fn new(item: T, index: usize) -> Self {
        Self { item, index }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Selection<U> {
        Selection {
            item: f(self.item),
            index: self.index,
        }
    }

    pub fn into_pair(self) -> (T, usize) {
        (self.item, self.index)
    }
}

impl<T: Clone> Selection<&T> {
    pub fn cloned(self) -> Selection<T> {
        self.map(Clone::clone)
    }
}

// ─── Core sweep ──────────────────────────────────────────────────────

/// Map a unit draw onto an index of `len` weights.
///
/// `weight_at` is called in index order and never past the returned index.
/// Zero weights are skipped so the tolerant boundary cannot land on an
/// element that adds nothing to the running sum. This departs from a plain
/// "first index where `target <= cumulative`" sweep on one edge: leading
/// zero-weight elements with a draw at or near `0.0` resolve to the first
/// positive weight instead of index 0. A total that is not strictly
/// positive, or a sweep that runs off the end through rounding, resolves to
/// the last index.
fn sweep<W>(len: usize, total: f64, draw: f64, mut weight_at: W) -> SelectResult<usize>
where
    W: FnMut(usize) -> SelectResult<f64>,
{
    debug_assert!(len > 0);
    let last = len - 1;
    if total.is_nan() || total <= 0.0 {
        return Ok(last);
    }

    let target = draw * total;
    let mut cumulative = 0.0;
    for index in 0..len {
        let weight = weight_at(index)?;
        if weight == 0.0 {
            continue;
        }
        cumulative += weight;
        if target < cumulative || approximately(target, cumulative) {
            return Ok(index);
        }
    }
    Ok(last)
}

fn checked_weight(index: usize, weight: f64) -> SelectResult<f64> {
    if is_valid_weight(weight) {
        Ok(weight)
    } else {
        Err(SelectError::InvalidWeight { index, weight })
    }
}

/// Entry checks for the explicit-weights form. Returns the weight sum.
fn validate_weights(elements: usize, weights: &[f64]) -> SelectResult<f64> {
    if elements != weights.len() {
        return Err(SelectError::MismatchedLength {
            elements,
            weights: weights.len(),
        });
    }
    if elements == 0 {
        return Err(SelectError::EmptyCollection);
    }
    let mut total = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        total += checked_weight(index, weight)?;
    }
    Ok(total)
}

fn select_index_by_weights<S>(weights: &[f64], total: f64, source: &mut S) -> SelectResult<usize>
where
    S: UniformSource + ?Sized,
{
    let draw = source.next_unit();
    sweep(weights.len(), total, draw, |i| Ok(weights[i]))
}

// ─── Explicit weights ────────────────────────────────────────────────

/// Select one element with probability proportional to `weights[i]`.
///
/// # Errors
///
/// - [`SelectError::MismatchedLength`] if `weights.len() != elements.len()`
/// - [`SelectError::EmptyCollection`] if `elements` is empty
/// - [`SelectError::InvalidWeight`] for a negative or NaN weight
///
/// All-zero weights are not an error: the last element is returned.
pub fn select_by_weights<'a, T, S>(
    elements: &'a [T],
    weights: &[f64],
    source: &mut S,
) -> SelectResult<Selection<&'a T>>
where
    S: UniformSource + ?Sized,
{
    let total = validate_weights(elements.len(), weights)?;
    let index = select_index_by_weights(weights, total, source)?;
    Ok(Selection::new(&elements[index], index))
}

/// Like [`select_by_weights`], with a caller-supplied weight total.
///
/// The total is trusted and never compared against the actual sum. Weights
/// are still checked for length and sign.
pub fn select_by_weights_with_total<'a, T, S>(
    elements: &'a [T],
    weights: &[f64],
    total: f64,
    source: &mut S,
) -> SelectResult<Selection<&'a T>>
where
    S: UniformSource + ?Sized,
{
    validate_weights(elements.len(), weights)?;
    let index = select_index_by_weights(weights, total, source)?;
    Ok(Selection::new(&elements[index], index))
}

/// Draw `count` independent selections (with replacement).
///
/// Validation and the weight sum happen once; each selection then costs one
/// draw and one sweep. A `count` of zero still validates the inputs.
pub fn sample_with_replacement<'a, T, S>(
    elements: &'a [T],
    weights: &[f64],
    count: usize,
    source: &mut S,
) -> SelectResult<Vec<Selection<&'a T>>>
where
    S: UniformSource + ?Sized,
{
    let total = validate_weights(elements.len(), weights)?;
    let mut picks = Vec::with_capacity(count);
    for _ in 0..count {
        let index = select_index_by_weights(weights, total, source)?;
        picks.push(Selection::new(&elements[index], index));
    }
    Ok(picks)
}

// ─── Weight functions ────────────────────────────────────────────────

/// Select one element, weighting each by `weight_fn(element)`.
///
/// Without a `precomputed_total`, every weight is evaluated exactly once
/// (summed, then reused for the sweep). With a total, weights are evaluated
/// lazily during the sweep and elements after the winner are never visited;
/// only the evaluated weights are checked for sign.
///
/// # Errors
///
/// [`SelectError::EmptyCollection`] if `elements` is empty, and
/// [`SelectError::InvalidWeight`] for a negative or NaN weight that gets
/// evaluated.
pub fn select_by_weight_fn<'a, T, F, S>(
    elements: &'a [T],
    weight_fn: F,
    precomputed_total: Option<f64>,
    source: &mut S,
) -> SelectResult<Selection<&'a T>>
where
    F: FnMut(&T) -> f64,
    S: UniformSource + ?Sized,
{
    let index = select_index_by_weight_fn(elements, weight_fn, precomputed_total, source)?;
    Ok(Selection::new(&elements[index], index))
}

fn select_index_by_weight_fn<T, F, S>(
    elements: &[T],
    mut weight_fn: F,
    precomputed_total: Option<f64>,
    source: &mut S,
) -> SelectResult<usize>
where
    F: FnMut(&T) -> f64,
    S: UniformSource + ?Sized,
{
    if elements.is_empty() {
        return Err(SelectError::EmptyCollection);
    }

    match precomputed_total {
        Some(total) => {
            let draw = source.next_unit();
            sweep(elements.len(), total, draw, |i| {
                checked_weight(i, weight_fn(&elements[i]))
            })
        }
        None => {
            let weights = elements
                .iter()
                .enumerate()
                .map(|(i, e)| checked_weight(i, weight_fn(e)))
                .collect::<SelectResult<Vec<f64>>>()?;
            let total = weights.iter().sum();
            select_index_by_weights(&weights, total, source)
        }
    }
}

// ─── Pops (without replacement) ──────────────────────────────────────

/// Select by `weights`, then remove the winner from `list`.
///
/// Removal preserves the order of the remaining elements. The returned index
/// is the winner's position before removal. On error `list` is untouched.
pub fn pop_by_weights<T, S>(
    list: &mut Vec<T>,
    weights: &[f64],
    source: &mut S,
) -> SelectResult<Selection<T>>
where
    S: UniformSource + ?Sized,
{
    let total = validate_weights(list.len(), weights)?;
    let index = select_index_by_weights(weights, total, source)?;
    Ok(Selection::new(list.remove(index), index))
}

/// Select by `weight_fn`, then remove the winner from `list`.
pub fn pop_by_weight_fn<T, F, S>(
    list: &mut Vec<T>,
    weight_fn: F,
    precomputed_total: Option<f64>,
    source: &mut S,
) -> SelectResult<Selection<T>>
where
    F: FnMut(&T) -> f64,
    S: UniformSource + ?Sized,
{
    let index = select_index_by_weight_fn(list, weight_fn, precomputed_total, source)?;
    Ok(Selection::new(list.remove(index), index))
}

// ─── Uniform ─────────────────────────────────────────────────────────

fn uniform_index<S>(len: usize, source: &mut S) -> usize
where
    S: UniformSource + ?Sized,
{
    let scaled = (source.next_unit() * len as f64) as usize;
    scaled.min(len - 1)
}

/// Select one element uniformly at random.
pub fn select_uniform<'a, T, S>(elements: &'a [T], source: &mut S) -> SelectResult<Selection<&'a T>>
where
    S: UniformSource + ?Sized,
{
    if elements.is_empty() {
        return Err(SelectError::EmptyCollection);
    }
    let index = uniform_index(elements.len(), source);
    Ok(Selection::new(&elements[index], index))
}

/// Remove and return one element chosen uniformly at random.
pub fn pop_uniform<T, S>(list: &mut Vec<T>, source: &mut S) -> SelectResult<Selection<T>>
where
    S: UniformSource + ?Sized,
{
    if list.is_empty() {
        return Err(SelectError::EmptyCollection);
    }
    let index = uniform_index(list.len(), source);
    Ok(Selection::new(list.remove(index), index))
}

// ─── Tests ───────────────────────────────────────────────────────────
