//! Float helpers consumed by the cumulative sweep.

/// Relative tolerance for the sweep boundary test.
///
/// Repeated summation of weights can leave the final cumulative sum slightly
/// below a draw that was meant to land in the last bucket. Any draw within
/// this fraction of a cumulative sum counts as a hit.
///
/// The bound is relative so that scaling every weight by the same factor
/// never changes which bucket a draw lands in. An absolute bound would let
/// the first bucket swallow every draw once the total fell near it.
pub const SWEEP_EPSILON: f64 = 1e-9;

/// `true` when `a` and `b` differ by at most [`SWEEP_EPSILON`] times the
/// larger magnitude.
#[inline]
pub fn approximately(a: f64, b: f64) -> bool {
    approx::relative_eq!(a, b, epsilon = 0.0, max_relative = SWEEP_EPSILON)
}

/// A weight the sweep can accept: finite and not negative.
#[inline]
pub fn is_valid_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}
