//! Errors raised by the weighted selector.

use thiserror::Error;

/// Caller-input errors. All are detected before any random draw is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("cannot select from an empty collection")]
    EmptyCollection,

    #[error("weight count {weights} does not match element count {elements}")]
    MismatchedLength { elements: usize, weights: usize },

    #[error("weight {weight} at index {index} is negative or not a number")]
    InvalidWeight { index: usize, weight: f64 },
}

pub type SelectResult<T> = Result<T, SelectError>;
