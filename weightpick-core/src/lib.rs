//! weightpick core: probability-weighted selection over ordinary collections.
//!
//! This crate contains:
//! - The weighted selector: one cumulative sweep behind explicit-weight,
//!   weight-function and uniform entry points, with and without replacement
//! - Slice and `Vec` extension traits that expose the selector as methods
//! - Uniform random sources (any `rand` generator, or scripted draws)
//! - An owned weighted bag for repeated pops
//! - A BLAKE3 seed hierarchy and a parallel frequency simulation
//! - TOML pool configuration

pub mod bag;
pub mod error;
pub mod ext;
pub mod float;
pub mod pool;
pub mod rng;
pub mod selector;
pub mod simulate;
pub mod source;

pub use bag::WeightedBag;
pub use error::{SelectError, SelectResult};
pub use ext::{WeightedSliceExt, WeightedVecExt};
pub use pool::{Pool, PoolEntry, PoolError};
pub use rng::SeedHierarchy;
pub use selector::{
    pop_by_weight_fn, pop_by_weights, pop_uniform, sample_with_replacement, select_by_weight_fn,
    select_by_weights, select_by_weights_with_total, select_uniform, Selection,
};
pub use simulate::{simulate, FrequencyReport, FrequencyRow};
pub use source::{ScriptedDraws, UniformSource};
