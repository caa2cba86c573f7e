//! Empirical frequency check for a weighted bag.
//!
//! Draws are split into fixed-size chunks. Each chunk gets its own `StdRng`
//! from the seed hierarchy (stream `"simulate"`, iteration = chunk index) and
//! runs on the rayon pool, so the report depends only on the master seed, the
//! draw count and the chunk size, never on thread count.

use rayon::prelude::*;
use serde::Serialize;

use crate::bag::WeightedBag;
use crate::error::{SelectError, SelectResult};
use crate::rng::SeedHierarchy;

/// Default number of draws per parallel chunk.
pub const DEFAULT_CHUNK: usize = 10_000;

const STREAM: &str = "simulate";

/// Observed vs expected selection frequency for one bag index.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyRow {
    pub index: usize,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FrequencyReport {
    pub draws: u64,
    pub master_seed: u64,
    pub rows: Vec<FrequencyRow>,
}

impl FrequencyReport {
    /// Largest absolute gap between observed and expected frequency.
    pub fn max_deviation(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| (r.observed - r.expected).abs())
            .fold(0.0, f64::max)
    }
}

/// Run `draws` selections with replacement against `bag` and tally them.
///
/// # Errors
///
/// Propagates the selector's error for an empty bag. A `chunk` of zero is
/// treated as [`DEFAULT_CHUNK`].
pub fn simulate<T: Sync>(
    bag: &WeightedBag<T>,
    draws: u64,
    seeds: &SeedHierarchy,
    chunk: usize,
) -> SelectResult<FrequencyReport> {
    if bag.is_empty() {
        return Err(SelectError::EmptyCollection);
    }

    let chunk = if chunk == 0 { DEFAULT_CHUNK } else { chunk };
    let chunk = chunk as u64;
    let chunks = draws.div_ceil(chunk);
    let len = bag.len();

    let counts = (0..chunks)
        .into_par_iter()
        .map(|c| -> SelectResult<Vec<u64>> {
            let mut rng = seeds.rng_for(STREAM, c);
            let in_chunk = chunk.min(draws - c * chunk);
            let mut local = vec![0u64; len];
            for _ in 0..in_chunk {
                local[bag.draw(&mut rng)?.index] += 1;
            }
            Ok(local)
        })
        .try_reduce(
            || vec![0u64; len],
            |mut acc, local| {
                for (a, l) in acc.iter_mut().zip(local) {
                    *a += l;
                }
                Ok(acc)
            },
        )?;

    let rows = counts
        .into_iter()
        .enumerate()
        .map(|(index, count)| FrequencyRow {
            index,
            count,
            observed: if draws == 0 { 0.0 } else { count as f64 / draws as f64 },
            expected: bag.probability(index).unwrap_or(0.0),
        })
        .collect();

    Ok(FrequencyReport {
        draws,
        master_seed: seeds.master_seed(),
        rows,
    })
}
