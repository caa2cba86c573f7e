//! Deterministic seed hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each `(stream, iteration)`
//! pair. Sub-seeds are derived via BLAKE3 hashing, independently of thread
//! scheduling order, so parallel simulations are identical regardless of
//! thread count.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed hierarchy.
///
/// The master seed is expanded into per-(stream, iteration) sub-seeds using
/// BLAKE3. Because derivation is hash-based (not order-dependent), the same
/// master seed produces identical sub-seeds regardless of the order in which
/// streams or iterations are requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    /// A hierarchy rooted at a seed taken from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (stream, iteration).
    ///
    /// The label is length-prefixed so distinct labels never hash the same
    /// byte stream.
    pub fn sub_seed(&self, stream: &str, iteration: u64) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&(stream.len() as u64).to_le_bytes());
        hasher.update(stream.as_bytes());
        hasher.update(&iteration.to_le_bytes());
        let hash = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(head)
    }

    /// Create a seeded StdRng from a sub-seed.
    pub fn rng_for(&self, stream: &str, iteration: u64) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(stream, iteration))
    }
}
