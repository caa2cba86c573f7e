//! Pool configuration: named entries with selection weights.
//!
//! A pool is stored as a TOML file:
//!
//! ```toml
//! seed = 42
//!
//! [[entries]]
//! name = "common"
//! weight = 10.0
//!
//! [[entries]]
//! name = "rare"
//! weight = 0.5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::bag::WeightedBag;
use crate::float::is_valid_weight;

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("read pool file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse pool TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("pool has no entries")]
    Empty,
    #[error("entry '{name}' has invalid weight {weight}")]
    InvalidWeight { name: String, weight: f64 },
    #[error("duplicate entry name '{0}'")]
    DuplicateName(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PoolEntry {
    pub name: String,
    pub weight: f64,
}

/// A validated weighted pool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Pool {
    /// Master seed used when the caller does not supply one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub entries: Vec<PoolEntry>,
}

impl Pool {
    /// Load a pool from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, PoolError> {
        let content = std::fs::read_to_string(path).map_err(|source| PoolError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let pool = Self::from_toml(&content)?;
        log::debug!(
            "loaded pool {} with {} entries",
            path.display(),
            pool.entries.len()
        );
        Ok(pool)
    }

    /// Parse and validate a pool from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, PoolError> {
        let pool: Pool = toml::from_str(content)?;
        pool.validate()?;
        Ok(pool)
    }

    /// Reject empty pools, duplicate names, and negative or non-finite weights.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.entries.is_empty() {
            return Err(PoolError::Empty);
        }
        let mut seen = HashSet::new();
        for entry in &self.entries {
            if !is_valid_weight(entry.weight) {
                return Err(PoolError::InvalidWeight {
                    name: entry.name.clone(),
                    weight: entry.weight,
                });
            }
            if !seen.insert(entry.name.as_str()) {
                return Err(PoolError::DuplicateName(entry.name.clone()));
            }
        }
        if self.total_weight() == 0.0 {
            log::warn!("pool weights sum to zero; every draw will pick the last entry");
        }
        Ok(())
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(|e| e.weight).sum()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    /// Validate, then convert into a bag of entry names in file order.
    ///
    /// The fields are public, so a hand-built pool may never have passed
    /// through [`Pool::validate`]; it is checked again here.
    pub fn into_bag(self) -> Result<WeightedBag<String>, PoolError> {
        self.validate()?;
        Ok(self
            .entries
            .into_iter()
            .map(|e| (e.name, e.weight))
            .collect())
    }

    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}
