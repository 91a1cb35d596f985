//! Tunables shared by the simplification strategies

use serde::{Deserialize, Serialize};

use crate::spacing::DEFAULT_SPACING_NEIGHBORS;

/// Seed used when the caller does not pick one
pub const DEFAULT_SEED: u64 = 0x5eed_c10d;

/// Configuration for a simplification pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifierConfig {
    /// Neighbors averaged per point by the spacing estimator
    pub spacing_neighbors: usize,
    /// Seed for the randomized strategies (count target, uniform traversal).
    /// The same seed over the same cloud gives the same result.
    pub seed: u64,
    /// Run the per-point passes (spacing, grid cell assignment) on the rayon pool
    pub parallel: bool,
}

impl Default for SimplifierConfig {
    fn default() -> Self {
        Self {
            spacing_neighbors: DEFAULT_SPACING_NEIGHBORS,
            seed: DEFAULT_SEED,
            parallel: true,
        }
    }
}

impl SimplifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_spacing_neighbors(mut self, k: usize) -> Self {
        self.spacing_neighbors = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
