//! Target-count simplification
//!
//! Keeps exactly `expected` points picked uniformly at random (without
//! replacement) from a seeded generator, regardless of geometry.

use rand::rngs::StdRng;
use rand::SeedableRng;
use threecrate_core::{Error, PointCloud, Position, Result};
use tracing::debug;

use crate::{ensure_not_empty, PointCloudSimplifier, RemovalSet, DEFAULT_SEED};

/// Reduce a cloud to an exact number of points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountSimplifier {
    pub expected: usize,
    pub seed: u64,
}

impl CountSimplifier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            seed: DEFAULT_SEED,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

impl PointCloudSimplifier for CountSimplifier {
    fn points_to_remove<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Result<RemovalSet> {
        ensure_not_empty(cloud)?;
        if self.expected == 0 {
            return Err(Error::InvalidParameter(
                "expected point count must be at least 1".to_string(),
            ));
        }
        if self.expected >= cloud.len() {
            return Ok(RemovalSet::new());
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut keep = vec![false; cloud.len()];
        for idx in rand::seq::index::sample(&mut rng, cloud.len(), self.expected).into_iter() {
            keep[idx] = true;
        }

        let removal = RemovalSet::from_keep_flags(&keep);
        debug!(
            "Count simplification (expected={}): removing {} of {} points",
            self.expected,
            removal.len(),
            cloud.len()
        );
        Ok(removal)
    }
}
