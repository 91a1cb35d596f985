//! Uniform distance-threshold simplification
//!
//! Same survival rule as [`crate::ThresholdSimplifier`], but the visiting
//! order is a seeded random permutation of the identifiers instead of the
//! scan order. Scanners emit points line by line, and a greedy pass in that
//! order leaves survivors aligned along the scan lines; a shuffled order
//! spreads them evenly (random sequential adsorption).
//!
//! Each survivor issues one radius query on a static index built over the
//! cloud and marks its close neighbors as removed; marked points are skipped
//! when their turn comes, so the number of queries equals the number of
//! survivors.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use threecrate_core::{NearestNeighborSearch, PointCloud, Position, Result};
use tracing::debug;

use crate::{
    ensure_index_matches, ensure_not_empty, ensure_positive, PointCloudSimplifier, RemovalSet,
    DEFAULT_SEED,
};

/// Evenly spread survivors, no two closer than `threshold`
pub struct UniformSimplifier<'a, I: NearestNeighborSearch + ?Sized> {
    pub threshold: f32,
    pub seed: u64,
    index: &'a I,
}

impl<'a, I: NearestNeighborSearch + ?Sized> UniformSimplifier<'a, I> {
    /// `index` must be built over the cloud that will be simplified
    pub fn new(threshold: f32, index: &'a I) -> Self {
        Self {
            threshold,
            seed: DEFAULT_SEED,
            index,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// The order in which a cloud of `len` points is visited
    fn visit_order(&self, len: usize) -> Vec<usize> {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(&mut StdRng::seed_from_u64(self.seed));
        order
    }
}

impl<'a, I: NearestNeighborSearch + ?Sized> PointCloudSimplifier for UniformSimplifier<'a, I> {
    fn points_to_remove<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Result<RemovalSet> {
        ensure_not_empty(cloud)?;
        ensure_positive("threshold", self.threshold)?;
        ensure_index_matches(cloud, self.index)?;

        // A point still unmarked when visited has no survivor closer than the threshold
        let mut removed = vec![false; cloud.len()];
        for idx in self.visit_order(cloud.len()) {
            if removed[idx] {
                continue;
            }
            let p = cloud[idx].position();
            for (other, d) in self.index.find_radius_neighbors(&p, self.threshold) {
                if other != idx && d < self.threshold {
                    if let Some(flag) = removed.get_mut(other) {
                        *flag = true;
                    }
                }
            }
        }

        let removal = RemovalSet::from_indices(
            removed
                .iter()
                .enumerate()
                .filter_map(|(idx, &gone)| gone.then_some(idx)),
        );
        debug!(
            "Uniform simplification (threshold={}, seed={}): removing {} of {} points",
            self.threshold,
            self.seed,
            removal.len(),
            cloud.len()
        );
        Ok(removal)
    }
}
