//! Caller-side simplification workflow
//!
//! A [`SimplificationSession`] drives the query-then-apply cycle of an
//! interactive tool: it caches a spatial index over the current cloud,
//! remembers the last computed [`RemovalSet`] and applies it on request.
//! The simplifiers themselves stay stateless.

use threecrate_algorithms::KdTree;
use threecrate_core::{BuildIndex, Error, PointCloud, Position, Result};
use tracing::{debug, info, warn};

use crate::{RemovalSet, SimplificationStrategy, SimplifierConfig, SpacingEstimator};

/// A removal set together with the size of the cloud it was computed for
#[derive(Debug, Clone)]
struct PendingRemoval {
    removal: RemovalSet,
    cloud_len: usize,
}

/// Query/apply state for simplifying one cloud interactively
pub struct SimplificationSession<I: BuildIndex = KdTree> {
    config: SimplifierConfig,
    index: Option<I>,
    pending: Option<PendingRemoval>,
}

impl SimplificationSession<KdTree> {
    /// Session backed by a kd-tree with the default configuration
    pub fn new() -> Self {
        Self::with_config(SimplifierConfig::default())
    }
}

impl Default for SimplificationSession<KdTree> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: BuildIndex> SimplificationSession<I> {
    pub fn with_config(config: SimplifierConfig) -> Self {
        Self {
            config,
            index: None,
            pending: None,
        }
    }

    pub fn config(&self) -> &SimplifierConfig {
        &self.config
    }

    /// Removal set computed by the last [`Self::query`], if not yet applied
    pub fn pending(&self) -> Option<&RemovalSet> {
        self.pending.as_ref().map(|p| &p.removal)
    }

    /// Forget the cached index, e.g. after editing point positions in place
    pub fn invalidate_index(&mut self) {
        self.index = None;
    }

    /// Discard the pending removal set
    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Build the index over `cloud` unless the cached one already covers it
    fn index_for<T: Position>(&mut self, cloud: &PointCloud<T>) -> Result<&I> {
        let stale = self
            .index
            .as_ref()
            .map_or(true, |index| index.len() != cloud.len());
        if stale {
            debug!("Building spatial index over {} points", cloud.len());
            self.index = Some(I::build(&cloud.positions())?);
        }
        self.index
            .as_ref()
            .ok_or_else(|| Error::Algorithm("spatial index unavailable".to_string()))
    }

    /// Average spacing of `cloud`, a reasonable starting distance threshold
    pub fn average_spacing<T: Position + Sync>(&mut self, cloud: &PointCloud<T>) -> Result<f32> {
        let estimator = SpacingEstimator::new(self.config.spacing_neighbors)
            .with_parallel(self.config.parallel);
        let index = self.index_for(cloud)?;
        estimator.estimate(cloud, index)
    }

    /// Compute the points `strategy` would remove and keep them pending.
    ///
    /// Returns how many points would remain.
    pub fn query<T: Position + Sync>(
        &mut self,
        cloud: &PointCloud<T>,
        strategy: SimplificationStrategy,
    ) -> Result<usize> {
        let config = self.config;
        let removal = if strategy.requires_index() {
            let index = self.index_for(cloud)?;
            strategy.points_to_remove(cloud, Some(index), &config)?
        } else {
            strategy.points_to_remove(cloud, None, &config)?
        };

        let remaining = removal.remaining(cloud.len());
        info!("{} points will remain", remaining);
        self.pending = Some(PendingRemoval {
            removal,
            cloud_len: cloud.len(),
        });
        Ok(remaining)
    }

    /// Remove the pending points from `cloud` and compact it.
    ///
    /// The cached index no longer matches the cloud afterwards and is
    /// dropped. Returns the number of points removed.
    pub fn apply<T>(&mut self, cloud: &mut PointCloud<T>) -> Result<usize> {
        let pending = match self.pending.take() {
            Some(p) if !p.removal.is_empty() => p,
            _ => {
                warn!("please query points that can be removed");
                return Ok(0);
            }
        };

        if pending.cloud_len != cloud.len() {
            let err = Error::InvalidData(format!(
                "cloud has {} points but the pending removal was computed for {}",
                cloud.len(),
                pending.cloud_len
            ));
            self.pending = Some(pending);
            return Err(err);
        }

        let removed = cloud.remove_indices(pending.removal.as_slice())?;
        self.index = None;
        info!("{} points removed. {} points remain", removed, cloud.len());
        Ok(removed)
    }
}
