//! One entry point for every simplification strategy

use serde::{Deserialize, Serialize};
use threecrate_core::{Error, NearestNeighborSearch, PointCloud, Position, Result};

use crate::{
    CountSimplifier, GridSimplifier, PointCloudSimplifier, RemovalSet, SimplifierConfig,
    ThresholdSimplifier, UniformSimplifier,
};

/// The reduction strategy picked by the user, with its parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimplificationStrategy {
    /// Keep exactly `expected` points
    CountTarget { expected: usize },
    /// Greedy in identifier order, survivors at least `threshold` apart
    DistanceThreshold { threshold: f32 },
    /// Evenly spread survivors at least `threshold` apart; needs a spatial index
    DistanceThresholdUniform { threshold: f32 },
    /// One point per cubical cell of edge `cell_size`
    GridBased { cell_size: f32 },
}

impl SimplificationStrategy {
    /// Whether [`Self::points_to_remove`] must be given a spatial index
    pub fn requires_index(&self) -> bool {
        matches!(self, Self::DistanceThresholdUniform { .. })
    }

    /// Compute the points this strategy discards from `cloud`.
    ///
    /// `index` is only consulted by the uniform threshold strategy and must
    /// then be built over `cloud`.
    pub fn points_to_remove<T: Position + Sync>(
        &self,
        cloud: &PointCloud<T>,
        index: Option<&dyn NearestNeighborSearch>,
        config: &SimplifierConfig,
    ) -> Result<RemovalSet> {
        match *self {
            Self::CountTarget { expected } => CountSimplifier::new(expected)
                .with_seed(config.seed)
                .points_to_remove(cloud),
            Self::DistanceThreshold { threshold } => {
                ThresholdSimplifier::new(threshold).points_to_remove(cloud)
            }
            Self::DistanceThresholdUniform { threshold } => {
                let index = index.ok_or_else(|| {
                    Error::InvalidParameter(
                        "uniform simplification requires a spatial index".to_string(),
                    )
                })?;
                UniformSimplifier::new(threshold, index)
                    .with_seed(config.seed)
                    .points_to_remove(cloud)
            }
            Self::GridBased { cell_size } => GridSimplifier::new(cell_size)
                .with_parallel(config.parallel)
                .points_to_remove(cloud),
        }
    }
}

/// Points to discard from `cloud` under `strategy`, with the default configuration
pub fn simplify<T: Position + Sync>(
    cloud: &PointCloud<T>,
    strategy: SimplificationStrategy,
    index: Option<&dyn NearestNeighborSearch>,
) -> Result<RemovalSet> {
    strategy.points_to_remove(cloud, index, &SimplifierConfig::default())
}
