//! Average point spacing estimation

use rayon::prelude::*;
use threecrate_core::{Error, NearestNeighborSearch, Point3f, PointCloud, Position, Result};
use tracing::debug;

use crate::{ensure_index_matches, ensure_not_empty};

/// Neighbor count used when the caller does not pick one
pub const DEFAULT_SPACING_NEIGHBORS: usize = 6;

/// Estimates the typical distance between neighboring points.
///
/// For every point the mean distance to its `k` nearest neighbors (itself
/// excluded) is computed; the estimate is the mean of those values over the
/// cloud. Clouds with fewer than `k + 1` points use whatever neighbors exist,
/// and a single isolated point has spacing 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpacingEstimator {
    pub k: usize,
    pub parallel: bool,
}

impl Default for SpacingEstimator {
    fn default() -> Self {
        Self {
            k: DEFAULT_SPACING_NEIGHBORS,
            parallel: true,
        }
    }
}

impl SpacingEstimator {
    pub fn new(k: usize) -> Self {
        Self { k, ..Self::default() }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Estimate the spacing of `cloud`. `index` must be built over exactly this cloud.
    pub fn estimate<T, I>(&self, cloud: &PointCloud<T>, index: &I) -> Result<f32>
    where
        T: Position + Sync,
        I: NearestNeighborSearch + ?Sized,
    {
        ensure_not_empty(cloud)?;
        ensure_index_matches(cloud, index)?;
        if self.k == 0 {
            return Err(Error::InvalidParameter(
                "spacing needs at least one neighbor".to_string(),
            ));
        }

        let k = self.k;
        let mean_of = |(i, point): (usize, &T)| point_spacing(i, &point.position(), index, k);

        let per_point: Vec<Option<f64>> = if self.parallel {
            cloud.points.par_iter().enumerate().map(mean_of).collect()
        } else {
            cloud.points.iter().enumerate().map(mean_of).collect()
        };

        let (sum, count) = per_point
            .into_iter()
            .flatten()
            .fold((0.0f64, 0usize), |(sum, count), d| (sum + d, count + 1));

        let spacing = if count == 0 { 0.0 } else { (sum / count as f64) as f32 };
        debug!(
            "Average spacing over {} points (k={}): {}",
            cloud.len(),
            k,
            spacing
        );
        Ok(spacing)
    }
}

/// Mean distance from point `i` to its `k` nearest other points, `None` if it has none
fn point_spacing<I>(i: usize, point: &Point3f, index: &I, k: usize) -> Option<f64>
where
    I: NearestNeighborSearch + ?Sized,
{
    // +1 so the point itself can be dropped
    let mut neighbors = index.find_k_nearest(point, k + 1);
    neighbors.retain(|&(idx, _)| idx != i);
    neighbors.truncate(k);

    if neighbors.is_empty() {
        return None;
    }
    let sum: f64 = neighbors.iter().map(|&(_, d)| d as f64).sum();
    Some(sum / neighbors.len() as f64)
}

/// Average distance from each point to its `k` nearest neighbors, averaged over the cloud.
///
/// # Example
/// ```rust
/// use threecrate_core::{PointCloud, Point3f};
/// use threecrate_algorithms::KdTree;
/// use threecrate_simplification::average_spacing;
///
/// fn main() -> threecrate_core::Result<()> {
///     let cloud = PointCloud::from_points(vec![
///         Point3f::new(0.0, 0.0, 0.0),
///         Point3f::new(1.0, 0.0, 0.0),
///         Point3f::new(2.0, 0.0, 0.0),
///     ]);
///     let index = KdTree::new(&cloud.points)?;
///
///     let spacing = average_spacing(&cloud, &index, 1)?;
///     assert_eq!(spacing, 1.0);
///     Ok(())
/// }
/// ```
pub fn average_spacing<T, I>(cloud: &PointCloud<T>, index: &I, k: usize) -> Result<f32>
where
    T: Position + Sync,
    I: NearestNeighborSearch + ?Sized,
{
    SpacingEstimator::new(k).estimate(cloud, index)
}
