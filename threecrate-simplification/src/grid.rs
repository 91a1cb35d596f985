//! Grid-based point cloud simplification
//!
//! Space is cut into cubes of edge `cell_size` anchored at the origin. The
//! first point (in identifier order) that falls into a cube represents it and
//! every later point in the same cube is removed.
//!
//! This is an approximate down-sampling: two survivors on either side of a
//! cell face can be arbitrarily close. Use [`crate::ThresholdSimplifier`] when
//! a hard minimum distance is needed.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use rayon::prelude::*;
use threecrate_core::{Error, Point3f, PointCloud, Position, Result};
use tracing::debug;

use crate::{ensure_not_empty, ensure_positive, PointCloudSimplifier, RemovalSet};

/// Integer coordinates of a grid cell
pub type CellKey = (i64, i64, i64);

/// Cell containing `point` for cubes of edge `cell_size`
#[inline]
pub fn cell_of(point: &Point3f, cell_size: f64) -> CellKey {
    (
        (point.x as f64 / cell_size).floor() as i64,
        (point.y as f64 / cell_size).floor() as i64,
        (point.z as f64 / cell_size).floor() as i64,
    )
}

/// Largest cell coordinate an `f64` still counts exactly (2^53)
const MAX_CELL_COORD: f64 = 9_007_199_254_740_992.0;

/// Reject a `cell_size` so small relative to the cloud's extent that cell
/// coordinates would lose precision or overflow `i64`
fn ensure_cells_representable<T: Position>(cloud: &PointCloud<T>, cell_size: f64) -> Result<()> {
    let (min, max) = match cloud.bounding_box() {
        Some(bounds) => bounds,
        None => return Ok(()),
    };
    let reach = min
        .coords
        .iter()
        .chain(max.coords.iter())
        .fold(0.0f64, |acc, &c| acc.max((c as f64).abs()));

    if reach / cell_size >= MAX_CELL_COORD {
        return Err(Error::InvalidParameter(format!(
            "cell_size {} is too small for coordinates up to {}",
            cell_size, reach
        )));
    }
    Ok(())
}

/// Keeps one point per occupied grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSimplifier {
    /// Edge length of the cubical cells
    pub cell_size: f32,
    /// Compute cell keys on the rayon pool
    pub parallel: bool,
}

impl GridSimplifier {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            parallel: true,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn cell_keys<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Vec<CellKey> {
        let cell_size = self.cell_size as f64;
        if self.parallel {
            cloud
                .points
                .par_iter()
                .map(|p| cell_of(&p.position(), cell_size))
                .collect()
        } else {
            cloud
                .points
                .iter()
                .map(|p| cell_of(&p.position(), cell_size))
                .collect()
        }
    }
}

impl PointCloudSimplifier for GridSimplifier {
    fn points_to_remove<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Result<RemovalSet> {
        ensure_not_empty(cloud)?;
        ensure_positive("cell_size", self.cell_size)?;
        ensure_cells_representable(cloud, self.cell_size as f64)?;

        let keys = self.cell_keys(cloud);

        // Grouping stays sequential so the representative is always the lowest id
        let mut representatives: HashMap<CellKey, usize> = HashMap::new();
        let mut removed = Vec::new();
        for (idx, key) in keys.into_iter().enumerate() {
            match representatives.entry(key) {
                Entry::Vacant(e) => {
                    e.insert(idx);
                }
                Entry::Occupied(_) => removed.push(idx),
            }
        }

        debug!(
            "Grid simplification (cell_size={}): {} occupied cells, removing {} of {} points",
            self.cell_size,
            representatives.len(),
            removed.len(),
            cloud.len()
        );

        Ok(RemovalSet::from_sorted(removed))
    }
}
