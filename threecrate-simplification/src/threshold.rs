//! Greedy distance-threshold simplification
//!
//! Points are visited in identifier order. A point survives only if no
//! earlier survivor lies closer than the threshold; otherwise it is removed.
//! Survivors live in a hash grid with cells as wide as the threshold, so a
//! candidate only has to be compared against the survivors of the 27 cells
//! around it and no prebuilt spatial index is needed.

use std::collections::HashMap;

use itertools::iproduct;
use threecrate_core::{distance_squared, Point3f, PointCloud, Position, Result};
use tracing::debug;

use crate::grid::{cell_of, CellKey};
use crate::{ensure_not_empty, ensure_positive, PointCloudSimplifier, RemovalSet};

/// Survivors bucketed by grid cell, grown as points are accepted
#[derive(Debug, Default)]
pub(crate) struct SurvivorGrid {
    cell_size: f64,
    cells: HashMap<CellKey, Vec<Point3f>>,
}

impl SurvivorGrid {
    pub(crate) fn new(cell_size: f32) -> Self {
        Self {
            cell_size: cell_size as f64,
            cells: HashMap::new(),
        }
    }

    /// Whether a survivor lies strictly closer than `sqrt(radius_squared)`.
    ///
    /// Only valid for radii up to the cell size.
    pub(crate) fn has_survivor_within(&self, point: &Point3f, radius_squared: f32) -> bool {
        let (x, y, z) = cell_of(point, self.cell_size);
        iproduct!(-1i64..=1, -1i64..=1, -1i64..=1).any(|(dx, dy, dz)| {
            let key = (x.saturating_add(dx), y.saturating_add(dy), z.saturating_add(dz));
            self.cells.get(&key).map_or(false, |survivors| {
                survivors
                    .iter()
                    .any(|s| distance_squared(s, point) < radius_squared)
            })
        })
    }

    pub(crate) fn insert(&mut self, point: Point3f) {
        self.cells
            .entry(cell_of(&point, self.cell_size))
            .or_default()
            .push(point);
    }
}

/// Removes every point that has an earlier survivor closer than `threshold`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdSimplifier {
    pub threshold: f32,
}

impl ThresholdSimplifier {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }
}

impl PointCloudSimplifier for ThresholdSimplifier {
    fn points_to_remove<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Result<RemovalSet> {
        ensure_not_empty(cloud)?;
        ensure_positive("threshold", self.threshold)?;

        let threshold_squared = self.threshold * self.threshold;
        let mut survivors = SurvivorGrid::new(self.threshold);
        let mut removed = Vec::new();

        for (idx, point) in cloud.iter().enumerate() {
            let p = point.position();
            if survivors.has_survivor_within(&p, threshold_squared) {
                removed.push(idx);
            } else {
                survivors.insert(p);
            }
        }

        debug!(
            "Threshold simplification (threshold={}): removing {} of {} points",
            self.threshold,
            removed.len(),
            cloud.len()
        );

        Ok(RemovalSet::from_sorted(removed))
    }
}
