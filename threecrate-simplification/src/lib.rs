//! Point cloud simplification algorithms
//!
//! This crate decides which points of a cloud are redundant. It never edits
//! the cloud: every simplifier returns a [`RemovalSet`] and the caller applies
//! it with [`threecrate_core::PointCloud::remove_indices`].
//!
//! Available strategies:
//! - Target point count (seeded random subsampling)
//! - Distance threshold, greedy in identifier order
//! - Distance threshold with a uniformity-preserving traversal
//! - Spatial grid binning, one point per cell
//!
//! [`average_spacing`] estimates a sensible distance threshold beforehand.

pub mod removal;
pub mod config;
pub mod spacing;
pub mod grid;
pub mod threshold;
pub mod uniform;
pub mod count;
pub mod strategy;
pub mod session;

pub use removal::*;
pub use config::*;
pub use spacing::*;
pub use grid::*;
pub use threshold::*;
pub use uniform::*;
pub use count::*;
pub use strategy::*;
pub use session::*;

use threecrate_core::{Error, NearestNeighborSearch, PointCloud, Position, Result};

/// Select the points of a cloud that can be discarded
pub trait PointCloudSimplifier {
    /// Compute the identifiers to remove. The cloud is only read.
    fn points_to_remove<T: Position + Sync>(&self, cloud: &PointCloud<T>) -> Result<RemovalSet>;
}

pub(crate) fn ensure_not_empty<T>(cloud: &PointCloud<T>) -> Result<()> {
    if cloud.is_empty() {
        return Err(Error::InvalidParameter("Point cloud is empty".to_string()));
    }
    Ok(())
}

pub(crate) fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(Error::InvalidParameter(format!(
            "{} must be a positive finite number, got {}",
            name, value
        )));
    }
    Ok(())
}

pub(crate) fn ensure_index_matches<T, I>(cloud: &PointCloud<T>, index: &I) -> Result<()>
where
    I: NearestNeighborSearch + ?Sized,
{
    if index.len() != cloud.len() {
        return Err(Error::IndexMismatch {
            index_len: index.len(),
            cloud_len: cloud.len(),
        });
    }
    Ok(())
}
