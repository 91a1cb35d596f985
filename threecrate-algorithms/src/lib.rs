//! # ThreeCrate Algorithms
//!
//! Spatial search structures used by the point cloud processing crates.
//!
//! Both structures implement [`threecrate_core::NearestNeighborSearch`] and
//! [`threecrate_core::BuildIndex`], so any consumer written against those
//! traits can take either one.

pub mod nearest_neighbor;

// Re-export commonly used items
pub use nearest_neighbor::*;
