//! Core data structures and traits for threecrate
//!
//! This crate provides the fundamental types shared by the point cloud
//! simplification crates: points, point clouds, the nearest-neighbor search
//! abstraction, transforms and a small Bézier curve sampler.

pub mod point;
pub mod point_cloud;
pub mod traits;
pub mod transform;
pub mod curve;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, UnitQuaternion};

// Type aliases for easier imports
pub type Point = Point3f;
