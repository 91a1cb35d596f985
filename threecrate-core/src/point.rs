//! Point types and related functionality

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 3D point with double precision coordinates
pub type Point3d = Point3<f64>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 3D vector with double precision components
pub type Vector3d = Vector3<f64>;

/// Anything stored in a point cloud that has a location in space.
///
/// Simplification only ever reads positions, so every point record the
/// cloud can hold implements this.
pub trait Position {
    fn position(&self) -> Point3f;
}

impl Position for Point3f {
    #[inline]
    fn position(&self) -> Point3f {
        *self
    }
}

/// A point with color information
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint3f {
    pub position: Point3f,
    pub color: [u8; 3],
}

/// A point with normal vector
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalPoint3f {
    pub position: Point3f,
    pub normal: Vector3f,
}

/// A point with color and normal information
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredNormalPoint3f {
    pub position: Point3f,
    pub normal: Vector3f,
    pub color: [u8; 3],
}

impl Position for ColoredPoint3f {
    #[inline]
    fn position(&self) -> Point3f {
        self.position
    }
}

impl Position for NormalPoint3f {
    #[inline]
    fn position(&self) -> Point3f {
        self.position
    }
}

impl Position for ColoredNormalPoint3f {
    #[inline]
    fn position(&self) -> Point3f {
        self.position
    }
}

impl Default for ColoredPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            color: [255, 255, 255],
        }
    }
}

impl Default for NormalPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
        }
    }
}

impl Default for ColoredNormalPoint3f {
    fn default() -> Self {
        Self {
            position: Point3f::origin(),
            normal: Vector3f::new(0.0, 0.0, 1.0),
            color: [255, 255, 255],
        }
    }
}

/// Squared euclidean distance between two points
#[inline]
pub fn distance_squared(a: &Point3f, b: &Point3f) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    dx * dx + dy * dy + dz * dz
}
