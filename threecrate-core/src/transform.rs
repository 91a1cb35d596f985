//! Rigid motions with uniform scaling

use nalgebra::{Similarity3, Translation3, UnitQuaternion, Vector3};

use crate::Point3f;

/// Rotation, translation and uniform scale. Distances between points are
/// multiplied by the scale factor and otherwise preserved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform3D {
    similarity: Similarity3<f32>,
}

impl Transform3D {
    /// Scale about the origin
    pub fn uniform_scaling(scale: f32) -> Self {
        Self {
            similarity: Similarity3::from_scaling(scale),
        }
    }

    /// Rotate about the origin, then translate
    pub fn from_translation_rotation(translation: Vector3<f32>, rotation: UnitQuaternion<f32>) -> Self {
        Self {
            similarity: Similarity3::from_parts(Translation3::from(translation), rotation, 1.0),
        }
    }

    pub fn transform_point(&self, point: &Point3f) -> Point3f {
        self.similarity.transform_point(point)
    }
}
