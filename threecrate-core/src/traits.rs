//! Core traits for 3DCrate

use crate::{point::*, Result};

/// Trait for nearest neighbor search functionality
///
/// An implementation indexes a frozen snapshot of a point set. Identifiers
/// returned by the queries are positions in that snapshot.
pub trait NearestNeighborSearch: Sync {
    /// Find the k nearest neighbors to a query point, closest first
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)>;

    /// Find all neighbors within a given radius (inclusive)
    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)>;

    /// Number of points in the indexed snapshot
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A search structure that can be built over a point set
pub trait BuildIndex: NearestNeighborSearch + Sized {
    fn build(points: &[Point3f]) -> Result<Self>;
}

impl<S: NearestNeighborSearch + ?Sized> NearestNeighborSearch for &S {
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        (**self).find_k_nearest(query, k)
    }

    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)> {
        (**self).find_radius_neighbors(query, radius)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}
