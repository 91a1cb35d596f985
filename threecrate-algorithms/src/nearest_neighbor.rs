//! Nearest neighbor search implementations

use kiddo::{ImmutableKdTree, SquaredEuclidean};
use threecrate_core::{distance_squared, BuildIndex, Error, NearestNeighborSearch, Point3f, Result};

/// KD-Tree implementation for nearest neighbor search
///
/// A balanced, read-only `kiddo` tree built in one pass over the points.
/// Item ids are the positions in the slice it was built from. Planar,
/// collinear and duplicated points are all fine.
pub struct KdTree {
    // None for an empty cloud
    tree: Option<ImmutableKdTree<f32, 3>>,
    len: usize,
}

impl KdTree {
    pub fn new(points: &[Point3f]) -> Result<Self> {
        if let Some(idx) = points.iter().position(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(Error::InvalidData(format!(
                "point {} has a non-finite coordinate",
                idx
            )));
        }

        let entries: Vec<[f32; 3]> = points.iter().map(|p| [p.x, p.y, p.z]).collect();
        let tree = if entries.is_empty() {
            None
        } else {
            Some(ImmutableKdTree::new_from_slice(&entries))
        };

        Ok(Self {
            tree,
            len: points.len(),
        })
    }
}

impl NearestNeighborSearch for KdTree {
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        let tree = match &self.tree {
            Some(tree) if k > 0 => tree,
            _ => return Vec::new(),
        };

        tree.nearest_n::<SquaredEuclidean>(&[query.x, query.y, query.z], std::num::NonZero::new(k.min(self.len)).expect("k > 0 and tree non-empty"))
            .into_iter()
            .map(|n| (n.item as usize, n.distance.sqrt()))
            .collect()
    }

    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)> {
        let tree = match &self.tree {
            Some(tree) if radius >= 0.0 => tree,
            _ => return Vec::new(),
        };

        let radius_squared = radius * radius;
        // kiddo's bound is exclusive; widen it so the inclusive filter below decides
        let search = (radius_squared * (1.0 + 4.0 * f32::EPSILON)).max(f32::MIN_POSITIVE);
        tree.within::<SquaredEuclidean>(&[query.x, query.y, query.z], search)
            .into_iter()
            .filter(|n| n.distance <= radius_squared)
            .map(|n| (n.item as usize, n.distance.sqrt()))
            .collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl BuildIndex for KdTree {
    fn build(points: &[Point3f]) -> Result<Self> {
        Self::new(points)
    }
}

/// Simple brute force nearest neighbor search for small datasets
pub struct BruteForceSearch {
    points: Vec<Point3f>,
}

impl BruteForceSearch {
    pub fn new(points: &[Point3f]) -> Self {
        Self {
            points: points.to_vec(),
        }
    }
}

impl NearestNeighborSearch for BruteForceSearch {
    fn find_k_nearest(&self, query: &Point3f, k: usize) -> Vec<(usize, f32)> {
        let mut distances: Vec<(usize, f32)> = self.points
            .iter()
            .enumerate()
            .map(|(idx, point)| (idx, distance_squared(point, query).sqrt()))
            .collect();

        // Sort by distance and take k nearest
        distances.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        distances.truncate(k);
        distances
    }

    fn find_radius_neighbors(&self, query: &Point3f, radius: f32) -> Vec<(usize, f32)> {
        let radius_squared = radius * radius;
        self.points
            .iter()
            .enumerate()
            .filter_map(|(idx, point)| {
                let d2 = distance_squared(point, query);
                if d2 <= radius_squared {
                    Some((idx, d2.sqrt()))
                } else {
                    None
                }
            })
            .collect()
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

impl BuildIndex for BruteForceSearch {
    fn build(points: &[Point3f]) -> Result<Self> {
        Ok(Self::new(points))
    }
}
