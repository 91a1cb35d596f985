//! Integration tests for threecrate-simplification
//!
//! These tests run every strategy over the same clouds and check the
//! properties all removal sets share, then walk through the interactive
//! query/apply workflow.

use threecrate_algorithms::{BruteForceSearch, KdTree};
use threecrate_core::{ColoredPoint3f, NearestNeighborSearch, Point3f, PointCloud, Transform3D};
use threecrate_simplification::*;

/// Fibonacci lattice on a sphere
fn create_sphere_point_cloud(radius: f32, num_points: usize) -> PointCloud<Point3f> {
    let golden_angle = std::f32::consts::PI * (3.0 - 5.0_f32.sqrt());

    (0..num_points)
        .map(|i| {
            let z = 1.0 - 2.0 * (i as f32 + 0.5) / num_points as f32;
            let r = (1.0 - z * z).sqrt();
            let theta = golden_angle * i as f32;
            Point3f::new(radius * r * theta.cos(), radius * r * theta.sin(), radius * z)
        })
        .collect()
}

/// Sensor noise, distinct per point and axis, well below any threshold used here
fn noise(i: usize, salt: f32) -> f32 {
    ((i as f32 * salt).fract() - 0.5) * 1e-4
}

fn noisy(i: usize, x: f32, y: f32, z: f32) -> Point3f {
    Point3f::new(
        x + noise(i, 0.754_877_7),
        y + noise(i, 0.569_840_3),
        z + noise(i, 0.618_034),
    )
}

/// Two scan-line patches of different density, like overlapping scans
fn create_uneven_scan() -> PointCloud<Point3f> {
    let mut points = Vec::new();
    for row in 0..30 {
        for col in 0..60 {
            let x = col as f32 * 0.05;
            let y = row as f32 * 0.1;
            points.push(noisy(points.len(), x, y, 0.01 * (x * 3.0).sin()));
        }
    }
    for row in 0..10 {
        for col in 0..20 {
            let x = 1.0 + col as f32 * 0.013;
            let y = 1.0 + row as f32 * 0.017;
            points.push(noisy(points.len(), x, y, 0.05 + 0.001 * col as f32));
        }
    }
    PointCloud::from_points(points)
}

fn survivors(cloud: &PointCloud<Point3f>, removal: &RemovalSet) -> PointCloud<Point3f> {
    let mut kept = cloud.clone();
    kept.remove_indices(removal.as_slice()).unwrap();
    kept
}

fn assert_valid_removal(cloud_len: usize, removal: &RemovalSet) {
    assert!(removal.iter().all(|&i| i < cloud_len), "identifier out of range");
    assert!(
        removal.as_slice().windows(2).all(|w| w[0] < w[1]),
        "identifiers must be unique and ascending"
    );
    assert!(removal.len() < cloud_len, "at least one point must survive");
}

fn assert_min_distance(points: &[Point3f], threshold: f32) {
    for i in 0..points.len() {
        for j in (i + 1)..points.len() {
            let d = (points[i] - points[j]).norm();
            assert!(d >= threshold, "points {} and {} are {} apart", i, j, d);
        }
    }
}

fn all_strategies(spacing: f32, len: usize) -> Vec<SimplificationStrategy> {
    vec![
        SimplificationStrategy::CountTarget { expected: len / 3 },
        SimplificationStrategy::DistanceThreshold { threshold: spacing * 2.0 },
        SimplificationStrategy::DistanceThresholdUniform { threshold: spacing * 2.0 },
        SimplificationStrategy::GridBased { cell_size: spacing * 2.0 },
    ]
}

#[test]
fn test_removal_sets_are_valid_for_every_strategy() {
    for cloud in [create_sphere_point_cloud(2.0, 1500), create_uneven_scan()] {
        let index = KdTree::new(&cloud.points).unwrap();
        let spacing = average_spacing(&cloud, &index, DEFAULT_SPACING_NEIGHBORS).unwrap();
        assert!(spacing > 0.0);

        for strategy in all_strategies(spacing, cloud.len()) {
            let removal = simplify(&cloud, strategy, Some(&index)).unwrap();
            assert_valid_removal(cloud.len(), &removal);
            assert!(!removal.is_empty(), "{:?} removed nothing", strategy);
        }
    }
}

#[test]
fn test_threshold_guarantee_both_modes() {
    let cloud = create_uneven_scan();
    let index = KdTree::new(&cloud.points).unwrap();

    for &threshold in &[0.04f32, 0.12, 0.5] {
        for strategy in [
            SimplificationStrategy::DistanceThreshold { threshold },
            SimplificationStrategy::DistanceThresholdUniform { threshold },
        ] {
            let removal = simplify(&cloud, strategy, Some(&index)).unwrap();
            assert_min_distance(&survivors(&cloud, &removal).points, threshold);
        }
    }
}

#[test]
fn test_count_target_exactness() {
    let cloud = create_sphere_point_cloud(1.0, 777);
    for expected in [1usize, 7, 100, 776, 777, 5000] {
        let removal = simplify(&cloud, SimplificationStrategy::CountTarget { expected }, None).unwrap();
        assert_eq!(removal.remaining(cloud.len()), expected.min(cloud.len()));
    }
}

#[test]
fn test_grid_idempotence() {
    let cloud = create_uneven_scan();
    let strategy = SimplificationStrategy::GridBased { cell_size: 0.15 };

    let first = simplify(&cloud, strategy, None).unwrap();
    let kept = survivors(&cloud, &first);
    let second = simplify(&kept, strategy, None).unwrap();
    assert!(second.is_empty());
}

#[test]
fn test_three_by_three_grid_scenario() {
    let cloud: PointCloud<Point3f> = (0..9)
        .map(|i| Point3f::new((i % 3) as f32, (i / 3) as f32, 0.0))
        .collect();

    let removal = simplify(&cloud, SimplificationStrategy::GridBased { cell_size: 1.5 }, None).unwrap();
    assert_eq!(removal.len(), 9 - 4);
    let again = simplify(&cloud, SimplificationStrategy::GridBased { cell_size: 1.5 }, None).unwrap();
    assert_eq!(removal, again);
}

#[test]
fn test_collinear_threshold_scenario() {
    let cloud: PointCloud<Point3f> = (0..5).map(|i| Point3f::new(i as f32, 0.0, 0.0)).collect();
    let removal = simplify(&cloud, SimplificationStrategy::DistanceThreshold { threshold: 1.5 }, None).unwrap();
    assert_eq!(removal.into_vec(), vec![1, 3]);
}

#[test]
fn test_spacing_scales_with_cloud() {
    let cloud = create_sphere_point_cloud(1.0, 600);
    let index = BruteForceSearch::new(&cloud.points);
    let base = average_spacing(&cloud, &index, DEFAULT_SPACING_NEIGHBORS).unwrap();

    let mut scaled = cloud.clone();
    scaled.transform(&Transform3D::uniform_scaling(7.5));
    let index = BruteForceSearch::new(&scaled.points);
    let spacing = average_spacing(&scaled, &index, DEFAULT_SPACING_NEIGHBORS).unwrap();

    approx::assert_relative_eq!(spacing, base * 7.5, max_relative = 1e-4);
}

#[test]
fn test_uniform_mode_spreads_scan_lines_evenly() {
    // Dense scan lines, rows farther apart than the threshold
    let mut points = Vec::new();
    for row in 0..20 {
        for col in 0..200 {
            points.push(noisy(points.len(), col as f32 * 0.01, row as f32 * 0.3, 0.0));
        }
    }
    let cloud = PointCloud::from_points(points);
    let index = KdTree::new(&cloud.points).unwrap();
    let threshold = 0.25;

    let uniform = simplify(&cloud, SimplificationStrategy::DistanceThresholdUniform { threshold }, Some(&index)).unwrap();
    let kept = survivors(&cloud, &uniform);
    assert_min_distance(&kept.points, threshold);

    // Every original point is still represented by a survivor within the threshold
    let kept_index = BruteForceSearch::new(&kept.points);
    for p in cloud.iter() {
        assert!(!kept_index.find_radius_neighbors(p, threshold).is_empty());
    }
}

#[test]
fn test_strategies_accept_attributed_points() {
    let cloud: PointCloud<ColoredPoint3f> = create_sphere_point_cloud(1.0, 300)
        .into_iter()
        .map(|position| ColoredPoint3f { position, color: [200, 10, 10] })
        .collect();
    let index = KdTree::new(&cloud.positions()).unwrap();

    for strategy in all_strategies(0.1, cloud.len()) {
        let removal = simplify(&cloud, strategy, Some(&index)).unwrap();
        assert_valid_removal(cloud.len(), &removal);
    }
}

#[test]
fn test_precondition_failures() {
    let empty = PointCloud::<Point3f>::new();
    let cloud = create_sphere_point_cloud(1.0, 50);
    let index = KdTree::new(&cloud.points).unwrap();
    let other = KdTree::new(&cloud.points[..10]).unwrap();

    for strategy in all_strategies(0.1, 10) {
        assert!(simplify(&empty, strategy, Some(&index)).is_err());
    }
    assert!(simplify(&cloud, SimplificationStrategy::CountTarget { expected: 0 }, None).is_err());
    assert!(simplify(&cloud, SimplificationStrategy::DistanceThreshold { threshold: 0.0 }, None).is_err());
    assert!(simplify(&cloud, SimplificationStrategy::GridBased { cell_size: -0.5 }, None).is_err());
    assert!(simplify(&cloud, SimplificationStrategy::DistanceThresholdUniform { threshold: 0.2 }, None).is_err());
    assert!(simplify(&cloud, SimplificationStrategy::DistanceThresholdUniform { threshold: 0.2 }, Some(&other)).is_err());
    assert!(average_spacing(&cloud, &other, 6).is_err());
}

#[test]
fn test_interactive_session_workflow() {
    let mut cloud = create_sphere_point_cloud(3.0, 2000);
    let mut session = SimplificationSession::new();

    let spacing = session.average_spacing(&cloud).unwrap();
    assert!(spacing > 0.0);

    let threshold = spacing * 3.0;
    let remaining = session
        .query(&cloud, SimplificationStrategy::DistanceThresholdUniform { threshold })
        .unwrap();
    assert!(remaining < cloud.len());

    let removed = session.apply(&mut cloud).unwrap();
    assert_eq!(cloud.len(), remaining);
    assert_eq!(removed, 2000 - remaining);
    assert_min_distance(&cloud.points, threshold);

    // Next round on the compacted cloud
    let remaining = session
        .query(&cloud, SimplificationStrategy::CountTarget { expected: 50 })
        .unwrap();
    assert_eq!(remaining, 50);
    session.apply(&mut cloud).unwrap();
    assert_eq!(cloud.len(), 50);

    // Nothing pending any more
    assert_eq!(session.apply(&mut cloud).unwrap(), 0);
}

#[test]
fn test_session_handles_degenerate_layouts() {
    let planar: PointCloud<Point3f> = (0..400)
        .map(|i| Point3f::new((i % 20) as f32, (i / 20) as f32, 0.0))
        .collect();
    let collinear: PointCloud<Point3f> = (0..200).map(|i| Point3f::new(i as f32 * 0.1, 0.0, 0.0)).collect();
    let mut duplicated = PointCloud::from_points(vec![Point3f::new(0.3, 0.3, 0.3); 40]);
    duplicated.push(Point3f::new(5.0, 0.3, 0.3));

    let mut session = SimplificationSession::new();
    let spacing = session.average_spacing(&planar).unwrap();
    // Interior points: four neighbors at 1 and two diagonals at sqrt(2)
    assert!(spacing >= 1.13 && spacing < 1.5, "spacing = {}", spacing);
    let brute = BruteForceSearch::new(&planar.points);
    approx::assert_relative_eq!(
        spacing,
        average_spacing(&planar, &brute, DEFAULT_SPACING_NEIGHBORS).unwrap(),
        epsilon = 1e-5
    );

    let spacing = session.average_spacing(&collinear).unwrap();
    assert!(spacing > 0.1 && spacing < 0.3, "spacing = {}", spacing);

    let remaining = session
        .query(&planar, SimplificationStrategy::DistanceThresholdUniform { threshold: 1.5 })
        .unwrap();
    assert!(remaining > 1 && remaining < planar.len());

    let remaining = session
        .query(&duplicated, SimplificationStrategy::DistanceThresholdUniform { threshold: 0.5 })
        .unwrap();
    assert_eq!(remaining, 2);
    session.apply(&mut duplicated).unwrap();
    assert_min_distance(&duplicated.points, 0.5);
}
