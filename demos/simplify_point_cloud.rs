//! Point cloud simplification demo
//!
//! Builds a noisy synthetic scan, estimates its spacing and runs the chosen
//! strategy through a simplification session, printing how many points
//! survive. Set `RUST_LOG=debug` to see the per-pass statistics.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use rand::prelude::*;
use rand::rngs::StdRng;
use threecrate_core::{Point3f, PointCloud};
use threecrate_simplification::{SimplificationSession, SimplificationStrategy, SimplifierConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Strategy {
    /// Keep exactly --count points
    Count,
    /// Greedy distance threshold
    Threshold,
    /// Distance threshold with evenly spread survivors
    Uniform,
    /// One point per grid cell
    Grid,
}

#[derive(Parser)]
#[command(name = "simplify_point_cloud", about = "Simplify a synthetic point cloud")]
struct Args {
    /// Simplification strategy
    #[arg(long, value_enum, default_value_t = Strategy::Uniform)]
    strategy: Strategy,

    /// Number of points in the synthetic scan
    #[arg(long, default_value_t = 50_000)]
    points: usize,

    /// Target point count for the count strategy
    #[arg(long, default_value_t = 10_000)]
    count: usize,

    /// Distance threshold / cell size; defaults to twice the average spacing
    #[arg(long)]
    distance: Option<f32>,

    /// Seed for the scan noise and the randomized strategies
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Noisy samples of a wavy height field, scanned row by row
fn synthetic_scan(n: usize, seed: u64) -> PointCloud<Point3f> {
    let mut rng = StdRng::seed_from_u64(seed);
    let side = (n as f32).sqrt().ceil() as usize;
    let step = 10.0 / side as f32;

    (0..n)
        .map(|i| {
            let x = (i % side) as f32 * step + rng.gen_range(-0.1f32..0.1) * step;
            let y = (i / side) as f32 * step + rng.gen_range(-0.1f32..0.1) * step;
            let z = (x * 0.7).sin() * (y * 0.4).cos() + rng.gen_range(-0.01f32..0.01);
            Point3f::new(x, y, z)
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cloud = synthetic_scan(args.points, args.seed);
    info!("Generated {} points", cloud.len());

    let mut session: SimplificationSession =
        SimplificationSession::with_config(SimplifierConfig::default().with_seed(args.seed));

    let spacing = session.average_spacing(&cloud)?;
    println!("Average spacing: {:.5}", spacing);
    let distance = args.distance.unwrap_or(spacing * 2.0);

    let strategy = match args.strategy {
        Strategy::Count => SimplificationStrategy::CountTarget { expected: args.count },
        Strategy::Threshold => SimplificationStrategy::DistanceThreshold { threshold: distance },
        Strategy::Uniform => SimplificationStrategy::DistanceThresholdUniform { threshold: distance },
        Strategy::Grid => SimplificationStrategy::GridBased { cell_size: distance },
    };

    let remaining = session.query(&cloud, strategy)?;
    println!("{:?}: {} of {} points will remain", strategy, remaining, cloud.len());

    let removed = session.apply(&mut cloud)?;
    println!("Removed {} points, {} remain", removed, cloud.len());
    Ok(())
}
