//! Bézier curve sampling
//!
//! Evenly parameterized samples along quadratic and cubic Bézier curves,
//! computed with De Casteljau's repeated linear interpolation. Works for
//! points of any dimension (2D and 3D in practice).

use nalgebra::Point;

use crate::{Error, Result};

#[inline]
fn lerp<const D: usize>(a: &Point<f32, D>, b: &Point<f32, D>, t: f32) -> Point<f32, D> {
    Point::from(a.coords.lerp(&b.coords, t))
}

fn check_steps(steps: usize) -> Result<()> {
    if steps == 0 {
        return Err(Error::InvalidParameter(
            "curve sampling needs at least one step".to_string(),
        ));
    }
    Ok(())
}

/// Sample a quadratic Bézier curve with control points `a`, `b`, `c`.
///
/// Returns `steps + 1` points at `t = i / steps`; the first is `a` and the
/// last is `c`.
pub fn quadratic<const D: usize>(
    a: &Point<f32, D>,
    b: &Point<f32, D>,
    c: &Point<f32, D>,
    steps: usize,
) -> Result<Vec<Point<f32, D>>> {
    check_steps(steps)?;

    let curve = (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let ab = lerp(a, b, t);
            let bc = lerp(b, c, t);
            lerp(&ab, &bc, t)
        })
        .collect();
    Ok(curve)
}

/// Sample a cubic Bézier curve with control points `a`, `b`, `c`, `d`.
///
/// Returns `steps + 1` points at `t = i / steps`; the first is `a` and the
/// last is `d`.
pub fn cubic<const D: usize>(
    a: &Point<f32, D>,
    b: &Point<f32, D>,
    c: &Point<f32, D>,
    d: &Point<f32, D>,
    steps: usize,
) -> Result<Vec<Point<f32, D>>> {
    check_steps(steps)?;

    let curve = (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let ab = lerp(a, b, t);
            let bc = lerp(b, c, t);
            let cd = lerp(c, d, t);
            let abc = lerp(&ab, &bc, t);
            let bcd = lerp(&bc, &cd, t);
            lerp(&abc, &bcd, t)
        })
        .collect();
    Ok(curve)
}
