//! Distance helpers shared by the generators.
//!
//! Subset of `agg_math.h`.

/// Two points closer than this are treated as coincident.
pub const VERTEX_DIST_EPSILON: f64 = 1e-14;

#[inline]
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    (dx * dx + dy * dy).sqrt()
}

#[inline]
pub fn calc_sq_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let dx = x2 - x1;
    let dy = y2 - y1;
    dx * dx + dy * dy
}
