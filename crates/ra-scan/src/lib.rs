//! Scan conversion of geometric primitives onto an integer grid.
//!
//! Every algorithm pushes grid points into a [`PointSink`] in traversal order
//! and keeps no state between calls:
//! - [`line_naive`]: slope stepping `y = k x + b`, one point per column. Steep
//!   lines (`|dy| > |dx|`) come out with gaps; that is the algorithm.
//! - [`line_dda`]: fixed-increment digital differential analyzer.
//! - [`line_bresenham`]: integer error term, 8-connected.
//! - [`circle_bresenham`]: midpoint decision recurrence with 8-way symmetry.
//! - [`line_wu`]: antialiased line with fractional coverage weights.
//! - [`bezier_castle_pitteway`]: cubic Bezier by midpoint subdivision.
//!
//! Degenerate input (identical endpoints, zero radius) produces a single
//! point. Zero-width spans never divide by zero.
//!
//! ## Compositing contract
//! Weights are coverage in `[0, 1]`. Only [`line_wu`] emits fractional
//! weights, and it may target the same cell more than once, as can separate
//! calls drawing into one sink. Consumers must composite weighted writes per
//! coordinate, not overwrite; [`Coverage`] does this with "over" blending.

mod bezier;
mod circle;
mod line;
mod primitive;
mod sink;
mod wu;

pub use bezier::{
    BEZIER_FLATNESS, BEZIER_MAX_DEPTH, BezierConfig, CubicBezier, bezier_castle_pitteway,
    bezier_subdivide,
};
pub use circle::circle_bresenham;
pub use line::{line_bresenham, line_dda, line_naive};
pub use primitive::{LineAlgorithm, Primitive, rasterize};
pub use sink::{Coverage, FnSink, PointSink, WeightedPoint};
pub use wu::line_wu;

/// Rounds half-way cases toward positive infinity, `floor(v + 0.5)`.
#[inline]
pub(crate) fn round_half_up(v: f64) -> i32 {
    (v + 0.5).floor() as i32
}
