use log::{debug, trace};
use ra_core::{Error, Point2d, Point2i};

use crate::sink::PointSink;

/// Default flatness: a piece is a leaf once its end lies within one grid unit
/// of its start on both axes.
pub const BEZIER_FLATNESS: f64 = 1.0;

/// Subdivision depth ceiling. At depth 24 a piece spans `2^-24` of the
/// parameter range, so only non-finite or astronomically large controls hit it.
pub const BEZIER_MAX_DEPTH: u32 = 24;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BezierConfig {
    pub flatness: f64,
    pub max_depth: u32,
}

impl Default for BezierConfig {
    fn default() -> Self {
        Self {
            flatness: BEZIER_FLATNESS,
            max_depth: BEZIER_MAX_DEPTH,
        }
    }
}

/// Cubic Bezier curve from `p0` to `p3` with inner controls `p1`, `p2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Point2d,
    pub p1: Point2d,
    pub p2: Point2d,
    pub p3: Point2d,
}

impl CubicBezier {
    pub const fn new(p0: Point2d, p1: Point2d, p2: Point2d, p3: Point2d) -> Self {
        Self { p0, p1, p2, p3 }
    }

    pub fn from_grid(p0: Point2i, p1: Point2i, p2: Point2i, p3: Point2i) -> Self {
        Self::new(p0.into(), p1.into(), p2.into(), p3.into())
    }

    pub fn controls(&self) -> [Point2d; 4] {
        [self.p0, self.p1, self.p2, self.p3]
    }

    pub fn is_finite(&self) -> bool {
        self.controls().iter().all(|p| p.is_finite())
    }

    /// De Casteljau split at `t = 1/2`.
    pub fn split(&self) -> (Self, Self) {
        let p01 = self.p0.midpoint(self.p1);
        let p12 = self.p1.midpoint(self.p2);
        let p23 = self.p2.midpoint(self.p3);
        let p012 = p01.midpoint(p12);
        let p123 = p12.midpoint(p23);
        let mid = p012.midpoint(p123);
        (
            Self::new(self.p0, p01, p012, mid),
            Self::new(mid, p123, p23, self.p3),
        )
    }

    /// `true` when `p3` lies within `flatness` of `p0` per axis.
    ///
    /// Inner controls are ignored, so a curve that returns to its start
    /// (`p0 == p3`) is a single leaf.
    pub fn is_flat(&self, flatness: f64) -> bool {
        self.p0.chebyshev_distance(self.p3) < flatness
    }

    /// Bernstein evaluation at `t`.
    pub fn eval(&self, t: f64) -> Point2d {
        let u = 1.0 - t;
        self.p0 * (u * u * u)
            + self.p1 * (3.0 * u * u * t)
            + self.p2 * (3.0 * u * t * t)
            + self.p3 * (t * t * t)
    }
}

/// Castle-Pitteway rasterization with the default flatness and depth.
pub fn bezier_castle_pitteway<S: PointSink + ?Sized>(
    curve: &CubicBezier,
    sink: &mut S,
) -> Result<(), Error> {
    bezier_subdivide(curve, &BezierConfig::default(), sink)
}

/// Midpoint subdivision of `curve` until pieces are flat.
///
/// Each leaf plots the grid cell (`floor`) of its start point, so cells come
/// out in curve order, consecutive cells are 8-adjacent or equal, and repeats
/// are kept. Pieces still not flat at `max_depth` are emitted as leaves.
///
/// Fails on non-finite control points or a flatness that is not a positive
/// finite number.
pub fn bezier_subdivide<S: PointSink + ?Sized>(
    curve: &CubicBezier,
    config: &BezierConfig,
    sink: &mut S,
) -> Result<(), Error> {
    if !curve.is_finite() {
        let bad = curve
            .controls()
            .into_iter()
            .flat_map(|p| [p.x, p.y])
            .find(|v| !v.is_finite())
            .unwrap_or(f64::NAN);
        return Err(Error::invalid("control_point", bad, "must be finite"));
    }
    if !(config.flatness.is_finite() && config.flatness > 0.0) {
        return Err(Error::invalid(
            "flatness",
            config.flatness,
            "must be finite and > 0",
        ));
    }

    let mut stack = vec![(*curve, 0u32)];
    let mut leaves = 0usize;
    let mut capped = 0usize;
    while let Some((piece, depth)) = stack.pop() {
        let flat = piece.is_flat(config.flatness);
        if flat || depth >= config.max_depth {
            if !flat {
                capped += 1;
            }
            let cell = piece.p0.floor_cell();
            trace!("bezier: depth={depth} plot({}, {})", cell.x, cell.y);
            sink.plot(cell, 1.0);
            leaves += 1;
            continue;
        }
        let (left, right) = piece.split();
        stack.push((right, depth + 1));
        stack.push((left, depth + 1));
    }

    if capped > 0 {
        debug!(
            "bezier: {capped} of {leaves} leaves stopped at depth ceiling {}",
            config.max_depth
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ra_core::{Error, Point2d, Point2i};

    use super::{BezierConfig, CubicBezier, bezier_castle_pitteway, bezier_subdivide};
    use crate::sink::WeightedPoint;

    fn curve(pts: [(f64, f64); 4]) -> CubicBezier {
        let [a, b, c, d] = pts.map(|(x, y)| Point2d::new(x, y));
        CubicBezier::new(a, b, c, d)
    }

    fn cells(c: &CubicBezier) -> Vec<Point2i> {
        let mut out: Vec<WeightedPoint> = Vec::new();
        bezier_castle_pitteway(c, &mut out).unwrap();
        out.into_iter().map(|p| p.p).collect()
    }

    fn polygon_len(c: &CubicBezier) -> f64 {
        let p = c.controls();
        p.windows(2)
            .map(|w| ((w[1].x - w[0].x).powi(2) + (w[1].y - w[0].y).powi(2)).sqrt())
            .sum()
    }

    #[test]
    fn split_halves_share_the_midpoint() {
        let c = curve([(0.0, 0.0), (5.0, 15.0), (10.0, -5.0), (15.0, 10.0)]);
        let (l, r) = c.split();
        let mid = c.eval(0.5);
        assert_eq!(l.p3, r.p0);
        assert!((l.p3.x - mid.x).abs() < 1e-12 && (l.p3.y - mid.y).abs() < 1e-12);
        let q = l.eval(0.5);
        let expected = c.eval(0.25);
        assert!((q.x - expected.x).abs() < 1e-12 && (q.y - expected.y).abs() < 1e-12);
    }

    #[test]
    fn degenerate_curve_is_one_cell() {
        let c = curve([(2.5, 2.5); 4]);
        assert_eq!(cells(&c), vec![Point2i::new(2, 2)]);
    }

    #[test]
    fn cells_are_connected_and_start_at_p0() {
        for c in [
            curve([(0.0, 0.0), (5.0, 15.0), (10.0, -5.0), (15.0, 10.0)]),
            curve([(-3.5, 7.25), (40.0, -12.0), (-8.0, 30.0), (22.75, 1.5)]),
        ] {
            let out = cells(&c);
            assert_eq!(out[0], c.p0.floor_cell());
            let end = c.p3.floor_cell();
            let last = out[out.len() - 1];
            assert!((last.x - end.x).abs() <= 1 && (last.y - end.y).abs() <= 1);
            for w in out.windows(2) {
                assert!((w[1].x - w[0].x).abs() <= 1 && (w[1].y - w[0].y).abs() <= 1);
            }
            assert!(out.len() <= 2 * (polygon_len(&c).ceil() as usize + 1));
        }
    }

    #[test]
    fn close_endpoints_emit_one_point_regardless_of_inner_controls() {
        for c in [
            curve([(0.0, 0.0), (20.0, 20.0), (-20.0, 20.0), (0.5, 0.5)]),
            curve([(0.0, 0.0), (10.0, 0.0), (10.0, 0.0), (0.0, 0.0)]),
            curve([(3.2, -1.5), (-50.0, 80.0), (60.0, 90.0), (4.1, -0.6)]),
        ] {
            assert!(c.is_flat(1.0));
            assert_eq!(cells(&c), vec![c.p0.floor_cell()]);
        }
    }

    #[test]
    fn depth_ceiling_bounds_output() {
        let c = curve([(0.0, 0.0), (1000.0, 0.0), (2000.0, 0.0), (3000.0, 0.0)]);
        let config = BezierConfig {
            max_depth: 4,
            ..BezierConfig::default()
        };
        let mut out: Vec<WeightedPoint> = Vec::new();
        bezier_subdivide(&c, &config, &mut out).unwrap();
        assert_eq!(out.len(), 16);
        assert_eq!(out[1].p, Point2i::new(187, 0));
    }

    #[test]
    fn rejects_non_finite_input() {
        let c = curve([(0.0, 0.0), (f64::NAN, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let mut out: Vec<WeightedPoint> = Vec::new();
        let err = bezier_castle_pitteway(&c, &mut out).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "control_point",
                ..
            }
        ));
        assert!(out.is_empty());

        let ok = curve([(0.0, 0.0); 4]);
        let config = BezierConfig {
            flatness: 0.0,
            ..BezierConfig::default()
        };
        assert!(bezier_subdivide(&ok, &config, &mut out).is_err());
    }
}
