use log::trace;
use ra_core::Point2i;

use crate::sink::PointSink;

/// Xiaolin Wu antialiased line.
///
/// Endpoints are plotted with full weight. Every interior column along the
/// major axis gets two points straddling the ideal line, weighted
/// `1 - frac` and `frac` so each pair sums to exactly 1. Points are emitted
/// from the endpoint with the smaller major coordinate.
///
/// Identical endpoints produce one point.
pub fn line_wu<S: PointSink + ?Sized>(from: Point2i, to: Point2i, sink: &mut S) {
    if from == to {
        sink.plot(from, 1.0);
        return;
    }

    let (mut x0, mut y0) = (i64::from(from.x), i64::from(from.y));
    let (mut x1, mut y1) = (i64::from(to.x), i64::from(to.y));
    let steep = (y1 - y0).abs() > (x1 - x0).abs();
    if steep {
        std::mem::swap(&mut x0, &mut y0);
        std::mem::swap(&mut x1, &mut y1);
    }
    if x0 > x1 {
        std::mem::swap(&mut x0, &mut x1);
        std::mem::swap(&mut y0, &mut y1);
    }

    let dx = (x1 - x0) as f64;
    let dy = (y1 - y0) as f64;
    let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

    let mut plot = |major: i64, minor: i64, weight: f32| {
        // Both coordinates lie between the i32 endpoints.
        let p = if steep {
            Point2i::new(minor as i32, major as i32)
        } else {
            Point2i::new(major as i32, minor as i32)
        };
        sink.plot(p, weight);
    };

    plot(x0, y0, 1.0);
    let mut intery = y0 as f64 + gradient;
    for x in x0 + 1..x1 {
        let base = intery.floor();
        let frac = (intery - base) as f32;
        trace!("line_wu: x={x} y={intery:.2} w=({:.2}, {frac:.2})", 1.0 - frac);
        plot(x, base as i64, 1.0 - frac);
        plot(x, base as i64 + 1, frac);
        intery += gradient;
    }
    plot(x1, y1, 1.0);
}

#[cfg(test)]
mod tests {
    use ra_core::Point2i;

    use super::line_wu;
    use crate::sink::{Coverage, PointSink, WeightedPoint};

    fn wu(a: (i32, i32), b: (i32, i32)) -> Vec<WeightedPoint> {
        let mut out = Vec::new();
        line_wu(a.into(), b.into(), &mut out);
        out
    }

    #[test]
    fn identical_endpoints_emit_one_point() {
        let out = wu((7, -3), (7, -3));
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].p, Point2i::new(7, -3));
        assert_eq!(out[0].weight, 1.0);
    }

    #[test]
    fn pair_weights_sum_to_one() {
        for (a, b) in [((0, 0), (15, 10)), ((3, 1), (-20, 7)), ((0, 0), (4, 17))] {
            let out = wu(a, b);
            let interior = &out[1..out.len() - 1];
            assert!(interior.len().is_multiple_of(2));
            for pair in interior.chunks(2) {
                assert_eq!(pair[0].weight + pair[1].weight, 1.0);
                assert!((0.0..=1.0).contains(&pair[0].weight));
                assert!((0.0..=1.0).contains(&pair[1].weight));
            }
        }
    }

    #[test]
    fn endpoints_have_full_weight() {
        let out = wu((15, 10), (0, 0));
        let first = out.first().unwrap();
        let last = out.last().unwrap();
        assert_eq!((first.p, first.weight), (Point2i::new(0, 0), 1.0));
        assert_eq!((last.p, last.weight), (Point2i::new(15, 10), 1.0));
        assert_eq!(out.len(), 2 + 2 * 14);
    }

    #[test]
    fn steep_line_walks_rows() {
        let out = wu((0, 0), (2, 8));
        let interior = &out[1..out.len() - 1];
        assert_eq!(interior.len(), 2 * 7);
        for (i, pair) in interior.chunks(2).enumerate() {
            let row = i as i32 + 1;
            assert_eq!(pair[0].p.y, row);
            assert_eq!(pair[1].p.y, row);
            assert_eq!(pair[1].p.x, pair[0].p.x + 1);
        }
        // x = 0.25 * row
        assert_eq!(interior[0].p.x, 0);
        assert_eq!(interior[0].weight, 0.75);
        assert_eq!(interior[1].weight, 0.25);
    }

    #[test]
    fn horizontal_line_has_zero_secondary_weight() {
        let out = wu((0, 2), (4, 2));
        let mut cov = Coverage::new();
        for p in &out {
            assert_eq!(p.p.y == 2, p.weight == 1.0);
            cov.plot(p.p, p.weight);
        }
        assert_eq!(cov.len(), 5);
        for x in 0..=4 {
            assert_eq!(cov.get(Point2i::new(x, 2)), 1.0);
        }
    }
}
