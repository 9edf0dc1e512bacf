use log::{debug, trace};
use ra_core::Point2i;

use crate::round_half_up;
use crate::sink::PointSink;

/// Slope-stepping line: `y = round(k x + b)` for every integer `x` between the
/// endpoints.
///
/// Endpoints are ordered so `x` increases. One point is emitted per column,
/// so lines with `|dy| > |dx|` have vertical gaps. A vertical span has no
/// slope; it emits the start point only.
pub fn line_naive<S: PointSink + ?Sized>(from: Point2i, to: Point2i, sink: &mut S) {
    let (a, b) = if from.x > to.x { (to, from) } else { (from, to) };
    let dx = i64::from(b.x) - i64::from(a.x);
    let dy = i64::from(b.y) - i64::from(a.y);

    if dx == 0 {
        debug!("line_naive: vertical span at x={}, emitting start only", a.x);
        sink.plot(a, 1.0);
        return;
    }
    if dy.abs() > dx {
        debug!("line_naive: steep slope {dy}/{dx}, output will have gaps");
    }

    let k = dy as f64 / dx as f64;
    let intercept = f64::from(a.y) - k * f64::from(a.x);
    trace!("line_naive: y = {k:.4} x + {intercept:.4}");

    for x in a.x..=b.x {
        let y_calc = k * f64::from(x) + intercept;
        let y = round_half_up(y_calc);
        trace!("line_naive: x={x} y_calc={y_calc:.2} -> y={y}");
        sink.plot(Point2i::new(x, y), 1.0);
    }
}

/// Digital differential analyzer.
///
/// Takes `max(|dx|, |dy|)` equal steps and emits the rounded position at each
/// of the `steps + 1` stops, both endpoints included.
pub fn line_dda<S: PointSink + ?Sized>(from: Point2i, to: Point2i, sink: &mut S) {
    let dx = i64::from(to.x) - i64::from(from.x);
    let dy = i64::from(to.y) - i64::from(from.y);
    let steps = dx.abs().max(dy.abs());

    if steps == 0 {
        sink.plot(from, 1.0);
        return;
    }

    let x_inc = dx as f64 / steps as f64;
    let y_inc = dy as f64 / steps as f64;
    let mut x = f64::from(from.x);
    let mut y = f64::from(from.y);

    for i in 0..=steps {
        trace!("line_dda: step {i} x={x:.2} y={y:.2}");
        sink.plot(Point2i::new(round_half_up(x), round_half_up(y)), 1.0);
        x += x_inc;
        y += y_inc;
    }
}

/// Integer Bresenham line.
///
/// The path is 8-connected and has exactly one point per step along the
/// dominant axis, from `from` to `to` inclusive.
pub fn line_bresenham<S: PointSink + ?Sized>(from: Point2i, to: Point2i, sink: &mut S) {
    let (x1, y1) = (i64::from(to.x), i64::from(to.y));
    let (mut x, mut y) = (i64::from(from.x), i64::from(from.y));
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        trace!("line_bresenham: plot({x}, {y}) err={err}");
        // x and y stay between the i32 endpoints.
        sink.plot(Point2i::new(x as i32, y as i32), 1.0);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}
