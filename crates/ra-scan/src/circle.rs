use log::trace;
use ra_core::Point2i;

use crate::sink::PointSink;

/// Bresenham midpoint circle around `center`.
///
/// Walks the second octant from `(0, r)` while `y >= x`. The decision value
/// starts at `d = 3 - 2r` and is advanced from the current `(x, y)` before
/// stepping. Each step is reflected into all eight octants; reflections that
/// coincide (on the axes and diagonals) are emitted once per step. A step on
/// an axis or the diagonal therefore plots 4 points instead of 8, so the
/// number of emissions is below `8 * steps` while the point set is the same.
/// Points whose coordinates leave the `i32` range are dropped. Radius zero
/// yields the center alone.
pub fn circle_bresenham<S: PointSink + ?Sized>(center: Point2i, radius: u32, sink: &mut S) {
    let cx = i64::from(center.x);
    let cy = i64::from(center.y);
    let mut x: i64 = 0;
    let mut y = i64::from(radius);
    let mut d = 3 - 2 * y;

    while y >= x {
        plot_octants(cx, cy, x, y, sink);
        trace!("circle_bresenham: x={x} y={y} d={d}");
        if d > 0 {
            d += 4 * (x - y) + 10;
            y -= 1;
        } else {
            d += 4 * x + 6;
        }
        x += 1;
    }
}

fn plot_octants<S: PointSink + ?Sized>(cx: i64, cy: i64, x: i64, y: i64, sink: &mut S) {
    let offsets = [
        (x, y),
        (-x, y),
        (x, -y),
        (-x, -y),
        (y, x),
        (-y, x),
        (y, -x),
        (-y, -x),
    ];
    for (i, &(ox, oy)) in offsets.iter().enumerate() {
        if offsets[..i].contains(&(ox, oy)) {
            continue;
        }
        if let (Ok(px), Ok(py)) = (i32::try_from(cx + ox), i32::try_from(cy + oy)) {
            sink.plot(Point2i::new(px, py), 1.0);
        }
    }
}
