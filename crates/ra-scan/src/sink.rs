use std::collections::BTreeMap;

use ra_core::{Error, GrayImage, Image, Point2i};

/// Destination for scan-converted points.
pub trait PointSink {
    /// Receives one grid point with coverage `weight` in `[0, 1]`.
    fn plot(&mut self, p: Point2i, weight: f32);
}

impl<S: PointSink + ?Sized> PointSink for &mut S {
    fn plot(&mut self, p: Point2i, weight: f32) {
        (**self).plot(p, weight);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedPoint {
    pub p: Point2i,
    pub weight: f32,
}

/// Append-only sink preserving emission order and duplicates.
impl PointSink for Vec<WeightedPoint> {
    fn plot(&mut self, p: Point2i, weight: f32) {
        self.push(WeightedPoint { p, weight });
    }
}

/// Adapts a closure into a [`PointSink`].
pub struct FnSink<F>(pub F);

impl<F: FnMut(Point2i, f32)> PointSink for FnSink<F> {
    fn plot(&mut self, p: Point2i, weight: f32) {
        (self.0)(p, weight);
    }
}

/// Per-cell coverage accumulated with "over" compositing:
/// `a' = a + w * (1 - a)`.
///
/// Writes commute, so the result does not depend on emission order, and
/// repeated full-weight writes stay at `1.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Coverage {
    cells: BTreeMap<Point2i, f32>,
}

impl Coverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Coverage at `p`, `0.0` when never written.
    pub fn get(&self, p: Point2i) -> f32 {
        self.cells.get(&p).copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Covered cells ordered by `x`, then `y`.
    pub fn iter(&self) -> impl Iterator<Item = (Point2i, f32)> + '_ {
        self.cells.iter().map(|(&p, &a)| (p, a))
    }

    /// Inclusive `(min, max)` corners of all covered cells.
    pub fn bounds(&self) -> Option<(Point2i, Point2i)> {
        let mut it = self.cells.keys();
        let first = *it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| {
            (
                Point2i::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point2i::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Renders the `width x height` window starting at `origin` to gray,
    /// `round(255 * coverage)`. Pixel `(i, j)` shows cell
    /// `(origin.x + i, origin.y + j)`.
    pub fn to_gray_image(
        &self,
        origin: Point2i,
        width: usize,
        height: usize,
    ) -> Result<GrayImage, Error> {
        Image::from_fn(width, height, |i, j| {
            let p = Point2i::new(
                origin.x.saturating_add(i as i32),
                origin.y.saturating_add(j as i32),
            );
            (self.get(p) * 255.0).round().clamp(0.0, 255.0) as u8
        })
    }
}

impl PointSink for Coverage {
    fn plot(&mut self, p: Point2i, weight: f32) {
        // Also rejects NaN.
        if !(weight > 0.0) {
            return;
        }
        let w = weight.min(1.0);
        let a = self.cells.entry(p).or_insert(0.0);
        *a += w * (1.0 - *a);
    }
}

#[cfg(test)]
mod tests {
    use ra_core::Point2i;

    use super::{Coverage, FnSink, PointSink, WeightedPoint};

    #[test]
    fn vec_sink_keeps_order_and_duplicates() {
        let mut pts: Vec<WeightedPoint> = Vec::new();
        pts.plot(Point2i::new(1, 2), 1.0);
        pts.plot(Point2i::new(1, 2), 0.25);
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[1].weight, 0.25);
    }

    #[test]
    fn coverage_composites_instead_of_overwriting() {
        let mut cov = Coverage::new();
        let p = Point2i::new(3, -1);
        cov.plot(p, 0.5);
        cov.plot(p, 0.5);
        assert!((cov.get(p) - 0.75).abs() < 1e-6);

        cov.plot(p, 1.0);
        assert_eq!(cov.get(p), 1.0);
        cov.plot(p, 0.3);
        assert_eq!(cov.get(p), 1.0);

        assert_eq!(cov.get(Point2i::new(0, 0)), 0.0);
    }

    #[test]
    fn coverage_is_order_independent() {
        let writes = [0.2f32, 0.7, 0.4];
        let p = Point2i::new(0, 0);

        let mut a = Coverage::new();
        for w in writes {
            a.plot(p, w);
        }
        let mut b = Coverage::new();
        for w in writes.iter().rev() {
            b.plot(p, *w);
        }
        assert!((a.get(p) - b.get(p)).abs() < 1e-6);
    }

    #[test]
    fn zero_and_nan_weights_leave_no_cell() {
        let mut cov = Coverage::new();
        cov.plot(Point2i::new(0, 0), 0.0);
        cov.plot(Point2i::new(1, 0), f32::NAN);
        assert!(cov.is_empty());
        assert_eq!(cov.bounds(), None);
    }

    #[test]
    fn bounds_and_render() {
        let mut cov = Coverage::new();
        cov.plot(Point2i::new(-1, 2), 1.0);
        cov.plot(Point2i::new(1, 0), 0.5);

        assert_eq!(
            cov.bounds(),
            Some((Point2i::new(-1, 0), Point2i::new(1, 2)))
        );

        let img = cov
            .to_gray_image(Point2i::new(-1, 0), 3, 3)
            .expect("valid image");
        assert_eq!(img.get(0, 2), Some(&255));
        assert_eq!(img.get(2, 0), Some(&128));
        assert_eq!(img.data().iter().filter(|&&v| v > 0).count(), 2);
    }

    #[test]
    fn fn_sink_forwards() {
        let mut count = 0usize;
        {
            let mut sink = FnSink(|_: Point2i, _: f32| count += 1);
            sink.plot(Point2i::new(0, 0), 1.0);
            sink.plot(Point2i::new(0, 1), 1.0);
        }
        assert_eq!(count, 2);
    }
}
