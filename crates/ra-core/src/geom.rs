use core::ops::{Add, Mul, Sub};

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Point2i {
    pub x: i32,
    pub y: i32,
}

impl Point2i {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point2i {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2d {
    pub x: f64,
    pub y: f64,
}

impl Point2d {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn midpoint(self, rhs: Self) -> Self {
        (self + rhs) * 0.5
    }

    /// Largest per-axis distance, `max(|dx|, |dy|)`.
    pub fn chebyshev_distance(self, rhs: Self) -> f64 {
        (self.x - rhs.x).abs().max((self.y - rhs.y).abs())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Grid cell containing this point.
    pub fn floor_cell(self) -> Point2i {
        Point2i {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
        }
    }
}

impl From<Point2i> for Point2d {
    fn from(p: Point2i) -> Self {
        Self {
            x: f64::from(p.x),
            y: f64::from(p.y),
        }
    }
}

impl Add for Point2d {
    type Output = Point2d;

    fn add(self, rhs: Point2d) -> Self::Output {
        Point2d {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Point2d {
    type Output = Point2d;

    fn sub(self, rhs: Point2d) -> Self::Output {
        Point2d {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for Point2d {
    type Output = Point2d;

    fn mul(self, rhs: f64) -> Self::Output {
        Point2d {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}
