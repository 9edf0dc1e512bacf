use log::debug;
use ra_core::{Error, Point2i};

use crate::bezier::{CubicBezier, bezier_castle_pitteway};
use crate::circle::circle_bresenham;
use crate::line::{line_bresenham, line_dda, line_naive};
use crate::sink::PointSink;
use crate::wu::line_wu;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LineAlgorithm {
    /// Slope stepping, one point per column.
    Naive,
    Dda,
    #[default]
    Bresenham,
    /// Antialiased, weighted output.
    Wu,
}

impl LineAlgorithm {
    pub const ALL: [LineAlgorithm; 4] = [Self::Naive, Self::Dda, Self::Bresenham, Self::Wu];

    pub fn name(self) -> &'static str {
        match self {
            Self::Naive => "naive",
            Self::Dda => "dda",
            Self::Bresenham => "bresenham",
            Self::Wu => "wu",
        }
    }
}

/// A shape together with the algorithm that scan-converts it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Primitive {
    Line {
        from: Point2i,
        to: Point2i,
        algorithm: LineAlgorithm,
    },
    Circle {
        center: Point2i,
        radius: u32,
    },
    Bezier {
        controls: CubicBezier,
    },
}

/// Scan-converts `primitive` into `sink`.
///
/// Only Bezier curves can fail (non-finite control points).
pub fn rasterize<S: PointSink + ?Sized>(
    primitive: &Primitive,
    sink: &mut S,
) -> Result<(), Error> {
    debug!("rasterize: {primitive:?}");
    match *primitive {
        Primitive::Line {
            from,
            to,
            algorithm,
        } => {
            match algorithm {
                LineAlgorithm::Naive => line_naive(from, to, sink),
                LineAlgorithm::Dda => line_dda(from, to, sink),
                LineAlgorithm::Bresenham => line_bresenham(from, to, sink),
                LineAlgorithm::Wu => line_wu(from, to, sink),
            }
            Ok(())
        }
        Primitive::Circle { center, radius } => {
            circle_bresenham(center, radius, sink);
            Ok(())
        }
        Primitive::Bezier { controls } => bezier_castle_pitteway(&controls, sink),
    }
}
