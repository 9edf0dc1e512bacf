//! Foundational primitives for the raster algorithm crates.
//!
//! ## Pixel Buffers
//! [`Image`] owns a row-major grid of pixels with positive dimensions.
//! [`PixelBuffer`] is the 8-bit RGBA carrier consumed by the filters and
//! [`GrayImage`] the single-channel buffer they derive. Buffers are never
//! mutated after construction: every operation allocates a fresh result.
//!
//! ## Views and Stride
//! [`ImageView`] uses element stride (not byte stride). `stride` is the
//! distance, in elements, between adjacent row starts and may be greater than
//! `width`, which allows borrowed views over padded caller buffers.
//!
//! ## Border Modes
//! Neighborhood sampling maps out-of-range indices with [`BorderMode`]:
//! clamp (edge replication) or reflect-101, which mirrors around edge pixels
//! without repeating edge elements.
//!
//! ## Coordinates
//! Grid coordinates are [`Point2i`]; continuous geometry such as curve control
//! points uses [`Point2d`].

mod border;
mod error;
mod geom;
mod image;
mod pixel;

pub use border::{BorderMode, map_index};
pub use error::{Error, odd_window_radius};
pub use geom::{Point2d, Point2i};
pub use image::{GrayImage, Image, ImageView, PixelBuffer, gray_to_rgba, to_gray_u8};
pub use pixel::Rgba8;
