//! Neighborhood smoothing for 8-bit RGBA buffers.
//!
//! Kernels are square, odd-sized and normalized to unit sum after
//! construction. Convolution treats R, G, B and A independently; each output
//! channel is the weighted window sum divided by the weights actually used,
//! rounded to nearest and clamped to `[0, 255]`.
//!
//! Windows that extend past the buffer sample the nearest edge pixel by
//! default ([`BorderMode::Clamp`](ra_core::BorderMode::Clamp)); nothing is
//! ever read outside the source.
//!
//! With the `parallel` feature, rows are convolved on the rayon pool. Every
//! output row depends only on the read-only source, and results are identical
//! to the sequential path.

pub mod conv2d;
pub mod kernel;

pub use conv2d::{SmoothConfig, convolve_rgba, smooth};
pub use kernel::{Kernel2D, KernelKind};
