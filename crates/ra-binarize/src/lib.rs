//! Local adaptive binarization.
//!
//! Each pixel is compared against a threshold computed from the mean and
//! standard deviation of the gray values in a square window around it:
//! - Niblack: `T = mean + k * std`.
//! - Sauvola: `T = mean * (1 + k * (std / R - 1))`.
//!
//! Outputs are `255` where `center > T` and `0` otherwise, so an exact tie is
//! background. Zero-variance windows are well defined: `std = 0`.
//!
//! Border policy is explicit, see [`WindowBorder`]. Window statistics come
//! from summed-area tables and are exact integer sums, identical to a direct
//! window scan.

mod integral;
mod threshold;

pub use integral::{IntegralImage, WindowStats};
pub use threshold::{
    SAUVOLA_DEFAULT_R, ThresholdMethod, ThresholdParams, WindowBorder, binarize, binarize_gray,
};
