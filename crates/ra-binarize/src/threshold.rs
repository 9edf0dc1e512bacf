use log::debug;
use ra_core::{Error, GrayImage, Image, ImageView, Rgba8, odd_window_radius, to_gray_u8};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::integral::IntegralImage;

/// Canonical Sauvola dynamic range of the standard deviation for 8-bit data.
pub const SAUVOLA_DEFAULT_R: f64 = 128.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ThresholdMethod {
    /// `T = mean + k * std`; negative `k` biases toward background.
    Niblack { k: f64 },
    /// `T = mean * (1 + k * (std / r - 1))`.
    Sauvola { k: f64, r: f64 },
}

impl ThresholdMethod {
    pub fn threshold(&self, mean: f64, std_dev: f64) -> f64 {
        match *self {
            Self::Niblack { k } => mean + k * std_dev,
            Self::Sauvola { k, r } => mean * (1.0 + k * (std_dev / r - 1.0)),
        }
    }

    fn validate(&self) -> Result<(), Error> {
        let k = match *self {
            Self::Niblack { k } => k,
            Self::Sauvola { k, r } => {
                if !(r.is_finite() && r > 0.0) {
                    return Err(Error::invalid("r", r, "must be > 0 and finite"));
                }
                k
            }
        };
        if !k.is_finite() {
            return Err(Error::invalid("k", k, "must be finite"));
        }
        Ok(())
    }
}

/// What happens where the window extends past the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowBorder {
    /// Every pixel is thresholded; the window is clipped to the image, so
    /// fewer samples contribute near the edges.
    #[default]
    Shrink,
    /// Only pixels whose full window fits are thresholded. Pixels closer than
    /// `window_size / 2` to an edge are background.
    InteriorOnly,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdParams {
    pub method: ThresholdMethod,
    /// Odd window side length, `>= 3`.
    pub window_size: usize,
    pub border: WindowBorder,
}

impl ThresholdParams {
    pub fn niblack(window_size: usize, k: f64) -> Self {
        Self {
            method: ThresholdMethod::Niblack { k },
            window_size,
            border: WindowBorder::Shrink,
        }
    }

    /// Sauvola with `R = 128`.
    pub fn sauvola(window_size: usize, k: f64) -> Self {
        Self {
            method: ThresholdMethod::Sauvola {
                k,
                r: SAUVOLA_DEFAULT_R,
            },
            window_size,
            border: WindowBorder::Shrink,
        }
    }

    pub fn with_border(self, border: WindowBorder) -> Self {
        Self { border, ..self }
    }

    /// Returns the window radius.
    pub fn validate(&self) -> Result<usize, Error> {
        let radius = odd_window_radius("window_size", self.window_size)?;
        self.method.validate()?;
        Ok(radius)
    }
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self::niblack(15, -0.2)
    }
}

/// Converts `src` to gray with [`to_gray_u8`] and binarizes it.
pub fn binarize(
    src: &ImageView<'_, Rgba8>,
    params: &ThresholdParams,
) -> Result<GrayImage, Error> {
    params.validate()?;
    let gray = to_gray_u8(src);
    binarize_gray(&gray.as_view(), params)
}

/// Binarizes a gray buffer. Output pixels are `0` or `255`.
pub fn binarize_gray(
    src: &ImageView<'_, u8>,
    params: &ThresholdParams,
) -> Result<GrayImage, Error> {
    let radius = params.validate()?;
    let w = src.width();
    let h = src.height();
    debug!(
        "binarize {w}x{h} method={:?} window={} border={:?}",
        params.method, params.window_size, params.border
    );

    let integral = IntegralImage::new(src);
    let mut out = vec![0u8; w * h];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| threshold_row(src, &integral, params, radius, y, row));

    #[cfg(not(feature = "parallel"))]
    for (y, row) in out.chunks_mut(w).enumerate() {
        threshold_row(src, &integral, params, radius, y, row);
    }

    Image::from_vec(w, h, out)
}

fn threshold_row(
    src: &ImageView<'_, u8>,
    integral: &IntegralImage,
    params: &ThresholdParams,
    radius: usize,
    y: usize,
    out: &mut [u8],
) {
    let w = src.width();
    let h = src.height();
    let xs = match params.border {
        WindowBorder::Shrink => 0..w,
        WindowBorder::InteriorOnly => {
            if y < radius || y + radius >= h {
                return;
            }
            radius..w.saturating_sub(radius)
        }
    };

    let row = src.row(y);
    for x in xs {
        let stats = integral.clipped_window(x, y, radius);
        let t = params.method.threshold(stats.mean(), stats.std_dev());
        out[x] = if f64::from(row[x]) > t { 255 } else { 0 };
    }
}
