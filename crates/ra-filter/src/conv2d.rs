use log::debug;
use ra_core::{BorderMode, Error, Image, ImageView, PixelBuffer, Rgba8, map_index};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::kernel::{Kernel2D, KernelKind};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothConfig {
    pub kernel: KernelKind,
    /// Odd kernel side length, `>= 3`.
    pub size: usize,
    pub border: BorderMode,
}

impl SmoothConfig {
    pub fn box_filter(size: usize) -> Self {
        Self {
            kernel: KernelKind::Box,
            size,
            ..Self::default()
        }
    }

    pub fn gaussian(size: usize, sigma: f64) -> Self {
        Self {
            kernel: KernelKind::Gaussian { sigma },
            size,
            ..Self::default()
        }
    }
}

impl Default for SmoothConfig {
    fn default() -> Self {
        Self {
            kernel: KernelKind::Box,
            size: 3,
            border: BorderMode::Clamp,
        }
    }
}

/// Smooths `src` with the kernel described by `cfg`.
///
/// Parameters are validated before any output is allocated.
pub fn smooth(src: &ImageView<'_, Rgba8>, cfg: &SmoothConfig) -> Result<PixelBuffer, Error> {
    let kernel = Kernel2D::new(cfg.kernel, cfg.size)?;
    debug!(
        "smooth {}x{} kernel={:?} size={} border={:?}",
        src.width(),
        src.height(),
        cfg.kernel,
        cfg.size,
        cfg.border
    );
    convolve_rgba(src, &kernel, cfg.border)
}

pub fn convolve_rgba(
    src: &ImageView<'_, Rgba8>,
    kernel: &Kernel2D,
    border: BorderMode,
) -> Result<PixelBuffer, Error> {
    let w = src.width();
    let h = src.height();
    let r = kernel.radius();

    // Column lookup for x in [-r, w + r).
    let cols: Vec<usize> = (0..w + 2 * r)
        .map(|i| map_index(i as isize - r as isize, w, border))
        .collect();

    let mut out = vec![Rgba8::default(); w * h];

    #[cfg(feature = "parallel")]
    out.par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| convolve_row(src, kernel, border, &cols, y, row));

    #[cfg(not(feature = "parallel"))]
    for (y, row) in out.chunks_mut(w).enumerate() {
        convolve_row(src, kernel, border, &cols, y, row);
    }

    Image::from_vec(w, h, out)
}

fn convolve_row(
    src: &ImageView<'_, Rgba8>,
    kernel: &Kernel2D,
    border: BorderMode,
    cols: &[usize],
    y: usize,
    out: &mut [Rgba8],
) {
    let size = kernel.size();
    let r = kernel.radius() as isize;
    let src_rows: Vec<&[Rgba8]> = (0..size)
        .map(|j| src.row(map_index(y as isize + j as isize - r, src.height(), border)))
        .collect();

    for (x, out_px) in out.iter_mut().enumerate() {
        let mut acc = [0.0f64; 4];
        let mut weight_sum = 0.0f64;

        for (j, src_row) in src_rows.iter().enumerate() {
            let taps = &cols[x..x + size];
            for (&kv, &sx) in kernel.row(j).iter().zip(taps) {
                let px = src_row[sx];
                acc[0] += f64::from(px.r) * kv;
                acc[1] += f64::from(px.g) * kv;
                acc[2] += f64::from(px.b) * kv;
                acc[3] += f64::from(px.a) * kv;
                weight_sum += kv;
            }
        }

        // A zero-mass kernel leaves the raw sums as they are.
        if weight_sum > 0.0 {
            for c in &mut acc {
                *c /= weight_sum;
            }
        }

        *out_px = Rgba8::new(
            to_channel(acc[0]),
            to_channel(acc[1]),
            to_channel(acc[2]),
            to_channel(acc[3]),
        );
    }
}

#[inline]
fn to_channel(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}
