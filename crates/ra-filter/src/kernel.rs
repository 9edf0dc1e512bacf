use ra_core::{Error, odd_window_radius};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KernelKind {
    /// Uniform weights.
    Box,
    /// Weights proportional to `exp(-(i^2 + j^2) / (2 sigma^2))`.
    Gaussian { sigma: f64 },
}

/// Square convolution kernel, row-major, normalized so `sum(weights) ~= 1`.
///
/// Conventions:
/// - `size` is odd and `>= 3`; `radius = size / 2`.
/// - `weight(dx, dy)` addresses offsets in `[-radius, radius]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel2D {
    size: usize,
    radius: usize,
    weights: Vec<f64>,
}

impl Kernel2D {
    pub fn new(kind: KernelKind, size: usize) -> Result<Self, Error> {
        match kind {
            KernelKind::Box => Self::box_filter(size),
            KernelKind::Gaussian { sigma } => Self::gaussian(size, sigma),
        }
    }

    pub fn box_filter(size: usize) -> Result<Self, Error> {
        let radius = odd_window_radius("size", size)?;
        let value = 1.0 / (size * size) as f64;
        Ok(Self::normalized(size, radius, vec![value; size * size]))
    }

    pub fn gaussian(size: usize, sigma: f64) -> Result<Self, Error> {
        let radius = odd_window_radius("size", size)?;
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(Error::invalid("sigma", sigma, "must be > 0 and finite"));
        }

        let sigma2 = sigma * sigma;
        let r = radius as isize;
        let mut weights = Vec::with_capacity(size * size);
        for i in -r..=r {
            for j in -r..=r {
                // `2 sigma^2` may underflow to zero; the center stays 1.
                let w = if i == 0 && j == 0 {
                    1.0
                } else {
                    let d2 = (i * i + j * j) as f64;
                    (-d2 / (2.0 * sigma2)).exp()
                };
                weights.push(w);
            }
        }

        Ok(Self::normalized(size, radius, weights))
    }

    // Rescales to unit sum; the Gaussian `1 / (2 pi sigma^2)` factor cancels.
    fn normalized(size: usize, radius: usize, mut weights: Vec<f64>) -> Self {
        let sum: f64 = weights.iter().sum();
        if sum > 0.0 {
            for w in &mut weights {
                *w /= sum;
            }
        }

        Self {
            size,
            radius,
            weights,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Weight at offset `(dx, dy)` from the kernel center.
    pub fn weight(&self, dx: isize, dy: isize) -> f64 {
        let r = self.radius as isize;
        assert!(
            (-r..=r).contains(&dx) && (-r..=r).contains(&dy),
            "kernel offset out of range"
        );
        self.weights[(dy + r) as usize * self.size + (dx + r) as usize]
    }

    pub fn row(&self, j: usize) -> &[f64] {
        &self.weights[j * self.size..(j + 1) * self.size]
    }

    pub fn sum(&self) -> f64 {
        self.weights.iter().sum()
    }
}
