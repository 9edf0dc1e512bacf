use ra_core::ImageView;

/// Summed-area tables over gray values and squared gray values.
///
/// Tables are `(width + 1) x (height + 1)` with a zero first row and column,
/// so `sum[y][x]` covers the half-open rectangle `[0, x) x [0, y)`.
#[derive(Debug, Clone)]
pub struct IntegralImage {
    width: usize,
    height: usize,
    sum: Vec<u64>,
    sum_sq: Vec<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowStats {
    pub count: u64,
    pub sum: u64,
    pub sum_sq: u64,
}

impl WindowStats {
    pub fn mean(&self) -> f64 {
        self.sum as f64 / self.count as f64
    }

    /// Population variance, clamped at zero against rounding.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        (self.sum_sq as f64 / self.count as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}

impl IntegralImage {
    pub fn new(src: &ImageView<'_, u8>) -> Self {
        let w = src.width();
        let h = src.height();
        let stride = w + 1;
        let mut sum = vec![0u64; stride * (h + 1)];
        let mut sum_sq = vec![0u64; stride * (h + 1)];

        for y in 0..h {
            let mut row_sum = 0u64;
            let mut row_sq = 0u64;
            for (x, &v) in src.row(y).iter().enumerate() {
                let v = u64::from(v);
                row_sum += v;
                row_sq += v * v;
                let idx = (y + 1) * stride + (x + 1);
                sum[idx] = sum[idx - stride] + row_sum;
                sum_sq[idx] = sum_sq[idx - stride] + row_sq;
            }
        }

        Self {
            width: w,
            height: h,
            sum,
            sum_sq,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Statistics over `[x0, x1) x [y0, y1)`. The rectangle must be non-empty
    /// and inside the image.
    pub fn window(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> WindowStats {
        assert!(
            x0 < x1 && y0 < y1 && x1 <= self.width && y1 <= self.height,
            "window out of bounds"
        );
        let stride = self.width + 1;
        let rect = |t: &[u64]| {
            t[y1 * stride + x1] + t[y0 * stride + x0] - t[y0 * stride + x1] - t[y1 * stride + x0]
        };

        WindowStats {
            count: ((x1 - x0) * (y1 - y0)) as u64,
            sum: rect(&self.sum),
            sum_sq: rect(&self.sum_sq),
        }
    }

    /// Statistics of the `(2 * radius + 1)` square window centered at
    /// `(x, y)`, clipped to the image.
    pub fn clipped_window(&self, x: usize, y: usize, radius: usize) -> WindowStats {
        let x0 = x.saturating_sub(radius);
        let y0 = y.saturating_sub(radius);
        let x1 = (x + radius + 1).min(self.width);
        let y1 = (y + radius + 1).min(self.height);
        self.window(x0, y0, x1, y1)
    }
}
