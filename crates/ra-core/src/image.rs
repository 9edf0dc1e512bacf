use crate::Error;
use crate::pixel::Rgba8;

/// 8-bit RGBA raster, the input and output of the smoothing filters.
pub type PixelBuffer = Image<Rgba8>;

/// Single-channel 8-bit raster.
pub type GrayImage = Image<u8>;

#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }

        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> T,
    ) -> Result<Self, Error> {
        let len = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;
        let mut data = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::from_vec(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Result<Self, Error> {
        let len = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: 0,
        })?;
        Self::from_vec(width, height, vec![value; len])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if width == 0 || height == 0 {
            return Err(Error::EmptyImage);
        }
        if stride < width {
            return Err(Error::InvalidStride);
        }

        let min_len = min_required_len(width, height, stride).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() < min_len {
            return Err(Error::SizeMismatch {
                expected: min_len,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x)
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == self.width
    }
}

fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    let rows_before_last = height.checked_sub(1)?;
    let base = rows_before_last.checked_mul(stride)?;
    base.checked_add(width)
}

/// Converts RGBA to luminance with [`Rgba8::luma`].
pub fn to_gray_u8(img: &ImageView<'_, Rgba8>) -> GrayImage {
    let mut out = Vec::with_capacity(img.width() * img.height());
    for y in 0..img.height() {
        out.extend(img.row(y).iter().map(|px| px.luma()));
    }

    Image {
        width: img.width(),
        height: img.height(),
        data: out,
    }
}

/// Expands a single-channel buffer into opaque gray RGBA.
pub fn gray_to_rgba(img: &ImageView<'_, u8>) -> PixelBuffer {
    let mut out = Vec::with_capacity(img.width() * img.height());
    for y in 0..img.height() {
        out.extend(img.row(y).iter().map(|&v| Rgba8::gray(v)));
    }

    Image {
        width: img.width(),
        height: img.height(),
        data: out,
    }
}
