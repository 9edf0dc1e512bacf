/// One 8-bit-per-channel RGBA pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn gray(v: u8) -> Self {
        Self::opaque(v, v, v)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }

    /// Luminance with each weighted channel truncated before summing.
    ///
    /// The sum never exceeds 254 for 8-bit input. Alpha is ignored.
    pub fn luma(self) -> u8 {
        let r = (f64::from(self.r) * 0.299) as u32;
        let g = (f64::from(self.g) * 0.587) as u32;
        let b = (f64::from(self.b) * 0.114) as u32;
        (r + g + b) as u8
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self::from_array(c)
    }
}
