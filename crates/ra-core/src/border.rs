#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderMode {
    /// Replicate the nearest edge pixel.
    #[default]
    Clamp,
    Reflect101,
}

/// Maps `i` into `[0, len)`.
///
/// `len` must be non-zero; buffers with a zero dimension cannot be constructed.
pub fn map_index(i: isize, len: usize, mode: BorderMode) -> usize {
    debug_assert!(len > 0, "map_index on an empty axis");
    match mode {
        BorderMode::Clamp => {
            if i < 0 {
                0
            } else {
                (i as usize).min(len - 1)
            }
        }
        BorderMode::Reflect101 => {
            if len == 1 {
                return 0;
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            if r < len { r } else { (2 * len - 2) - r }
        }
    }
}
