use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    SizeMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidStride,
    EmptyImage,
    /// A numeric parameter outside its domain. Reported before any output is
    /// allocated.
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
}

impl Error {
    pub fn invalid(name: &'static str, value: impl Into<f64>, requirement: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value: value.into(),
            requirement,
        }
    }
}

/// Validates an odd window or kernel side length `>= 3` and returns its radius.
pub fn odd_window_radius(name: &'static str, size: usize) -> Result<usize, Error> {
    if size < 3 || size.is_multiple_of(2) {
        return Err(Error::invalid(name, size as f64, "must be odd and >= 3"));
    }
    Ok(size / 2)
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SizeMismatch { expected, actual } => {
                write!(f, "size mismatch: expected {expected}, got {actual}")
            }
            Self::InvalidStride => write!(f, "invalid stride"),
            Self::EmptyImage => write!(f, "image must have positive width and height"),
            Self::InvalidParameter {
                name,
                value,
                requirement,
            } => write!(f, "invalid parameter `{name}` = {value}: {requirement}"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::{Error, odd_window_radius};

    #[test]
    fn invalid_parameter_message_names_the_parameter() {
        let err = Error::invalid("size", 4u32, "must be odd and >= 3");
        assert_eq!(
            err.to_string(),
            "invalid parameter `size` = 4: must be odd and >= 3"
        );
    }

    #[test]
    fn odd_window_radius_rejects_even_and_small_sizes() {
        assert_eq!(odd_window_radius("size", 3), Ok(1));
        assert_eq!(odd_window_radius("size", 15), Ok(7));
        for bad in [0usize, 1, 2, 4, 16] {
            assert!(matches!(
                odd_window_radius("size", bad),
                Err(Error::InvalidParameter { name: "size", .. })
            ));
        }
    }
}
