#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    InvalidImageSize { width: usize, height: usize },
    InvalidImageData { expected_len: usize, actual_len: usize },
    NonFiniteSample { index: usize },
    LengthMismatch { what: &'static str, left: usize, right: usize },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidImageSize { width, height } => {
                write!(f, "Invalid image dimensions: {}x{} (must be > 0)", width, height)
            }
            CoreError::InvalidImageData { expected_len, actual_len } => {
                write!(f, "Image data length mismatch: expected {}, got {}", expected_len, actual_len)
            }
            CoreError::NonFiniteSample { index } => {
                write!(f, "Image sample {} is not finite", index)
            }
            CoreError::LengthMismatch { what, left, right } => {
                write!(f, "Length mismatch in {}: {} vs {}", what, left, right)
            }
        }
    }
}

impl std::error::Error for CoreError {}

pub type CoreResult<T> = Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidFeatureWidth { feature_width: usize, reason: &'static str },
    InvalidStride(usize),
    InvalidParameter { name: &'static str, value: f32 },
    InvalidThreadCount(usize),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidFeatureWidth { feature_width, reason } => {
                write!(f, "Invalid feature width {}: {}", feature_width, reason)
            }
            ConfigError::InvalidStride(s) => {
                write!(f, "Invalid detector stride: {} (must be >= 1)", s)
            }
            ConfigError::InvalidParameter { name, value } => {
                write!(f, "Invalid value for {}: {}", name, value)
            }
            ConfigError::InvalidThreadCount(n) => {
                write!(f, "Invalid thread count: {} (must be >= 1)", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
