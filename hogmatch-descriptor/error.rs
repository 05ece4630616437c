use hogmatch_core::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub enum DescriptorError {
    Config(ConfigError),
    CoordinateCountMismatch { xs: usize, ys: usize },
    NonFiniteCoordinate { index: usize },
    PointOutOfBounds { index: usize, x: i64, y: i64, width: usize, height: usize },
    WindowTooLarge { feature_width: usize, width: usize, height: usize },
}

impl std::fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DescriptorError::Config(e) => write!(f, "Descriptor configuration error: {}", e),
            DescriptorError::CoordinateCountMismatch { xs, ys } => {
                write!(f, "Coordinate count mismatch: {} xs vs {} ys", xs, ys)
            }
            DescriptorError::NonFiniteCoordinate { index } => {
                write!(f, "Coordinate of point {} is not finite", index)
            }
            DescriptorError::PointOutOfBounds { index, x, y, width, height } => {
                write!(f, "Point {} at ({}, {}) lies outside {}x{} image", index, x, y, width, height)
            }
            DescriptorError::WindowTooLarge { feature_width, width, height } => {
                write!(f, "Feature width {} does not fit in {}x{} image", feature_width, width, height)
            }
        }
    }
}

impl std::error::Error for DescriptorError {}

impl From<ConfigError> for DescriptorError {
    fn from(err: ConfigError) -> Self {
        DescriptorError::Config(err)
    }
}

pub type DescriptorResult<T> = Result<T, DescriptorError>;
