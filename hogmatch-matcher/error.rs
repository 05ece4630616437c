use hogmatch_core::{ConfigError, CoreError};

#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    Config(ConfigError),
    Core(CoreError),
    /// The ratio test needs a nearest and a second-nearest candidate.
    InsufficientCandidates { available: usize },
}

impl std::fmt::Display for MatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchError::Config(e) => write!(f, "Matcher configuration error: {}", e),
            MatchError::Core(e) => write!(f, "Match set error: {}", e),
            MatchError::InsufficientCandidates { available } => {
                write!(f, "Ratio test needs at least 2 candidate descriptors, got {}", available)
            }
        }
    }
}

impl std::error::Error for MatchError {}

impl From<ConfigError> for MatchError {
    fn from(err: ConfigError) -> Self {
        MatchError::Config(err)
    }
}

impl From<CoreError> for MatchError {
    fn from(err: CoreError) -> Self {
        MatchError::Core(err)
    }
}

pub type MatchResult<T> = Result<T, MatchError>;
