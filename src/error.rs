//! Error taxonomy shared by every stage of the pipeline.

use thiserror::Error;

pub type IdenticonResult<T> = Result<T, IdenticonError>;

#[derive(Debug, Error)]
pub enum IdenticonError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IdenticonError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for precondition violations on caller-supplied values.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_are_stable() {
        assert!(IdenticonError::invalid_argument("x")
            .to_string()
            .starts_with("Invalid argument:"));
        assert!(IdenticonError::config("x")
            .to_string()
            .starts_with("Configuration error:"));
    }

    #[test]
    fn test_serde_error_converts() {
        let err: IdenticonError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, IdenticonError::Serialization(_)));
        assert!(!err.is_invalid_argument());
    }
}
