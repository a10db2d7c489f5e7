//! Layered error types

use recap_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Chunking or capability error
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Malformed WebVTT input
    #[error("parse error on line {line}: {reason}")]
    Parse {
        /// 1-based line number where the problem was found
        line: usize,
        /// What was wrong
        reason: String,
    },

    /// Malformed timestamp
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    /// Summariser backend failed
    #[error("summarizer error: {0}")]
    Summarizer(String),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = EngineError::Parse {
            line: 4,
            reason: "expected cue timing".into(),
        };
        assert_eq!(err.to_string(), "parse error on line 4: expected cue timing");
    }

    #[test]
    fn test_core_error_conversion() {
        let err: EngineError = CoreError::InvalidArgument("max_tokens".into()).into();
        assert!(matches!(err, EngineError::Core(_)));
        assert!(err.to_string().starts_with("core error:"));
    }
}
