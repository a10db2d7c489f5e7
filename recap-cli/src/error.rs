//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures; everything else travels as `anyhow::Error`
#[derive(Debug)]
pub enum CliError {
    /// Glob pattern could not be parsed
    InvalidPattern(String),
    /// No input file matched the given patterns
    NoInputs(Vec<String>),
    /// Configuration file or flag value is invalid
    ConfigError(String),
    /// Input file is not a usable transcript
    InvalidTranscript {
        /// Offending file
        path: String,
        /// Why it was rejected
        reason: String,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::NoInputs(patterns) => {
                write!(f, "No files found matching: {}", patterns.join(", "))
            }
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::InvalidTranscript { path, reason } => {
                write!(f, "Not a usable transcript ({path}): {reason}")
            }
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_display() {
        let error = CliError::InvalidPattern("[meetings".to_string());
        assert_eq!(error.to_string(), "Invalid file pattern: [meetings");
    }

    #[test]
    fn test_no_inputs_lists_patterns() {
        let error = CliError::NoInputs(vec!["*.vtt".into(), "notes/*.txt".into()]);
        assert_eq!(error.to_string(), "No files found matching: *.vtt, notes/*.txt");
    }

    #[test]
    fn test_config_error_display() {
        let error = CliError::ConfigError("max_tokens must be greater than 0".to_string());
        assert!(error.to_string().starts_with("Configuration error:"));
    }

    #[test]
    fn test_invalid_transcript_display() {
        let error = CliError::InvalidTranscript {
            path: "standup.vtt".into(),
            reason: "parse error on line 1: missing WEBVTT signature".into(),
        };
        assert_eq!(
            error.to_string(),
            "Not a usable transcript (standup.vtt): parse error on line 1: missing WEBVTT signature"
        );
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let result: CliResult<()> = Err(CliError::NoInputs(vec!["x".into()]).into());
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::NoInputs(_))
        ));
    }
}
