//! Chunker configuration

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default configuration constants
pub mod defaults {
    /// Default token budget per chunk (the BART-large-CNN input limit)
    pub const MAX_TOKENS: usize = 1024;
}

/// What to do with a slice of an over-long sentence that is still over budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverflowPolicy {
    /// Drop the slice and keep going (its text is lost from the output)
    #[default]
    Drop,
    /// Fail with [`CoreError::FragmentOverBudget`]
    Reject,
}

impl fmt::Display for OverflowPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverflowPolicy::Drop => write!(f, "drop"),
            OverflowPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for OverflowPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "drop" => Ok(OverflowPolicy::Drop),
            "reject" | "strict" => Ok(OverflowPolicy::Reject),
            other => Err(CoreError::InvalidArgument(format!(
                "unknown overflow policy '{other}'"
            ))),
        }
    }
}

/// Chunking configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkerConfig {
    pub(crate) max_tokens: usize,
    #[serde(default)]
    pub(crate) overflow: OverflowPolicy,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: defaults::MAX_TOKENS,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl ChunkerConfig {
    /// Create a configuration builder
    pub fn builder() -> ChunkerConfigBuilder {
        ChunkerConfigBuilder::default()
    }

    /// Shorthand for a validated config with the given budget and default policy
    pub fn with_max_tokens(max_tokens: i64) -> Result<Self> {
        Self::builder().max_tokens(max_tokens).build()
    }

    /// Token budget per chunk
    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    /// Overflow policy for over-budget fragments
    pub fn overflow(&self) -> OverflowPolicy {
        self.overflow
    }

    /// Width, in characters, of the slices an over-long sentence is cut into
    pub fn slice_width(&self) -> usize {
        (self.max_tokens / 2).max(1)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_tokens == 0 {
            return Err(CoreError::InvalidArgument(
                "max_tokens must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

/// Fluent builder for [`ChunkerConfig`]
#[derive(Debug, Default)]
pub struct ChunkerConfigBuilder {
    max_tokens: Option<i64>,
    overflow: Option<OverflowPolicy>,
}

impl ChunkerConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the token budget; non-positive values are rejected by [`build`](Self::build)
    pub fn max_tokens(mut self, max_tokens: i64) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the overflow policy
    pub fn overflow(mut self, policy: OverflowPolicy) -> Self {
        self.overflow = Some(policy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ChunkerConfig> {
        let mut config = ChunkerConfig::default();

        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = budget_from_signed(max_tokens)?;
        }

        if let Some(policy) = self.overflow {
            config.overflow = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Convert a caller-supplied signed budget into a positive `usize`
pub(crate) fn budget_from_signed(max_tokens: i64) -> Result<usize> {
    if max_tokens <= 0 {
        return Err(CoreError::InvalidArgument(format!(
            "max_tokens must be greater than 0, got {max_tokens}"
        )));
    }
    usize::try_from(max_tokens).map_err(|_| {
        CoreError::InvalidArgument(format!("max_tokens {max_tokens} does not fit this platform"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChunkerConfig::default();
        assert_eq!(config.max_tokens(), 1024);
        assert_eq!(config.overflow(), OverflowPolicy::Drop);
        assert_eq!(config.slice_width(), 512);
    }

    #[test]
    fn test_builder_rejects_non_positive_budget() {
        for bad in [0, -1, i64::MIN] {
            let err = ChunkerConfig::builder().max_tokens(bad).build().unwrap_err();
            assert!(matches!(err, CoreError::InvalidArgument(_)));
        }
    }

    #[test]
    fn test_builder_sets_fields() {
        let config = ChunkerConfig::builder()
            .max_tokens(100)
            .overflow(OverflowPolicy::Reject)
            .build()
            .unwrap();
        assert_eq!(config.max_tokens(), 100);
        assert_eq!(config.overflow(), OverflowPolicy::Reject);
        assert_eq!(config.slice_width(), 50);
    }

    #[test]
    fn test_slice_width_never_zero() {
        let config = ChunkerConfig::with_max_tokens(1).unwrap();
        assert_eq!(config.slice_width(), 1);
    }

    #[test]
    fn test_overflow_policy_parsing() {
        assert_eq!("drop".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Drop);
        assert_eq!("Strict".parse::<OverflowPolicy>().unwrap(), OverflowPolicy::Reject);
        assert!("explode".parse::<OverflowPolicy>().is_err());
        assert_eq!(OverflowPolicy::Reject.to_string(), "reject");
    }

    #[test]
    fn test_zero_budget_fails_validation() {
        let config = ChunkerConfig {
            max_tokens: 0,
            overflow: OverflowPolicy::Drop,
        };
        assert!(config.validate().is_err());
    }
}
