//! Core error types

use thiserror::Error;

/// Errors raised by the chunker and its capabilities
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Caller supplied an argument outside its domain (e.g. a non-positive token budget)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A character slice of an over-long sentence still exceeds the budget
    /// and the overflow policy forbids dropping it
    #[error("fragment of {tokens} tokens exceeds the budget of {max_tokens} tokens")]
    FragmentOverBudget {
        /// Token count of the offending fragment
        tokens: usize,
        /// Budget in effect
        max_tokens: usize,
    },

    /// Encoding or decoding failed inside a tokenizer backend
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),

    /// The requested capability is unknown or was compiled out
    #[error("Not supported: {0}")]
    Unsupported(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
