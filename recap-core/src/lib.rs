//! Token-budgeted, sentence-aware text chunking
//!
//! Long transcripts have to be cut into pieces before they fit the input
//! window of a summarisation model. This crate does the cutting: it
//! segments text into sentences and packs whole sentences into chunks
//! whose token count stays within a budget.
//!
//! # Architecture
//!
//! - **Capabilities**: [`Tokenizer`] (text ⇄ token ids) and
//!   [`SentenceSegmenter`] (text → sentences), built once and borrowed.
//! - **Chunker**: [`TokenChunker`], a pure function of text, budget and
//!   capabilities.
//!
//! # Example
//!
//! ```rust
//! use recap_core::{ByteTokenizer, ChunkerConfig, EnglishSegmenter, TokenChunker};
//!
//! let tokenizer = ByteTokenizer;
//! let segmenter = EnglishSegmenter::new();
//! let config = ChunkerConfig::with_max_tokens(100).unwrap();
//!
//! let chunker = TokenChunker::new(&tokenizer, &segmenter, config).unwrap();
//! let chunks = chunker.split_into_chunks("Hi there. This is a test.").unwrap();
//! assert_eq!(chunks, vec!["Hi there. This is a test."]);
//! ```

#![warn(missing_docs)]

pub mod chunker;
pub mod config;
pub mod error;
pub mod segment;
pub mod tokenizer;

pub use chunker::{
    split_into_chunks, Chunk, ChunkOutput, ChunkStats, DroppedFragment, TokenChunker,
};
pub use config::{ChunkerConfig, ChunkerConfigBuilder, OverflowPolicy};
pub use error::{CoreError, Result};
pub use segment::{EnglishSegmenter, SegmenterKind, SentenceSegmenter, UnicodeSegmenter};
pub use tokenizer::{ByteTokenizer, TokenId, Tokenizer, TokenizerKind};

#[cfg(feature = "tiktoken")]
pub use tokenizer::{BpeEncoding, TiktokenTokenizer};

#[cfg(feature = "huggingface")]
pub use tokenizer::HuggingFaceTokenizer;
