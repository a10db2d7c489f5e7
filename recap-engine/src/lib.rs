//! Meeting transcript analysis
//!
//! This crate reads WebVTT transcripts and derives speaker statistics, a
//! speaker timeline and chunk-wise summaries. Chunking itself lives in
//! `recap-core`; a [`Session`] ties the pieces together and caches results.
//!
//! ```
//! use recap_core::{ByteTokenizer, ChunkerConfig, EnglishSegmenter, TokenChunker};
//! use recap_engine::{LuhnSummarizer, Session};
//!
//! let vtt = "WEBVTT\n\n00:00:00.000 --> 00:00:03.000\n<v Ann>Hello there.</v>\n";
//! let mut session = Session::parse(vtt)?;
//! assert_eq!(session.stats().speakers[0].speaker, "Ann");
//!
//! let tokenizer = ByteTokenizer;
//! let segmenter = EnglishSegmenter::new();
//! let chunker = TokenChunker::new(&tokenizer, &segmenter, ChunkerConfig::default())?;
//! let summary = session.summary(&chunker, &LuhnSummarizer::new())?;
//! assert_eq!(summary.chunks, 1);
//! # Ok::<(), recap_engine::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod session;
pub mod stats;
pub mod summarize;
pub mod timeline;
pub mod transcript;

pub use error::{EngineError, Result};
pub use session::{Computed, Session, Summary};
pub use stats::{SpeakerStats, TranscriptStats, UNKNOWN_SPEAKER};
#[cfg(feature = "chat-api")]
pub use summarize::ChatSummarizer;
pub use summarize::{
    summarize_chunks, ChatConfig, LuhnSummarizer, Summarizer, SummaryConfig, SummaryMethod,
};
pub use timeline::{Lane, Span, Timeline};
pub use transcript::{
    dialogue_entries, format_dialogue, normalize_timestamps, Cue, DialogueEntry, Timestamp,
    Transcript,
};

// Re-export from core for convenience
pub use recap_core::{ChunkOutput, ChunkerConfig, TokenChunker};
