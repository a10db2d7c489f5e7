//! Token-budgeted text chunking
//!
//! Sentences are packed greedily into chunks whose accumulated token count
//! never exceeds the budget. A sentence that is over budget on its own is
//! cut into character slices of `max_tokens / 2` characters; a slice that
//! is still over budget is dropped (or rejected, see [`OverflowPolicy`]).
//!
//! Pieces are encoded separately, so with BPE tokenizers the decoded chunk
//! can re-encode to more tokens than were accumulated. [`Chunk::tokens`] is
//! the re-encoded count, and a chunk over budget is logged at `warn`.

use crate::{
    config::{ChunkerConfig, OverflowPolicy},
    error::{CoreError, Result},
    segment::SentenceSegmenter,
    tokenizer::{TokenId, Tokenizer},
};
use serde::Serialize;

/// A finished chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    /// Decoded text
    pub text: String,
    /// Token count of `text` as re-encoded
    pub tokens: usize,
}

/// A slice of an over-long sentence that was discarded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DroppedFragment {
    /// Index of the sentence the slice came from
    pub sentence_index: usize,
    /// Character offset of the slice inside that sentence
    pub char_offset: usize,
    /// The discarded text
    pub text: String,
    /// Its token count
    pub tokens: usize,
}

/// Counters collected while chunking
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChunkStats {
    /// Sentences produced by the segmenter
    pub sentences: usize,
    /// Sentences that needed character slicing
    pub sliced_sentences: usize,
    /// Tokens across all emitted chunks
    pub total_tokens: usize,
}

/// Chunks plus a report of what happened on the way
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkOutput {
    /// Chunks in reading order
    pub chunks: Vec<Chunk>,
    /// Slices lost to the over-long sentence fallback
    pub dropped: Vec<DroppedFragment>,
    /// Counters
    pub stats: ChunkStats,
}

impl ChunkOutput {
    /// Chunk texts only
    pub fn into_texts(self) -> Vec<String> {
        self.chunks.into_iter().map(|chunk| chunk.text).collect()
    }

    /// True when no text was discarded
    pub fn is_lossless(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Splits text into chunks that fit a token budget
///
/// Capabilities are borrowed: build the tokenizer and segmenter once and
/// hand out references.
pub struct TokenChunker<'a> {
    tokenizer: &'a dyn Tokenizer,
    segmenter: &'a dyn SentenceSegmenter,
    config: ChunkerConfig,
}

impl std::fmt::Debug for TokenChunker<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenChunker")
            .field("tokenizer", &self.tokenizer.name())
            .field("segmenter", &self.segmenter.name())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a> TokenChunker<'a> {
    /// Create a chunker; the config is validated here
    pub fn new(
        tokenizer: &'a dyn Tokenizer,
        segmenter: &'a dyn SentenceSegmenter,
        config: ChunkerConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            tokenizer,
            segmenter,
            config,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &ChunkerConfig {
        &self.config
    }

    /// Tokenizer used for budgeting
    pub fn tokenizer(&self) -> &'a dyn Tokenizer {
        self.tokenizer
    }

    /// Segmenter used to find sentences
    pub fn segmenter(&self) -> &'a dyn SentenceSegmenter {
        self.segmenter
    }

    /// Split `text` and return chunk texts in reading order
    pub fn split_into_chunks(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.chunk(text)?.into_texts())
    }

    /// Split `text` and return chunks with token counts and a loss report
    pub fn chunk(&self, text: &str) -> Result<ChunkOutput> {
        let max_tokens = self.config.max_tokens();
        let mut builder = ChunkBuilder::new(self.tokenizer, max_tokens);
        let mut dropped = Vec::new();
        let mut stats = ChunkStats::default();

        for (index, sentence) in self.segmenter.segment(text).into_iter().enumerate() {
            stats.sentences += 1;
            let tokens = self.tokenizer.encode(sentence)?;

            if tokens.len() <= max_tokens {
                builder.push(tokens)?;
                continue;
            }

            stats.sliced_sentences += 1;
            tracing::debug!(
                sentence = index,
                tokens = tokens.len(),
                max_tokens,
                "slicing over-long sentence"
            );

            for (char_offset, slice) in char_slices(sentence, self.config.slice_width()) {
                let slice_tokens = self.tokenizer.encode(slice)?;
                if slice_tokens.len() <= max_tokens {
                    builder.push(slice_tokens)?;
                    continue;
                }

                match self.config.overflow() {
                    OverflowPolicy::Reject => {
                        return Err(CoreError::FragmentOverBudget {
                            tokens: slice_tokens.len(),
                            max_tokens,
                        });
                    }
                    OverflowPolicy::Drop => {
                        tracing::warn!(
                            sentence = index,
                            char_offset,
                            tokens = slice_tokens.len(),
                            max_tokens,
                            "dropping fragment that is still over budget"
                        );
                        dropped.push(DroppedFragment {
                            sentence_index: index,
                            char_offset,
                            text: slice.to_string(),
                            tokens: slice_tokens.len(),
                        });
                    }
                }
            }
        }

        let chunks = builder.finish()?;
        stats.total_tokens = chunks.iter().map(|chunk| chunk.tokens).sum();

        tracing::debug!(
            chunks = chunks.len(),
            sentences = stats.sentences,
            dropped = dropped.len(),
            tokenizer = self.tokenizer.name(),
            "chunking complete"
        );

        Ok(ChunkOutput {
            chunks,
            dropped,
            stats,
        })
    }
}

/// Split `text` into chunks of at most `max_tokens` tokens
///
/// Fails with [`CoreError::InvalidArgument`] when `max_tokens <= 0`.
/// Over-budget fragments of over-long sentences are dropped.
pub fn split_into_chunks(
    text: &str,
    max_tokens: i64,
    tokenizer: &dyn Tokenizer,
    segmenter: &dyn SentenceSegmenter,
) -> Result<Vec<String>> {
    let config = ChunkerConfig::builder().max_tokens(max_tokens).build()?;
    TokenChunker::new(tokenizer, segmenter, config)?.split_into_chunks(text)
}

/// Pending token accumulator
struct ChunkBuilder<'a> {
    tokenizer: &'a dyn Tokenizer,
    max_tokens: usize,
    pending: Vec<TokenId>,
    chunks: Vec<Chunk>,
}

impl<'a> ChunkBuilder<'a> {
    fn new(tokenizer: &'a dyn Tokenizer, max_tokens: usize) -> Self {
        Self {
            tokenizer,
            max_tokens,
            pending: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Add a piece known to fit the budget on its own
    fn push(&mut self, tokens: Vec<TokenId>) -> Result<()> {
        if self.pending.len() + tokens.len() > self.max_tokens {
            self.flush()?;
            self.pending = tokens;
        } else {
            self.pending.extend(tokens);
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            return Ok(());
        }
        let text = self.tokenizer.decode(&self.pending)?;
        // BPE merges across piece joins can change the count of the decoded text
        let tokens = self.tokenizer.count(&text)?;
        if tokens > self.max_tokens {
            tracing::warn!(
                chunk = self.chunks.len(),
                tokens,
                max_tokens = self.max_tokens,
                accumulated = self.pending.len(),
                "chunk re-encodes over budget"
            );
        }
        tracing::debug!(chunk = self.chunks.len(), tokens, "flushing chunk");
        self.chunks.push(Chunk { text, tokens });
        self.pending.clear();
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Chunk>> {
        self.flush()?;
        Ok(self.chunks)
    }
}

/// Consecutive slices of `width` characters, with their character offsets
fn char_slices(text: &str, width: usize) -> impl Iterator<Item = (usize, &str)> {
    let boundaries: Vec<usize> = text
        .char_indices()
        .map(|(pos, _)| pos)
        .step_by(width)
        .chain(std::iter::once(text.len()))
        .collect();

    (0..boundaries.len().saturating_sub(1)).map(move |i| {
        let slice = &text[boundaries[i]..boundaries[i + 1]];
        (i * width, slice)
    })
}
