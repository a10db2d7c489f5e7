//! Analysis session over one transcript
//!
//! A [`Session`] owns a parsed transcript and computes derived views on
//! demand. Each view is cached in a [`Computed`] slot; chunks and summaries
//! are recomputed when asked for with a different tokenizer, segmenter,
//! chunk configuration or summariser.

use crate::error::Result;
use crate::stats::TranscriptStats;
use crate::summarize::{summarize_chunks, Summarizer};
use crate::timeline::Timeline;
use crate::transcript::{format_dialogue, Transcript};
use recap_core::{ChunkOutput, ChunkerConfig, TokenChunker};
use serde::Serialize;
use std::convert::Infallible;
use std::path::Path;

/// A lazily computed value
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Computed<T> {
    /// Not computed yet, or invalidated
    #[default]
    NotComputed,
    /// Cached result
    Computed(T),
}

impl<T> Computed<T> {
    /// True once a value is cached
    pub fn is_computed(&self) -> bool {
        matches!(self, Computed::Computed(_))
    }

    /// Cached value, if any
    pub fn get(&self) -> Option<&T> {
        match self {
            Computed::Computed(value) => Some(value),
            Computed::NotComputed => None,
        }
    }

    /// Drop the cached value
    pub fn reset(&mut self) {
        *self = Computed::NotComputed;
    }

    /// Return the cached value, computing it first if needed
    pub fn get_or_insert_with(&mut self, f: impl FnOnce() -> T) -> &T {
        match self.get_or_try_insert_with(|| Ok::<_, Infallible>(f())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Fallible [`get_or_insert_with`](Self::get_or_insert_with); errors leave the slot empty
    pub fn get_or_try_insert_with<E>(
        &mut self,
        f: impl FnOnce() -> std::result::Result<T, E>,
    ) -> std::result::Result<&T, E> {
        if !self.is_computed() {
            *self = Computed::Computed(f()?);
        }
        match self {
            Computed::Computed(value) => Ok(value),
            Computed::NotComputed => unreachable!("value was just inserted"),
        }
    }
}

/// What a chunking result depends on
///
/// The tokenizer is identified by its name, which is unique per vocabulary
/// (`hf:` tokenizers carry their full path).
#[derive(Debug, Clone, PartialEq, Eq)]
struct ChunkKey {
    tokenizer: String,
    segmenter: String,
    config: ChunkerConfig,
}

impl ChunkKey {
    fn of(chunker: &TokenChunker<'_>) -> Self {
        Self {
            tokenizer: chunker.tokenizer().name().to_string(),
            segmenter: chunker.segmenter().name().to_string(),
            config: *chunker.config(),
        }
    }
}

/// A transcript summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Summariser name
    pub summarizer: String,
    /// Number of chunks summarised
    pub chunks: usize,
    /// Per-chunk summaries joined by spaces
    pub text: String,
    /// Voiced entries of `text` rendered as dialogue
    pub dialogue: String,
}

/// One transcript and its cached analyses
#[derive(Debug)]
pub struct Session {
    transcript: Transcript,
    stats: Computed<TranscriptStats>,
    timeline: Computed<Timeline>,
    chunks: Computed<(ChunkKey, ChunkOutput)>,
    summary: Computed<((ChunkKey, String), Summary)>,
}

impl Session {
    /// Start a session over a parsed transcript
    pub fn new(transcript: Transcript) -> Self {
        Self {
            transcript,
            stats: Computed::NotComputed,
            timeline: Computed::NotComputed,
            chunks: Computed::NotComputed,
            summary: Computed::NotComputed,
        }
    }

    /// Parse WebVTT text into a session
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self::new(Transcript::parse(raw)?))
    }

    /// Load a `.vtt` file into a session
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Transcript::from_path(path)?))
    }

    /// The underlying transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Speaker statistics
    pub fn stats(&mut self) -> &TranscriptStats {
        let transcript = &self.transcript;
        self.stats
            .get_or_insert_with(|| TranscriptStats::from_transcript(transcript))
    }

    /// Speaker timeline
    pub fn timeline(&mut self) -> &Timeline {
        let transcript = &self.transcript;
        self.timeline
            .get_or_insert_with(|| Timeline::from_transcript(transcript))
    }

    /// Chunks of the normalised transcript text
    pub fn chunks(&mut self, chunker: &TokenChunker<'_>) -> Result<&ChunkOutput> {
        cached_chunks(&mut self.chunks, &self.transcript, chunker)
    }

    /// Chunk, summarise each chunk, then render the result as dialogue
    pub fn summary(
        &mut self,
        chunker: &TokenChunker<'_>,
        summarizer: &dyn Summarizer,
    ) -> Result<&Summary> {
        let key = (ChunkKey::of(chunker), summarizer.name().to_string());
        if self.summary.get().is_some_and(|(cached, _)| *cached != key) {
            self.summary.reset();
        }

        let Self {
            transcript,
            chunks,
            summary,
            ..
        } = self;
        let (_, summary) = summary.get_or_try_insert_with(|| -> Result<_> {
            let output = cached_chunks(chunks, transcript, chunker)?;
            let texts: Vec<&str> = output.chunks.iter().map(|c| c.text.as_str()).collect();
            let text = summarize_chunks(&texts, summarizer)?;

            tracing::info!(
                summarizer = summarizer.name(),
                chunks = texts.len(),
                "transcript summarised"
            );
            let summary = Summary {
                summarizer: summarizer.name().to_string(),
                chunks: texts.len(),
                dialogue: format_dialogue(&text),
                text,
            };
            Ok((key, summary))
        })?;
        Ok(summary)
    }

    /// Forget every cached analysis
    pub fn invalidate(&mut self) {
        self.stats.reset();
        self.timeline.reset();
        self.chunks.reset();
        self.summary.reset();
    }
}

fn cached_chunks<'s>(
    slot: &'s mut Computed<(ChunkKey, ChunkOutput)>,
    transcript: &Transcript,
    chunker: &TokenChunker<'_>,
) -> Result<&'s ChunkOutput> {
    let key = ChunkKey::of(chunker);
    if slot.get().is_some_and(|(cached, _)| *cached != key) {
        slot.reset();
    }
    let (_, output) = slot.get_or_try_insert_with(|| {
        chunker
            .chunk(transcript.formatted())
            .map(|output| (key, output))
    })?;
    Ok(output)
}
