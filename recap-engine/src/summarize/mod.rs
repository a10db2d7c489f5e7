//! Summarisers and per-chunk summarisation

#[cfg(feature = "chat-api")]
mod chat;
mod config;
mod luhn;

#[cfg(feature = "chat-api")]
pub use chat::ChatSummarizer;
pub use config::{
    ChatConfig, SummaryConfig, SummaryMethod, API_KEY_ENV, DEFAULT_ENDPOINT, DEFAULT_MODEL,
};
pub use luhn::{
    LuhnSummarizer, DEFAULT_MAX_GAP_SIZE, DEFAULT_SENTENCES, DEFAULT_SIGNIFICANT_PERCENTAGE,
};

use crate::error::Result;

/// Turns a piece of text into a shorter one
pub trait Summarizer: Send + Sync {
    /// Summarise `text`
    fn summarize(&self, text: &str) -> Result<String>;

    /// Short summariser name for logs and reports
    fn name(&self) -> &str;
}

impl<S: Summarizer + ?Sized> Summarizer for Box<S> {
    fn summarize(&self, text: &str) -> Result<String> {
        (**self).summarize(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Summarise each chunk and join the pieces with single spaces
///
/// Empty per-chunk summaries are kept so the join mirrors the chunk count.
pub fn summarize_chunks<S, T>(chunks: &[T], summarizer: &S) -> Result<String>
where
    S: Summarizer + ?Sized,
    T: AsRef<str>,
{
    let summaries = chunks
        .iter()
        .enumerate()
        .map(|(index, chunk)| {
            tracing::debug!(chunk = index, summarizer = summarizer.name(), "summarising chunk");
            summarizer.summarize(chunk.as_ref())
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(summaries.join(" "))
}
