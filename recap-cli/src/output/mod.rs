//! Output formatting module

use crate::error::CliError;
use anyhow::Result;
use recap_core::ChunkOutput;
use recap_engine::{Summary, Timeline, TranscriptStats};
use std::io::Write;
use std::str::FromStr;

/// Trait for output formatters
///
/// Commands call one `write_*` method per input file and `finish` once.
pub trait OutputFormatter: Send + Sync {
    /// Chunks of one input
    fn write_chunks(&mut self, source: &str, output: &ChunkOutput) -> Result<()>;

    /// Speaker statistics of one transcript
    fn write_stats(&mut self, source: &str, stats: &TranscriptStats) -> Result<()>;

    /// Timeline of one transcript, rendered `width` columns wide where textual
    fn write_timeline(&mut self, source: &str, timeline: &Timeline, width: usize) -> Result<()>;

    /// Summary of one input
    fn write_summary(&mut self, source: &str, summary: &Summary, dialogue: bool) -> Result<()>;

    /// Finalize output (e.g., emit the collected JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable plain text
    Text,
    /// JSON array with one object per input
    Json,
    /// Markdown sections with tables and code blocks
    Markdown,
}

impl OutputFormat {
    /// Names accepted in the config file
    pub const NAMES: &'static [&'static str] = &["text", "json", "markdown"];
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(CliError::ConfigError(format!(
                "unknown output format '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter<W>(format: OutputFormat, writer: W, pretty_json: bool) -> Box<dyn OutputFormatter>
where
    W: Write + Send + Sync + 'static,
{
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
    }
}

/// The summary text to show: dialogue when asked for and available
pub fn summary_body(summary: &Summary, dialogue: bool) -> &str {
    if dialogue && !summary.dialogue.is_empty() {
        &summary.dialogue
    } else {
        &summary.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> Summary {
        Summary {
            summarizer: "luhn".into(),
            chunks: 1,
            text: "00:00:01.000 --> 00:00:02.000 <v Ann>Hi.</v>".into(),
            dialogue: "Ann (00:00:01.000 to 00:00:02.000):\nHi.\n".into(),
        }
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_summary_body() {
        let mut s = summary();
        assert!(summary_body(&s, true).starts_with("Ann ("));
        assert!(summary_body(&s, false).starts_with("00:00:01.000"));

        s.dialogue.clear();
        assert!(summary_body(&s, true).starts_with("00:00:01.000"));
    }
}
