//! Plain text output formatter

use super::{summary_body, OutputFormatter};
use anyhow::Result;
use recap_core::ChunkOutput;
use recap_engine::{Summary, Timeline, TranscriptStats};
use std::io::Write;

/// Plain text formatter: a `==> source <==` header, then the report
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn header(&mut self, source: &str) -> Result<()> {
        writeln!(self.writer, "==> {source} <==")?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn write_chunks(&mut self, source: &str, output: &ChunkOutput) -> Result<()> {
        self.header(source)?;
        let total = output.chunks.len();
        for (index, chunk) in output.chunks.iter().enumerate() {
            writeln!(
                self.writer,
                "--- chunk {}/{} ({} tokens) ---",
                index + 1,
                total,
                chunk.tokens
            )?;
            writeln!(self.writer, "{}", chunk.text.trim_end())?;
        }
        if !output.dropped.is_empty() {
            writeln!(
                self.writer,
                "({} over-budget fragment(s) dropped)",
                output.dropped.len()
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_stats(&mut self, source: &str, stats: &TranscriptStats) -> Result<()> {
        self.header(source)?;
        let width = stats
            .speakers
            .iter()
            .map(|row| row.speaker.chars().count())
            .max()
            .unwrap_or(0)
            .max("Speaker".len());

        writeln!(
            self.writer,
            "{:<width$}  {:>9}  {:>6}  {:>5}  {:>9}  {:>11}",
            "Speaker", "Time (s)", "%", "Turns", "Mean (s)", "Longest (s)"
        )?;
        for row in &stats.speakers {
            writeln!(
                self.writer,
                "{:<width$}  {:>9.1}  {:>6.1}  {:>5}  {:>9.1}  {:>11.1}",
                row.speaker,
                row.total_seconds,
                row.percentage,
                row.turns,
                row.mean_turn_seconds,
                row.longest_turn_seconds
            )?;
        }
        writeln!(self.writer, "{:<width$}  {:>9.1}", "Total", stats.total_seconds)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_timeline(&mut self, source: &str, timeline: &Timeline, width: usize) -> Result<()> {
        self.header(source)?;
        write!(self.writer, "{}", timeline.render_ascii(width))?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, source: &str, summary: &Summary, dialogue: bool) -> Result<()> {
        self.header(source)?;
        writeln!(self.writer, "{}", summary_body(summary, dialogue).trim_end())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
