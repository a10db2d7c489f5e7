//! Markdown output formatter

use super::{summary_body, OutputFormatter};
use anyhow::Result;
use recap_core::ChunkOutput;
use recap_engine::{Summary, Timeline, TranscriptStats};
use std::io::Write;

/// Markdown formatter: one section per input
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    sections: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sections: 0,
        }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn section(&mut self, source: &str) -> Result<()> {
        self.sections += 1;
        writeln!(self.writer, "## {source}")?;
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn write_chunks(&mut self, source: &str, output: &ChunkOutput) -> Result<()> {
        self.section(source)?;
        for (index, chunk) in output.chunks.iter().enumerate() {
            writeln!(self.writer, "### Chunk {} ({} tokens)", index + 1, chunk.tokens)?;
            writeln!(self.writer)?;
            writeln!(self.writer, "```text\n{}\n```", chunk.text.trim_end())?;
            writeln!(self.writer)?;
        }
        if !output.dropped.is_empty() {
            writeln!(
                self.writer,
                "> {} over-budget fragment(s) dropped",
                output.dropped.len()
            )?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_stats(&mut self, source: &str, stats: &TranscriptStats) -> Result<()> {
        self.section(source)?;
        writeln!(
            self.writer,
            "| Speaker | Time (s) | % | Turns | Mean (s) | Longest (s) |"
        )?;
        writeln!(self.writer, "|---|---:|---:|---:|---:|---:|")?;
        for row in &stats.speakers {
            writeln!(
                self.writer,
                "| {} | {:.1} | {:.1} | {} | {:.1} | {:.1} |",
                row.speaker.replace('|', "\\|"),
                row.total_seconds,
                row.percentage,
                row.turns,
                row.mean_turn_seconds,
                row.longest_turn_seconds
            )?;
        }
        writeln!(self.writer)?;
        writeln!(self.writer, "*Total talking time: {:.1} s*", stats.total_seconds)?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_timeline(&mut self, source: &str, timeline: &Timeline, width: usize) -> Result<()> {
        self.section(source)?;
        write!(self.writer, "```text\n{}```\n\n", timeline.render_ascii(width))?;
        Ok(())
    }

    fn write_summary(&mut self, source: &str, summary: &Summary, dialogue: bool) -> Result<()> {
        self.section(source)?;
        writeln!(self.writer, "{}", summary_body(summary, dialogue).trim_end())?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*{} summary of {} chunk(s)*",
            summary.summarizer, summary.chunks
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Inputs: {}*", self.sections)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_core::{Chunk, ChunkStats, DroppedFragment};
    use recap_engine::SpeakerStats;

    #[test]
    fn test_chunk_sections() {
        let output = ChunkOutput {
            chunks: vec![Chunk { text: "One. ".into(), tokens: 2 }],
            dropped: vec![DroppedFragment {
                sentence_index: 1,
                char_offset: 0,
                text: "xxxx".into(),
                tokens: 4,
            }],
            stats: ChunkStats::default(),
        };
        let mut formatter = MarkdownFormatter::new(Vec::new());
        formatter.write_chunks("notes.txt", &output).unwrap();
        formatter.finish().unwrap();

        let text = String::from_utf8(formatter.into_inner()).unwrap();
        assert!(text.starts_with("## notes.txt\n\n### Chunk 1 (2 tokens)\n\n```text\nOne.\n```\n"));
        assert!(text.contains("> 1 over-budget fragment(s) dropped"));
        assert!(text.ends_with("---\n*Inputs: 1*\n"));
    }

    #[test]
    fn test_stats_table_escapes_pipes() {
        let stats = TranscriptStats {
            total_seconds: 4.0,
            speakers: vec![SpeakerStats {
                speaker: "A|B".into(),
                total_seconds: 4.0,
                percentage: 100.0,
                turns: 1,
                mean_turn_seconds: 4.0,
                longest_turn_seconds: 4.0,
            }],
        };
        let mut formatter = MarkdownFormatter::new(Vec::new());
        formatter.write_stats("call.vtt", &stats).unwrap();

        let text = String::from_utf8(formatter.into_inner()).unwrap();
        assert!(text.contains("| A\\|B | 4.0 | 100.0 | 1 | 4.0 | 4.0 |"));
        assert!(text.contains("*Total talking time: 4.0 s*"));
    }
}
