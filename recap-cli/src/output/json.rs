//! JSON output formatter

use super::{summary_body, OutputFormatter};
use anyhow::Result;
use recap_core::ChunkOutput;
use recap_engine::{Summary, Timeline, TranscriptStats};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::Write;

/// JSON formatter: collects one object per input and writes an array at the end
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    entries: Vec<Value>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            entries: Vec::new(),
        }
    }

    /// Give back the writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn push(&mut self, source: &str, key: &str, report: impl Serialize) -> Result<()> {
        let mut entry = json!({ "source": source });
        entry[key] = serde_json::to_value(report)?;
        self.entries.push(entry);
        Ok(())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn write_chunks(&mut self, source: &str, output: &ChunkOutput) -> Result<()> {
        self.push(source, "chunking", output)
    }

    fn write_stats(&mut self, source: &str, stats: &TranscriptStats) -> Result<()> {
        self.push(source, "stats", stats)
    }

    fn write_timeline(&mut self, source: &str, timeline: &Timeline, _width: usize) -> Result<()> {
        self.push(source, "timeline", timeline)
    }

    fn write_summary(&mut self, source: &str, summary: &Summary, dialogue: bool) -> Result<()> {
        let mut value = serde_json::to_value(summary)?;
        value["output"] = Value::String(summary_body(summary, dialogue).to_string());
        self.push(source, "summary", value)
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.entries)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.entries)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recap_core::{Chunk, ChunkStats};

    fn finished(mut formatter: JsonFormatter<Vec<u8>>) -> Value {
        formatter.finish().unwrap();
        serde_json::from_slice(&formatter.into_inner()).unwrap()
    }

    #[test]
    fn test_chunks_array() {
        let output = ChunkOutput {
            chunks: vec![Chunk { text: "Hi there.".into(), tokens: 9 }],
            dropped: Vec::new(),
            stats: ChunkStats { sentences: 1, sliced_sentences: 0, total_tokens: 9 },
        };
        let mut formatter = JsonFormatter::new(Vec::new(), true);
        formatter.write_chunks("a.txt", &output).unwrap();
        formatter.write_chunks("b.txt", &output).unwrap();

        let value = finished(formatter);
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["source"], "a.txt");
        assert_eq!(value[0]["chunking"]["chunks"][0]["text"], "Hi there.");
        assert_eq!(value[0]["chunking"]["chunks"][0]["tokens"], 9);
        assert_eq!(value[1]["chunking"]["stats"]["total_tokens"], 9);
    }

    #[test]
    fn test_summary_output_field() {
        let summary = Summary {
            summarizer: "luhn".into(),
            chunks: 2,
            text: "raw".into(),
            dialogue: String::new(),
        };
        let mut formatter = JsonFormatter::new(Vec::new(), false);
        formatter.write_summary("notes.txt", &summary, true).unwrap();

        let value = finished(formatter);
        assert_eq!(value[0]["summary"]["summarizer"], "luhn");
        assert_eq!(value[0]["summary"]["output"], "raw");
    }

    #[test]
    fn test_empty_run_is_empty_array() {
        let value = finished(JsonFormatter::new(Vec::new(), false));
        assert_eq!(value, json!([]));
    }
}
