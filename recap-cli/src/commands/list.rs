//! List command implementation

use crate::output::OutputFormat;
use anyhow::Result;
use clap::Subcommand;
use recap_core::{SegmenterKind, TokenizerKind};
use recap_engine::SummaryMethod;

/// Components that can be listed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum ListCommands {
    /// Tokenizer backends for `--tokenizer`
    Tokenizers,
    /// Sentence segmenters for `--segmenter`
    Segmenters,
    /// Output formats for `--format`
    Formats,
    /// Summarisers for `--method`
    Methods,
}

impl ListCommands {
    /// Execute the list command
    pub fn execute(&self) -> Result<()> {
        for line in self.lines() {
            println!("{line}");
        }
        Ok(())
    }

    /// One line per component, with a note when a cargo feature is missing
    pub fn lines(&self) -> Vec<String> {
        match self {
            ListCommands::Tokenizers => TokenizerKind::NAMES
                .iter()
                .map(|name| match *name {
                    "cl100k" | "o200k" if !cfg!(feature = "tiktoken") => {
                        format!("{name} (needs the `tiktoken` feature)")
                    }
                    "hf:<path>" if !cfg!(feature = "huggingface") => {
                        format!("{name} (needs the `huggingface` feature)")
                    }
                    _ => name.to_string(),
                })
                .collect(),
            ListCommands::Segmenters => names(SegmenterKind::NAMES),
            ListCommands::Formats => names(OutputFormat::NAMES),
            ListCommands::Methods => SummaryMethod::NAMES
                .iter()
                .map(|name| match *name {
                    "chat" if !cfg!(feature = "chat-api") => {
                        format!("{name} (needs the `chat-api` feature)")
                    }
                    _ => name.to_string(),
                })
                .collect(),
        }
    }
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}
