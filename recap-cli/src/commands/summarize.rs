//! Summarize command implementation

use super::{ChunkingArgs, ChunkingSetup, CommandContext};
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use recap_core::TokenChunker;
use recap_engine::{
    format_dialogue, summarize_chunks, Session, Summarizer, Summary, SummaryConfig, SummaryMethod,
};
use std::path::Path;

/// Arguments for the summarize command
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    /// Summariser: luhn or chat
    #[arg(long, value_name = "METHOD")]
    pub method: Option<SummaryMethod>,

    /// Sentences kept per chunk by the luhn summariser
    #[arg(long, value_name = "N")]
    pub sentences: Option<usize>,

    /// Model name for the chat summariser
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Print the summary as speaker dialogue where possible
    #[arg(long)]
    pub dialogue: bool,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl SummarizeArgs {
    /// Overlay the flags on the configured summary settings
    pub fn summary_config(&self, base: &SummaryConfig) -> SummaryConfig {
        let mut config = base.clone();
        if let Some(method) = self.method {
            config.method = method;
        }
        if let Some(sentences) = self.sentences {
            config.sentences = sentences;
        }
        if let Some(model) = &self.model {
            config.chat.model = model.clone();
        }
        if self.dialogue {
            config.dialogue = true;
        }
        config
    }

    /// Execute the summarize command
    pub fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let summary_config = self.summary_config(&context.config.summary);
        let summarizer = summary_config
            .build()
            .context("Failed to set up the summariser")?;
        let setup = ChunkingSetup::from_config(&self.chunking.merge(&context.config.chunking))?;
        let chunker = setup.chunker()?;
        let mut formatter = context.formatter(self.format)?;

        let mut progress = ProgressReporter::new(context.quiet);
        progress.init_files(files.len() as u64, "summarised");

        for path in &files {
            let source = path.display().to_string();
            let summary = summarize_file(path, &chunker, summarizer.as_ref())
                .with_context(|| format!("Failed to summarise {source}"))?;
            log::info!(
                "{source}: {} chunk(s) summarised by {}",
                summary.chunks,
                summary.summarizer
            );

            formatter.write_summary(&source, &summary, summary_config.dialogue)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}

/// Summarise a transcript through a session, or plain text directly
fn summarize_file(
    path: &Path,
    chunker: &TokenChunker<'_>,
    summarizer: &dyn Summarizer,
) -> Result<Summary> {
    if FileReader::is_transcript(path) {
        let mut session = Session::new(FileReader::read_transcript(path)?);
        return Ok(session.summary(chunker, summarizer)?.clone());
    }

    let text = FileReader::read_text(path)?;
    let output = chunker.chunk(&text)?;
    let texts: Vec<&str> = output.chunks.iter().map(|c| c.text.as_str()).collect();
    let summary = summarize_chunks(&texts, summarizer)?;
    Ok(Summary {
        summarizer: summarizer.name().to_string(),
        chunks: texts.len(),
        dialogue: format_dialogue(&summary),
        text: summary,
    })
}
