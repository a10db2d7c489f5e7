//! Chunk command implementation

use super::{ChunkingArgs, ChunkingSetup, CommandContext};
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the chunk command
#[derive(Debug, Args)]
pub struct ChunkArgs {
    /// Input files or patterns (supports glob); `.vtt` files are formatted first
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    #[command(flatten)]
    pub chunking: ChunkingArgs,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl ChunkArgs {
    /// Execute the chunk command
    pub fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let setup = ChunkingSetup::from_config(&self.chunking.merge(&context.config.chunking))?;
        let chunker = setup.chunker()?;
        let mut formatter = context.formatter(self.format)?;

        let mut progress = ProgressReporter::new(context.quiet);
        progress.init_files(files.len() as u64, "chunked");

        for path in &files {
            let source = path.display().to_string();
            let text = FileReader::chunkable_text(path)?;
            let output = chunker
                .chunk(&text)
                .with_context(|| format!("Failed to chunk {source}"))?;

            if !output.dropped.is_empty() {
                log::warn!(
                    "{source}: dropped {} over-budget fragment(s)",
                    output.dropped.len()
                );
            }
            log::info!(
                "{source}: {} sentence(s), {} chunk(s), {} token(s)",
                output.stats.sentences,
                output.chunks.len(),
                output.stats.total_tokens
            );

            formatter.write_chunks(&source, &output)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}
