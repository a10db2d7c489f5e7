//! Stats command implementation

use super::CommandContext;
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use recap_engine::Session;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// WebVTT transcripts or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl StatsArgs {
    /// Execute the stats command
    pub fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let mut formatter = context.formatter(self.format)?;

        let mut progress = ProgressReporter::new(context.quiet);
        progress.init_files(files.len() as u64, "analysed");

        for path in &files {
            let source = path.display().to_string();
            let mut session = Session::new(FileReader::read_transcript(path)?);
            let stats = session.stats();
            log::info!(
                "{source}: {} speaker(s), {:.1} s of talking",
                stats.speakers.len(),
                stats.total_seconds
            );

            formatter.write_stats(&source, stats)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}
