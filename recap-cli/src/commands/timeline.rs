//! Timeline command implementation

use super::CommandContext;
use crate::input::{resolve_patterns, FileReader};
use crate::output::OutputFormat;
use crate::progress::ProgressReporter;
use anyhow::Result;
use clap::Args;
use recap_engine::Session;

/// Arguments for the timeline command
#[derive(Debug, Args)]
pub struct TimelineArgs {
    /// WebVTT transcripts or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Width of the bar area in columns (default: from config, else 60)
    #[arg(short, long, value_name = "COLUMNS")]
    pub width: Option<usize>,

    /// Output format (default: from config, else text)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,
}

impl TimelineArgs {
    /// Execute the timeline command
    pub fn execute(&self, context: &CommandContext) -> Result<()> {
        let files = resolve_patterns(&self.input)?;
        let width = self.width.unwrap_or(context.config.output.timeline_width);
        let mut formatter = context.formatter(self.format)?;

        let mut progress = ProgressReporter::new(context.quiet);
        progress.init_files(files.len() as u64, "drawn");

        for path in &files {
            let source = path.display().to_string();
            let mut session = Session::new(FileReader::read_transcript(path)?);
            let timeline = session.timeline();
            log::info!("{source}: {} lane(s)", timeline.lanes.len());

            formatter.write_timeline(&source, timeline, width)?;
            progress.file_completed(&source);
        }

        progress.finish();
        formatter.finish()
    }
}
