//! Generate config command implementation

use super::GlobalArgs;
use crate::config::CliConfig;
use anyhow::{bail, Context, Result};
use clap::Args;
use std::fs;

/// Arguments for the generate-config command
///
/// The template goes to the global `--output` file, or stdout.
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Overwrite an existing output file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self, global: &GlobalArgs) -> Result<()> {
        let template = CliConfig::template()?;

        let Some(path) = &global.output else {
            print!("{template}");
            return Ok(());
        };

        if path.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                path.display()
            );
        }
        fs::write(path, template)
            .with_context(|| format!("Failed to write to {}", path.display()))?;

        if !global.quiet {
            eprintln!("Configuration template written to {}", path.display());
            eprintln!("Use it with: recap -c {} <command>", path.display());
        }
        Ok(())
    }
}
