//! CLI command implementations

use crate::config::{ChunkingConfig, CliConfig};
use crate::output::{create_formatter, OutputFormat, OutputFormatter};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use recap_core::{ChunkerConfig, OverflowPolicy, SentenceSegmenter, TokenChunker, Tokenizer};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;

pub mod chunk;
pub mod generate_config;
pub mod list;
pub mod stats;
pub mod summarize;
pub mod timeline;

/// Chunk and summarise meeting transcripts
#[derive(Debug, Parser)]
#[command(name = "recap", version, about, propagate_version = true)]
pub struct Cli {
    /// Options shared by every command
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Options accepted before or after any subcommand
#[derive(Debug, Args, Default)]
pub struct GlobalArgs {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE", global = true, env = "RECAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Suppress progress output and logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl GlobalArgs {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
                .init();
        }
    }
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Split text or transcripts into token-budgeted chunks
    Chunk(chunk::ChunkArgs),

    /// Per-speaker talking statistics
    Stats(stats::StatsArgs),

    /// Who spoke when
    Timeline(timeline::TimelineArgs),

    /// Summarise each chunk and join the results
    Summarize(summarize::SummarizeArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: list::ListCommands,
    },

    /// Write a default configuration file
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Cli {
    /// Run the selected command
    pub fn execute(self) -> Result<()> {
        log::debug!("arguments: {:?}", self);

        let Self { global, command } = self;
        match command {
            Commands::Chunk(args) => args.execute(&CommandContext::from_global(&global)?),
            Commands::Stats(args) => args.execute(&CommandContext::from_global(&global)?),
            Commands::Timeline(args) => args.execute(&CommandContext::from_global(&global)?),
            Commands::Summarize(args) => args.execute(&CommandContext::from_global(&global)?),
            Commands::List { subcommand } => subcommand.execute(),
            Commands::GenerateConfig(args) => args.execute(&global),
        }
    }
}

/// Loaded configuration plus global flags
#[derive(Debug, Default)]
pub struct CommandContext {
    /// Configuration file contents, or defaults
    pub config: CliConfig,
    /// Output file, stdout when absent
    pub output: Option<PathBuf>,
    /// Suppress progress bars
    pub quiet: bool,
}

impl CommandContext {
    /// Load the configuration named by the global flags
    pub fn from_global(global: &GlobalArgs) -> Result<Self> {
        Ok(Self {
            config: CliConfig::load(global.config.as_deref())?,
            output: global.output.clone(),
            quiet: global.quiet,
        })
    }

    /// Formatter for the flag's format, falling back to the configured one
    pub fn formatter(&self, flag: Option<OutputFormat>) -> Result<Box<dyn OutputFormatter>> {
        let format = match flag {
            Some(format) => format,
            None => self.config.output.format.parse()?,
        };
        let pretty = self.config.output.pretty_json;

        Ok(match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                create_formatter(format, BufWriter::new(file), pretty)
            }
            None => create_formatter(format, io::stdout(), pretty),
        })
    }
}

/// Chunking flags shared by `chunk` and `summarize`
#[derive(Debug, Args, Default, Clone)]
pub struct ChunkingArgs {
    /// Token budget per chunk
    #[arg(short, long, value_name = "N", allow_negative_numbers = true)]
    pub max_tokens: Option<i64>,

    /// Tokenizer: bytes, cl100k, o200k or hf:<path>
    #[arg(long, value_name = "NAME")]
    pub tokenizer: Option<String>,

    /// Sentence segmenter: english or unicode
    #[arg(long, value_name = "NAME")]
    pub segmenter: Option<String>,

    /// Fail instead of dropping slices that stay over budget
    #[arg(long)]
    pub strict: bool,
}

impl ChunkingArgs {
    /// Overlay the flags on the configured values
    pub fn merge(&self, base: &ChunkingConfig) -> ChunkingConfig {
        let mut merged = base.clone();
        if let Some(max_tokens) = self.max_tokens {
            merged.max_tokens = max_tokens;
        }
        if let Some(tokenizer) = &self.tokenizer {
            merged.tokenizer = tokenizer.clone();
        }
        if let Some(segmenter) = &self.segmenter {
            merged.segmenter = segmenter.clone();
        }
        if self.strict {
            merged.overflow = OverflowPolicy::Reject;
        }
        merged
    }
}

/// Built capabilities and validated chunker configuration
pub struct ChunkingSetup {
    tokenizer: Box<dyn Tokenizer>,
    segmenter: Box<dyn SentenceSegmenter>,
    config: ChunkerConfig,
}

impl ChunkingSetup {
    /// Validate the configuration and build the tokenizer and segmenter
    pub fn from_config(config: &ChunkingConfig) -> Result<Self> {
        let chunker_config = config.chunker_config()?;
        let tokenizer = config
            .tokenizer_kind()?
            .build()
            .with_context(|| format!("Failed to load tokenizer '{}'", config.tokenizer))?;
        let segmenter = config.build_segmenter()?;

        log::info!(
            "chunking with tokenizer={} segmenter={} max_tokens={}",
            tokenizer.name(),
            segmenter.name(),
            chunker_config.max_tokens()
        );

        Ok(Self {
            tokenizer,
            segmenter,
            config: chunker_config,
        })
    }

    /// A chunker borrowing these capabilities
    pub fn chunker(&self) -> Result<TokenChunker<'_>> {
        Ok(TokenChunker::new(
            self.tokenizer.as_ref(),
            self.segmenter.as_ref(),
            self.config,
        )?)
    }
}
