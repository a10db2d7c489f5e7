//! Configuration file support
//!
//! Every section and field is optional; missing values fall back to the
//! built-in defaults, and command-line flags override both.

use crate::error::CliError;
use crate::input::FileReader;
use anyhow::{Context, Result};
use recap_core::config::defaults;
use recap_core::{
    ChunkerConfig, EnglishSegmenter, OverflowPolicy, SegmenterKind, SentenceSegmenter,
    TokenizerKind,
};
use recap_engine::SummaryConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Chunking configuration
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Summary configuration
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = FileReader::read_text(path)?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Default configuration as commented TOML
    pub fn template() -> Result<String> {
        let body = toml::to_string_pretty(&Self::default())
            .context("Failed to serialize default configuration")?;
        Ok(format!(
            "# recap configuration\n\
             #\n\
             # Command-line flags override these values.\n\
             # tokenizer: bytes, cl100k, o200k or hf:<path to tokenizer.json>\n\
             # segmenter: english or unicode\n\
             # summary.method: luhn or chat (chat reads OPENAI_API_KEY)\n\n\
             {body}"
        ))
    }
}

/// Chunking-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Token budget per chunk
    pub max_tokens: i64,

    /// Tokenizer backend name
    pub tokenizer: String,

    /// Sentence segmenter name
    pub segmenter: String,

    /// What happens to slices still over budget
    pub overflow: OverflowPolicy,

    /// Extra abbreviations for the English segmenter
    pub abbreviations: Vec<String>,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_tokens: defaults::MAX_TOKENS as i64,
            tokenizer: TokenizerKind::default().to_string(),
            segmenter: SegmenterKind::default().to_string(),
            overflow: OverflowPolicy::default(),
            abbreviations: Vec::new(),
        }
    }
}

impl ChunkingConfig {
    /// Parsed tokenizer selection
    pub fn tokenizer_kind(&self) -> Result<TokenizerKind> {
        self.tokenizer
            .parse()
            .map_err(|e| CliError::ConfigError(format!("tokenizer: {e}")).into())
    }

    /// Parsed segmenter selection
    pub fn segmenter_kind(&self) -> Result<SegmenterKind> {
        self.segmenter
            .parse()
            .map_err(|e| CliError::ConfigError(format!("segmenter: {e}")).into())
    }

    /// Build the segmenter, with extra abbreviations for English
    pub fn build_segmenter(&self) -> Result<Box<dyn SentenceSegmenter>> {
        Ok(match self.segmenter_kind()? {
            SegmenterKind::English => Box::new(
                EnglishSegmenter::new().with_abbreviations(&self.abbreviations),
            ),
            kind => kind.build(),
        })
    }

    /// Validated chunker configuration
    pub fn chunker_config(&self) -> Result<ChunkerConfig> {
        ChunkerConfig::builder()
            .max_tokens(self.max_tokens)
            .overflow(self.overflow)
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: text, json or markdown
    pub format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,

    /// Columns used by the timeline rendering
    pub timeline_width: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            pretty_json: true,
            timeline_width: 60,
        }
    }
}
