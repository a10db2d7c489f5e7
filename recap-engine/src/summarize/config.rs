//! Summariser selection and settings

use super::luhn::{LuhnSummarizer, DEFAULT_SENTENCES};
use super::Summarizer;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default chat completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Environment variable read when no API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Available summarisers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMethod {
    /// Extractive, runs locally
    #[default]
    Luhn,
    /// Abstractive, calls a chat completions API
    Chat,
}

impl SummaryMethod {
    /// Names accepted by [`FromStr`]
    pub const NAMES: &'static [&'static str] = &["luhn", "chat"];
}

impl fmt::Display for SummaryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryMethod::Luhn => write!(f, "luhn"),
            SummaryMethod::Chat => write!(f, "chat"),
        }
    }
}

impl FromStr for SummaryMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "luhn" | "extractive" => Ok(SummaryMethod::Luhn),
            "chat" | "abstractive" | "openai" => Ok(SummaryMethod::Chat),
            other => Err(EngineError::Config(format!(
                "unknown summary method '{other}', expected one of: {}",
                Self::NAMES.join(", ")
            ))),
        }
    }
}

/// Settings for the chat summariser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Chat completions URL
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    /// Sampling temperature
    pub temperature: f32,
    /// Bearer token; falls back to `OPENAI_API_KEY`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 300,
            temperature: 0.5,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// How summaries are produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Which summariser runs on each chunk
    pub method: SummaryMethod,
    /// Sentences kept per chunk by the extractive summariser
    pub sentences: usize,
    /// Render the summary as speaker dialogue
    pub dialogue: bool,
    /// Extra stop words for the extractive summariser
    pub stop_words: Vec<String>,
    /// Chat summariser settings
    pub chat: ChatConfig,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            method: SummaryMethod::Luhn,
            sentences: DEFAULT_SENTENCES,
            dialogue: false,
            stop_words: Vec::new(),
            chat: ChatConfig::default(),
        }
    }
}

impl SummaryConfig {
    /// Instantiate the configured summariser
    pub fn build(&self) -> Result<Box<dyn Summarizer>> {
        if self.sentences == 0 {
            return Err(EngineError::Config("sentences must be at least 1".into()));
        }

        match self.method {
            SummaryMethod::Luhn => Ok(Box::new(
                LuhnSummarizer::new()
                    .with_sentences(self.sentences)
                    .with_stop_words(&self.stop_words),
            )),
            #[cfg(feature = "chat-api")]
            SummaryMethod::Chat => Ok(Box::new(super::ChatSummarizer::new(self.chat.clone())?)),
            #[cfg(not(feature = "chat-api"))]
            SummaryMethod::Chat => Err(EngineError::Config(
                "chat summaries need the `chat-api` feature".into(),
            )),
        }
    }
}
