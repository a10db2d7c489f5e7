//! Abstractive summaries through an OpenAI-compatible chat completions API

use super::config::{ChatConfig, API_KEY_ENV};
use super::Summarizer;
use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    n: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Summariser backed by a hosted chat model
pub struct ChatSummarizer {
    config: ChatConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl fmt::Debug for ChatSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatSummarizer")
            .field("endpoint", &self.config.endpoint)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl ChatSummarizer {
    /// Build a client; the API key comes from `config` or `OPENAI_API_KEY`
    pub fn new(config: ChatConfig) -> Result<Self> {
        let api_key = match &config.api_key {
            Some(key) => key.clone(),
            None => std::env::var(API_KEY_ENV).map_err(|_| {
                EngineError::Config(format!("no API key configured and {API_KEY_ENV} is unset"))
            })?,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Summarizer(e.to_string()))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Active settings
    pub fn config(&self) -> &ChatConfig {
        &self.config
    }
}

fn request_body<'a>(config: &'a ChatConfig, text: &str) -> ChatRequest<'a> {
    ChatRequest {
        model: &config.model,
        messages: vec![ChatMessage {
            role: "user",
            content: format!("Summarize this meeting:\n\n{text}"),
        }],
        max_tokens: config.max_tokens,
        n: 1,
        temperature: config.temperature,
    }
}

/// Extract the summary from a response, or the API's error message
fn parse_response(success: bool, status: u16, body: &str) -> Result<String> {
    if !success {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        return Err(EngineError::Summarizer(format!("HTTP {status}: {message}")));
    }

    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| EngineError::Summarizer(format!("unexpected response: {e}")))?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| EngineError::Summarizer("response has no choices".into()))
}

impl Summarizer for ChatSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        tracing::debug!(model = %self.config.model, chars = text.len(), "requesting chat summary");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body(&self.config, text))
            .send()
            .map_err(|e| EngineError::Summarizer(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| EngineError::Summarizer(e.to_string()))?;
        parse_response(status.is_success(), status.as_u16(), &body)
    }

    fn name(&self) -> &str {
        "chat"
    }
}
