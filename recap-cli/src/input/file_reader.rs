//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use recap_engine::Transcript;
use std::fs;
use std::path::Path;

/// Reads inputs as UTF-8 text or WebVTT transcripts
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// True for `.vtt` files, case-insensitively
    pub fn is_transcript(path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("vtt"))
    }

    /// Read and parse a WebVTT transcript
    pub fn read_transcript(path: &Path) -> Result<Transcript> {
        let raw = Self::read_text(path)?;
        Transcript::parse(&raw).map_err(|e| {
            CliError::InvalidTranscript {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Text to chunk: normalised WebVTT for transcripts, raw text otherwise
    pub fn chunkable_text(path: &Path) -> Result<String> {
        if Self::is_transcript(path) {
            Ok(Self::read_transcript(path)?.formatted().to_string())
        } else {
            Self::read_text(path)
        }
    }
}
