//! WebVTT cue parsing

use super::timestamp::{normalize_timestamps, Timestamp};
use crate::error::{EngineError, Result};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// One timed block of a WebVTT file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cue {
    /// Optional cue identifier line
    pub identifier: Option<String>,
    /// Start time
    pub start: Timestamp,
    /// End time
    pub end: Timestamp,
    /// Speaker named by a `<v Name>` voice span
    pub speaker: Option<String>,
    /// Payload with markup removed
    pub text: String,
    /// Payload as written
    pub raw_text: String,
}

impl Cue {
    /// Cue length in milliseconds
    pub fn duration_millis(&self) -> u64 {
        self.end.millis_since(self.start)
    }

    /// Cue length in seconds
    pub fn duration_secs(&self) -> f64 {
        self.duration_millis() as f64 / 1000.0
    }
}

/// A parsed WebVTT transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    cues: Vec<Cue>,
    formatted: String,
}

impl Transcript {
    /// Parse WebVTT text; timestamps are normalised first
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.strip_prefix('\u{FEFF}').unwrap_or(raw);
        let formatted = normalize_timestamps(raw);
        let cues = parse_cues(&formatted)?;

        tracing::debug!(cues = cues.len(), "parsed WebVTT transcript");
        Ok(Self { cues, formatted })
    }

    /// Read and parse a `.vtt` file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&raw)
    }

    /// Build from cues directly
    pub fn from_cues(cues: Vec<Cue>) -> Self {
        let mut formatted = String::from("WEBVTT\n");
        for cue in &cues {
            formatted.push('\n');
            if let Some(id) = &cue.identifier {
                formatted.push_str(id);
                formatted.push('\n');
            }
            formatted.push_str(&format!("{} --> {}\n{}\n", cue.start, cue.end, cue.raw_text));
        }
        Self { cues, formatted }
    }

    /// Cues in file order
    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }

    /// True when there are no cues
    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    /// Distinct speaker names, sorted
    pub fn speakers(&self) -> Vec<&str> {
        self.cues
            .iter()
            .filter_map(|cue| cue.speaker.as_deref())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest start and latest end, if any cue exists
    pub fn span(&self) -> Option<(Timestamp, Timestamp)> {
        let start = self.cues.iter().map(|cue| cue.start).min()?;
        let end = self.cues.iter().map(|cue| cue.end).max()?;
        Some((start, end))
    }

    /// Time between the earliest start and the latest end
    pub fn duration(&self) -> Duration {
        self.span()
            .map(|(start, end)| Duration::from_millis(end.millis_since(start)))
            .unwrap_or_default()
    }

    /// Cue texts joined by newlines
    pub fn plain_text(&self) -> String {
        self.cues
            .iter()
            .map(|cue| cue.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The whole file with normalised timestamps, as handed to the chunker
    pub fn formatted(&self) -> &str {
        &self.formatted
    }
}

fn voice_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"<v(?:\.[^\s>]+)*\s+([^>]+)>").expect("voice pattern is valid")
    })
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"</?[^>]*>").expect("tag pattern is valid"))
}

fn parse_cues(text: &str) -> Result<Vec<Cue>> {
    let lines: Vec<&str> = text.lines().collect();

    let header = lines.first().copied().unwrap_or_default();
    let is_signature = header
        .strip_prefix("WEBVTT")
        .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']));
    if !is_signature {
        return Err(EngineError::Parse {
            line: 1,
            reason: "missing WEBVTT signature".into(),
        });
    }

    let mut cues = Vec::new();
    let mut i = 0;

    // skip the header block
    while i < lines.len() && !lines[i].trim().is_empty() {
        i += 1;
    }

    while i < lines.len() {
        if lines[i].trim().is_empty() {
            i += 1;
            continue;
        }

        let block_start = i;
        while i < lines.len() && !lines[i].trim().is_empty() {
            i += 1;
        }
        let block = &lines[block_start..i];

        if is_metadata_block(block[0]) {
            continue;
        }

        cues.push(parse_cue(block, block_start + 1)?);
    }

    Ok(cues)
}

fn is_metadata_block(first_line: &str) -> bool {
    ["NOTE", "STYLE", "REGION"].iter().any(|keyword| {
        first_line
            .strip_prefix(keyword)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
    })
}

/// Parse one cue block; `line_no` is the 1-based line of its first line
fn parse_cue(block: &[&str], line_no: usize) -> Result<Cue> {
    let (identifier, timing_index) = if block[0].contains("-->") {
        (None, 0)
    } else {
        (Some(block[0].trim().to_string()), 1)
    };

    let timing_line = block.get(timing_index).ok_or_else(|| EngineError::Parse {
        line: line_no,
        reason: "cue has no timing line".into(),
    })?;
    let timing_line_no = line_no + timing_index;

    let (start_raw, rest) = timing_line.split_once("-->").ok_or_else(|| EngineError::Parse {
        line: timing_line_no,
        reason: "expected cue timing".into(),
    })?;
    let end_raw = rest.split_whitespace().next().unwrap_or_default();

    let parse_ts = |raw: &str| {
        raw.trim().parse::<Timestamp>().map_err(|e| EngineError::Parse {
            line: timing_line_no,
            reason: e.to_string(),
        })
    };
    let start = parse_ts(start_raw)?;
    let end = parse_ts(end_raw)?;

    if end < start {
        return Err(EngineError::Parse {
            line: timing_line_no,
            reason: format!("cue ends ({end}) before it starts ({start})"),
        });
    }

    let raw_text = block[timing_index + 1..].join("\n");
    let speaker = voice_pattern()
        .captures(&raw_text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|name| !name.is_empty());
    let text = decode_entities(&tag_pattern().replace_all(&raw_text, ""))
        .trim()
        .to_string();

    Ok(Cue {
        identifier,
        start,
        end,
        speaker,
        text,
        raw_text,
    })
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", "\u{00A0}")
        .replace("&lrm;", "\u{200E}")
        .replace("&rlm;", "\u{200F}")
        .replace("&amp;", "&")
}
