//! Sentence segmentation capability
//!
//! Segmenters return borrowed slices that tile the input: concatenating
//! every sentence gives back the original text, with each sentence
//! carrying its trailing whitespace. Whitespace-only input has no
//! sentences.

mod english;
mod tables;
mod unicode;

pub use english::EnglishSegmenter;
pub use unicode::UnicodeSegmenter;

use crate::error::{CoreError, Result};
use std::fmt;
use std::str::FromStr;

/// Splits raw text into sentences in reading order
pub trait SentenceSegmenter: Send + Sync {
    /// Segment `text`; the returned slices concatenate back to `text`
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Short segmenter name for logs and reports
    fn name(&self) -> &str;
}

impl<S: SentenceSegmenter + ?Sized> SentenceSegmenter for Box<S> {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        (**self).segment(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Selectable segmenters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SegmenterKind {
    /// Rule-based English segmentation
    #[default]
    English,
    /// Unicode UAX #29 sentence boundaries
    Unicode,
}

impl SegmenterKind {
    /// Names accepted by [`FromStr`], for help output
    pub const NAMES: &'static [&'static str] = &["english", "unicode"];

    /// Instantiate the segmenter
    pub fn build(self) -> Box<dyn SentenceSegmenter> {
        match self {
            SegmenterKind::English => Box::new(EnglishSegmenter::new()),
            SegmenterKind::Unicode => Box::new(UnicodeSegmenter),
        }
    }
}

impl fmt::Display for SegmenterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmenterKind::English => write!(f, "english"),
            SegmenterKind::Unicode => write!(f, "unicode"),
        }
    }
}

impl FromStr for SegmenterKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "english" | "en" => Ok(SegmenterKind::English),
            "unicode" | "uax29" => Ok(SegmenterKind::Unicode),
            other => Err(CoreError::Unsupported(format!("unknown segmenter '{other}'"))),
        }
    }
}
