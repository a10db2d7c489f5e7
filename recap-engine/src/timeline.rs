//! Who spoke when

use crate::stats::UNKNOWN_SPEAKER;
use crate::transcript::{Timestamp, Transcript};
use serde::Serialize;
use std::collections::BTreeMap;

/// One stretch of speech
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start time
    pub start: Timestamp,
    /// End time
    pub end: Timestamp,
}

/// All spans of one speaker, in time order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    /// Speaker name
    pub speaker: String,
    /// Spans sorted by start
    pub spans: Vec<Span>,
}

/// Speaker lanes over the transcript's time range
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Timeline {
    /// Earliest cue start
    pub start: Timestamp,
    /// Latest cue end
    pub end: Timestamp,
    /// One lane per speaker, sorted by speaker name
    pub lanes: Vec<Lane>,
}

impl Timeline {
    /// Group cue times by speaker
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let Some((start, end)) = transcript.span() else {
            return Self::default();
        };

        let mut by_speaker: BTreeMap<&str, Vec<Span>> = BTreeMap::new();
        for cue in transcript.cues() {
            by_speaker
                .entry(cue.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER))
                .or_default()
                .push(Span {
                    start: cue.start,
                    end: cue.end,
                });
        }

        let lanes = by_speaker
            .into_iter()
            .map(|(speaker, mut spans)| {
                spans.sort_by_key(|span| (span.start, span.end));
                Lane {
                    speaker: speaker.to_string(),
                    spans,
                }
            })
            .collect();

        Self { start, end, lanes }
    }

    /// Render one text row per lane, `width` columns wide, plus a time axis
    ///
    /// ```text
    /// Alice |      ####      |
    /// Bob   |######    ######|
    ///       00:00:00.000 - 00:00:10.000
    /// ```
    pub fn render_ascii(&self, width: usize) -> String {
        let width = width.max(1);
        let label_width = self
            .lanes
            .iter()
            .map(|lane| lane.speaker.chars().count())
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        for lane in &self.lanes {
            let mut row = vec![' '; width];
            for span in &lane.spans {
                let (from, to) = self.columns(span, width);
                for cell in &mut row[from..to] {
                    *cell = '#';
                }
            }
            let bar: String = row.into_iter().collect();
            out.push_str(&format!("{:<label_width$} |{bar}|\n", lane.speaker));
        }
        out.push_str(&format!(
            "{:<label_width$}  {} - {}\n",
            "", self.start, self.end
        ));
        out
    }

    /// Half-open column range covered by `span`, never empty
    fn columns(&self, span: &Span, width: usize) -> (usize, usize) {
        let total = self.end.millis_since(self.start);
        if total == 0 {
            return (0, 1);
        }
        let scale = |t: Timestamp| t.millis_since(self.start) as u128 * width as u128;
        let from = (scale(span.start) / total as u128) as usize;
        let to = scale(span.end).div_ceil(total as u128) as usize;
        let from = from.min(width - 1);
        (from, to.clamp(from + 1, width))
    }
}
