//! Per-speaker talking statistics

use crate::transcript::Transcript;
use serde::Serialize;
use std::collections::BTreeMap;

/// Label used for cues without a voice span
pub const UNKNOWN_SPEAKER: &str = "Unknown";

/// Talking statistics for one speaker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakerStats {
    /// Speaker name
    pub speaker: String,
    /// Seconds spent talking
    pub total_seconds: f64,
    /// Share of all talking time, 0 to 100
    pub percentage: f64,
    /// Number of cues
    pub turns: usize,
    /// Mean cue length in seconds
    pub mean_turn_seconds: f64,
    /// Longest cue in seconds
    pub longest_turn_seconds: f64,
}

/// Statistics for a whole transcript
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TranscriptStats {
    /// Sum of all cue durations in seconds
    pub total_seconds: f64,
    /// Per-speaker rows sorted by speaker name
    pub speakers: Vec<SpeakerStats>,
}

impl TranscriptStats {
    /// Compute statistics from cue durations
    pub fn from_transcript(transcript: &Transcript) -> Self {
        let mut millis_by_speaker: BTreeMap<&str, Vec<u64>> = BTreeMap::new();
        for cue in transcript.cues() {
            let speaker = cue.speaker.as_deref().unwrap_or(UNKNOWN_SPEAKER);
            millis_by_speaker
                .entry(speaker)
                .or_default()
                .push(cue.duration_millis());
        }

        let total_millis: u64 = millis_by_speaker.values().flatten().sum();

        let speakers = millis_by_speaker
            .into_iter()
            .map(|(speaker, turns)| {
                let spoken: u64 = turns.iter().sum();
                let longest = turns.iter().copied().max().unwrap_or(0);
                let percentage = if total_millis == 0 {
                    0.0
                } else {
                    spoken as f64 / total_millis as f64 * 100.0
                };
                SpeakerStats {
                    speaker: speaker.to_string(),
                    total_seconds: millis_to_secs(spoken),
                    percentage,
                    turns: turns.len(),
                    mean_turn_seconds: millis_to_secs(spoken) / turns.len() as f64,
                    longest_turn_seconds: millis_to_secs(longest),
                }
            })
            .collect();

        Self {
            total_seconds: millis_to_secs(total_millis),
            speakers,
        }
    }

    /// Row for `speaker`, if present
    pub fn speaker(&self, speaker: &str) -> Option<&SpeakerStats> {
        self.speakers.iter().find(|row| row.speaker == speaker)
    }
}

fn millis_to_secs(millis: u64) -> f64 {
    millis as f64 / 1000.0
}
