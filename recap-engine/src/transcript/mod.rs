//! WebVTT transcripts: timestamps, cues and dialogue rendering

mod dialogue;
mod timestamp;
mod vtt;

pub use dialogue::{dialogue_entries, format_dialogue, DialogueEntry};
pub use timestamp::{normalize_timestamps, Timestamp};
pub use vtt::{Cue, Transcript};
