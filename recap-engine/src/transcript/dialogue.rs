//! Dialogue rendering of cue text

use regex::Regex;
use std::sync::OnceLock;

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"(?s)(\d{2,}:\d{2}:\d{2}\.\d{3}) --> (\d{2,}:\d{2}:\d{2}\.\d{3})[^\n<]*\s+<v(?:\.[^\s>]+)*\s+([^>]+)>(.*?)</v>",
        )
        .expect("dialogue pattern is valid")
    })
}

/// One voiced entry found in cue text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueEntry<'a> {
    /// Start timestamp as written
    pub start: &'a str,
    /// End timestamp as written
    pub end: &'a str,
    /// Speaker name from the voice span
    pub speaker: &'a str,
    /// Spoken text, newlines collapsed to spaces
    pub content: String,
}

/// Find every `start --> end <v Speaker>content</v>` entry in `text`
///
/// Works on normalised WebVTT as well as on text where sentences have been
/// re-joined with spaces, since any whitespace may separate the timing from
/// the voice span.
pub fn dialogue_entries(text: &str) -> Vec<DialogueEntry<'_>> {
    entry_pattern()
        .captures_iter(text)
        .filter_map(|caps| {
            Some(DialogueEntry {
                start: caps.get(1)?.as_str(),
                end: caps.get(2)?.as_str(),
                speaker: caps.get(3)?.as_str().trim(),
                content: caps.get(4)?.as_str().replace('\n', " ").trim().to_string(),
            })
        })
        .collect()
}

/// Render voiced entries as readable dialogue
///
/// Each entry becomes `"{speaker} ({start} to {end}):\n{content}\n"`; entries
/// are separated by a newline. Text without voiced entries renders empty.
pub fn format_dialogue(text: &str) -> String {
    dialogue_entries(text)
        .iter()
        .map(|entry| {
            format!(
                "{} ({} to {}):\n{}\n",
                entry.speaker, entry.start, entry.end, entry.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_entry() {
        let text = "00:00:01.000 --> 00:00:04.000 <v Alice>Hello there.</v>";
        assert_eq!(
            format_dialogue(text),
            "Alice (00:00:01.000 to 00:00:04.000):\nHello there.\n"
        );
    }

    #[test]
    fn test_entries_across_lines() {
        let text = "1\n00:00:01.000 --> 00:00:04.000\n<v Alice>Hello\nthere.</v>\n\n\
                    2\n00:00:05.000 --> 00:00:06.500 align:start\n<v Bob Jones>Hi.</v>";
        let entries = dialogue_entries(text);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].content, "Hello there.");
        assert_eq!(entries[1].speaker, "Bob Jones");
        assert_eq!(entries[1].end, "00:00:06.500");

        assert_eq!(
            format_dialogue(text),
            "Alice (00:00:01.000 to 00:00:04.000):\nHello there.\n\n\
             Bob Jones (00:00:05.000 to 00:00:06.500):\nHi.\n"
        );
    }

    #[test]
    fn test_unvoiced_text_is_skipped() {
        assert_eq!(format_dialogue("No timestamps here."), "");
        assert_eq!(
            format_dialogue("00:00:01.000 --> 00:00:02.000\nno voice span"),
            ""
        );
    }

    #[test]
    fn test_long_hours() {
        let text = "100:00:01.000 --> 100:00:02.000 <v A>x</v>";
        assert_eq!(dialogue_entries(text)[0].start, "100:00:01.000");
    }
}
