//! Basic tests for recap-engine

use recap_core::{ByteTokenizer, EnglishSegmenter};
use recap_engine::*;
use std::io::Write;

const STANDUP: &str = "WEBVTT

NOTE weekly standup

1
0:0:0.0 --> 0:0:12.0
<v Dana>Morning all. The release branch is cut and the release notes are drafted.</v>

2
0:0:12.0 --> 0:0:20.0
<v Eli>I fixed the flaky upload test. The upload retry logic needed a longer timeout.</v>

3
0:0:20.0 --> 0:0:30.0
<v Dana>Great. Who owns the release checklist this week?</v>

4
0:0:30.0 --> 0:0:33.0
<v Eli>I can take it.</v>
";

fn write_fixture() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".vtt").tempfile().unwrap();
    file.write_all(STANDUP.as_bytes()).unwrap();
    file
}

#[test]
fn test_transcript_from_file() {
    let file = write_fixture();
    let transcript = Transcript::from_path(file.path()).unwrap();

    assert_eq!(transcript.cues().len(), 4);
    assert_eq!(transcript.speakers(), vec!["Dana", "Eli"]);
    assert_eq!(transcript.duration().as_secs(), 33);
    assert!(transcript
        .formatted()
        .contains("00:00:12.000 --> 00:00:20.000"));
}

#[test]
fn test_stats_and_timeline() {
    let mut session = Session::parse(STANDUP).unwrap();

    let stats = session.stats().clone();
    assert_eq!(stats.total_seconds, 33.0);
    let dana = stats.speaker("Dana").unwrap();
    assert_eq!(dana.turns, 2);
    assert_eq!(dana.total_seconds, 22.0);
    assert_eq!(dana.longest_turn_seconds, 12.0);

    let timeline = session.timeline();
    assert_eq!(timeline.lanes.len(), 2);
    assert_eq!(timeline.lanes[1].spans.len(), 2);
    let rendered = timeline.render_ascii(33);
    assert!(rendered.starts_with("Dana |############"));
}

#[test]
fn test_small_budget_chunks_fit() {
    let tokenizer = ByteTokenizer;
    let segmenter = EnglishSegmenter::new();
    let config = ChunkerConfig::with_max_tokens(80).unwrap();
    let chunker = TokenChunker::new(&tokenizer, &segmenter, config).unwrap();

    let mut session = Session::parse(STANDUP).unwrap();
    let output = session.chunks(&chunker).unwrap();
    assert!(output.chunks.len() > 1);
    assert!(output.chunks.iter().all(|chunk| chunk.tokens <= 80));
}

#[test]
fn test_luhn_summary_as_dialogue() {
    let tokenizer = ByteTokenizer;
    let segmenter = EnglishSegmenter::new();
    let chunker = TokenChunker::new(&tokenizer, &segmenter, ChunkerConfig::default()).unwrap();

    let mut session = Session::parse(STANDUP).unwrap();
    let summarizer = SummaryConfig::default().build().unwrap();
    let summary = session.summary(&chunker, &summarizer).unwrap();

    assert_eq!(summary.chunks, 1);
    assert!(!summary.text.is_empty());
    for entry in dialogue_entries(&summary.text) {
        assert!(["Dana", "Eli"].contains(&entry.speaker));
    }
}

#[test]
fn test_summarize_chunks_directly() {
    let chunks = vec![
        "The plan is late. The plan needs the plan owner.".to_string(),
        "Budget talk. The budget is fine and the budget is approved.".to_string(),
    ];
    let summary = summarize_chunks(&chunks, &LuhnSummarizer::new()).unwrap();
    assert_eq!(
        summary,
        "The plan needs the plan owner. The budget is fine and the budget is approved."
    );
}

#[test]
fn test_bad_file_is_reported_with_line() {
    let err = Transcript::parse("WEBVTT\n\n00:00:09.000 --> 00:00:01.000\nbackwards\n").unwrap_err();
    assert_eq!(
        err.to_string(),
        "parse error on line 3: cue ends (00:00:01.000) before it starts (00:00:09.000)"
    );
}
