//! Integration tests for the recap CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn recap() -> Command {
    let mut cmd = Command::cargo_bin("recap").unwrap();
    cmd.env_remove("RECAP_CONFIG");
    cmd
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn test_chunk_text_file() {
    recap()
        .args(["chunk", "-i", &fixture_path("notes.txt"), "--tokenizer", "bytes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("==> tests/fixtures/notes.txt <=="))
        .stdout(predicate::str::contains("--- chunk 1/1"))
        .stdout(predicate::str::contains("The budget review is late."));
}

#[test]
fn test_chunk_budget_is_respected() {
    let value = json_stdout(recap().args([
        "chunk",
        "-i",
        &fixture_path("notes.txt"),
        "--tokenizer",
        "bytes",
        "-m",
        "40",
        "-f",
        "json",
    ]));

    let chunks = value[0]["chunking"]["chunks"].as_array().unwrap();
    assert!(chunks.len() > 1);
    for chunk in chunks {
        assert!(chunk["tokens"].as_u64().unwrap() <= 40);
    }
}

#[test]
fn test_chunk_transcript_is_normalised() {
    recap()
        .args(["chunk", "-i", &fixture_path("standup.vtt"), "--tokenizer", "bytes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("00:00:12.000 --> 00:00:20.000"));
}

#[test]
fn test_chunk_rejects_non_positive_budget() {
    recap()
        .args(["chunk", "-i", &fixture_path("notes.txt"), "--tokenizer", "bytes", "-m", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_unknown_tokenizer() {
    recap()
        .args(["chunk", "-i", &fixture_path("notes.txt"), "--tokenizer", "word2vec"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tokenizer"));
}

#[test]
fn test_glob_pattern_covers_all_transcripts() {
    let value = json_stdout(recap().args([
        "stats",
        "-i",
        "tests/fixtures/*.vtt",
        "-f",
        "json",
        "-q",
    ]));

    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["source"], "tests/fixtures/planning.vtt");
    assert_eq!(entries[1]["source"], "tests/fixtures/standup.vtt");
}

#[test]
fn test_stats_table() {
    recap()
        .args(["stats", "-i", &fixture_path("standup.vtt")])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana"))
        .stdout(predicate::str::contains("Eli"))
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn test_stats_json() {
    let value = json_stdout(recap().args(["stats", "-i", &fixture_path("standup.vtt"), "-f", "json"]));

    let stats = &value[0]["stats"];
    assert_eq!(stats["total_seconds"], 33.0);
    assert_eq!(stats["speakers"][0]["speaker"], "Dana");
    assert_eq!(stats["speakers"][0]["turns"], 2);
}

#[test]
fn test_stats_needs_transcript() {
    recap()
        .args(["stats", "-i", &fixture_path("notes.txt")])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not a usable transcript"));
}

#[test]
fn test_timeline_ascii() {
    recap()
        .args(["timeline", "-i", &fixture_path("standup.vtt"), "-w", "33"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dana |############"));
}

#[test]
fn test_summarize_text_file() {
    let value = json_stdout(recap().args([
        "summarize",
        "-i",
        &fixture_path("notes.txt"),
        "--tokenizer",
        "bytes",
        "-f",
        "json",
    ]));

    let summary = &value[0]["summary"];
    assert_eq!(summary["summarizer"], "luhn");
    assert_eq!(summary["chunks"], 1);
    assert!(!summary["text"].as_str().unwrap().is_empty());
}

#[test]
fn test_summarize_transcript_as_dialogue() {
    recap()
        .args([
            "summarize",
            "-i",
            &fixture_path("planning.vtt"),
            "--tokenizer",
            "bytes",
            "--dialogue",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Ana (00:00:00.000 to 00:00:05.000):\nThe roadmap review starts now.",
        ));
}

#[test]
fn test_missing_input() {
    recap()
        .args(["chunk", "-i", "tests/fixtures/does-not-exist-*.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found matching"));
}

#[test]
fn test_markdown_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("chunks.md");

    recap()
        .args([
            "chunk",
            "-i",
            &fixture_path("notes.txt"),
            "--tokenizer",
            "bytes",
            "-f",
            "markdown",
            "-o",
            output_path.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_path).unwrap();
    assert!(content.contains("### Chunk 1"));
    assert!(content.contains("*Inputs: 1*"));
}

#[test]
fn test_generated_config_is_usable() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("recap.toml");

    recap()
        .args(["generate-config", "-o", config_path.to_str().unwrap()])
        .assert()
        .success();

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[chunking]"));
    assert!(content.contains("[summary]"));

    let edited = content
        .replace("max_tokens = 1024", "max_tokens = 40")
        .replace("format = \"text\"", "format = \"json\"");
    fs::write(&config_path, edited).unwrap();

    let value = json_stdout(recap().args([
        "-c",
        config_path.to_str().unwrap(),
        "chunk",
        "-i",
        &fixture_path("notes.txt"),
        "--tokenizer",
        "bytes",
    ]));
    for chunk in value[0]["chunking"]["chunks"].as_array().unwrap() {
        assert!(chunk["tokens"].as_u64().unwrap() <= 40);
    }
}

#[test]
fn test_flag_beats_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("recap.toml");
    fs::write(&config_path, "[chunking]\nmax_tokens = 0\ntokenizer = \"bytes\"\n").unwrap();

    recap()
        .args([
            "-c",
            config_path.to_str().unwrap(),
            "chunk",
            "-i",
            &fixture_path("notes.txt"),
            "-m",
            "500",
        ])
        .assert()
        .success();
}

#[test]
fn test_list_formats() {
    recap()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_help_mentions_commands() {
    recap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chunk"))
        .stdout(predicate::str::contains("summarize"));
}
