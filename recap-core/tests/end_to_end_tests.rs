//! End-to-end chunking with real tokenizer backends

use recap_core::{
    split_into_chunks, ByteTokenizer, ChunkerConfig, CoreError, EnglishSegmenter, SegmenterKind,
    TokenChunker, TokenizerKind,
};

const TRANSCRIPT: &str = "WEBVTT

1
00:00:00.000 --> 00:00:04.000
<v Alice>Good morning everyone. Let's get started with the quarterly review.</v>

2
00:00:04.500 --> 00:00:09.250
<v Bob>Thanks Alice. Revenue grew by 4.5 percent compared to last quarter.</v>

3
00:00:09.500 --> 00:00:12.000
<v Alice>That's great news! What drove the growth?</v>
";

#[test]
fn test_transcript_with_bytes_keeps_reading_order() {
    let tokenizer = ByteTokenizer;
    let segmenter = EnglishSegmenter::new();
    let chunks = split_into_chunks(TRANSCRIPT, 120, &tokenizer, &segmenter).unwrap();

    assert!(chunks.len() > 1);
    assert!(chunks.iter().all(|chunk| chunk.len() <= 120));
    assert_eq!(chunks.concat(), TRANSCRIPT);

    let alice = chunks.iter().position(|c| c.contains("Good morning")).unwrap();
    let bob = chunks.iter().position(|c| c.contains("Revenue grew")).unwrap();
    assert!(alice <= bob);
}

#[test]
fn test_invalid_budget_is_rejected_before_processing() {
    let tokenizer = ByteTokenizer;
    let segmenter = EnglishSegmenter::new();
    assert!(matches!(
        split_into_chunks("", 0, &tokenizer, &segmenter),
        Err(CoreError::InvalidArgument(_))
    ));
}

#[test]
fn test_capabilities_from_kinds() {
    let tokenizer = TokenizerKind::Bytes.build().unwrap();
    let segmenter = SegmenterKind::Unicode.build();
    let config = ChunkerConfig::with_max_tokens(40).unwrap();
    let chunker = TokenChunker::new(tokenizer.as_ref(), segmenter.as_ref(), config).unwrap();

    let output = chunker.chunk("One sentence here. Another one there.").unwrap();
    assert_eq!(output.stats.sentences, 2);
    assert_eq!(output.chunks.len(), 1);
}

#[cfg(feature = "tiktoken")]
mod tiktoken {
    use super::*;
    use recap_core::{BpeEncoding, TiktokenTokenizer, Tokenizer};

    #[test]
    fn test_short_text_is_one_chunk() {
        let tokenizer = TiktokenTokenizer::new(BpeEncoding::Cl100k).unwrap();
        let segmenter = EnglishSegmenter::new();
        let text = "Hi there. This is a test.";

        let chunks = split_into_chunks(text, 100, &tokenizer, &segmenter).unwrap();
        assert_eq!(chunks, vec![text]);
    }

    #[test]
    fn test_long_sentence_is_sliced_within_budget() {
        let tokenizer = TiktokenTokenizer::new(BpeEncoding::Cl100k).unwrap();
        let segmenter = EnglishSegmenter::new();
        let sentence = "word ".repeat(2000);
        assert!(tokenizer.count(&sentence).unwrap() > 1024);

        let config = ChunkerConfig::with_max_tokens(1024).unwrap();
        let output = TokenChunker::new(&tokenizer, &segmenter, config)
            .unwrap()
            .chunk(&sentence)
            .unwrap();

        assert_eq!(output.stats.sliced_sentences, 1);
        assert!(output.is_lossless());
        assert!(output.chunks.len() >= 2);
        for chunk in &output.chunks {
            assert!(chunk.tokens <= 1024);
            assert!(tokenizer.count(&chunk.text).unwrap() <= 1024);
        }
        let rebuilt: String = output.chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, sentence);
    }

    #[test]
    fn test_transcript_chunks_fit_budget() {
        let tokenizer = TokenizerKind::Cl100k.build().unwrap();
        let segmenter = EnglishSegmenter::new();
        let chunks = split_into_chunks(TRANSCRIPT, 40, tokenizer.as_ref(), &segmenter).unwrap();

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(tokenizer.count(chunk).unwrap() <= 40, "{chunk:?}");
        }
        assert_eq!(chunks.concat(), TRANSCRIPT);
    }
}
