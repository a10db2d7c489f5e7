//! OpenAI BPE tokenizers via `tiktoken-rs`

use super::{TokenId, Tokenizer};
use crate::error::{CoreError, Result};
use tiktoken_rs::CoreBPE;

/// Bundled BPE vocabularies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BpeEncoding {
    /// `cl100k_base` (GPT-3.5 / GPT-4)
    Cl100k,
    /// `o200k_base` (GPT-4o family)
    O200k,
}

impl BpeEncoding {
    fn name(self) -> &'static str {
        match self {
            BpeEncoding::Cl100k => "cl100k_base",
            BpeEncoding::O200k => "o200k_base",
        }
    }
}

/// Tokenizer backed by a tiktoken BPE vocabulary
pub struct TiktokenTokenizer {
    bpe: CoreBPE,
    encoding: BpeEncoding,
}

impl std::fmt::Debug for TiktokenTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenTokenizer")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}

impl TiktokenTokenizer {
    /// Load one of the bundled vocabularies
    pub fn new(encoding: BpeEncoding) -> Result<Self> {
        let bpe = match encoding {
            BpeEncoding::Cl100k => tiktoken_rs::cl100k_base(),
            BpeEncoding::O200k => tiktoken_rs::o200k_base(),
        }
        .map_err(|e| CoreError::Tokenizer(format!("failed to load {}: {e}", encoding.name())))?;

        tracing::debug!(encoding = encoding.name(), "loaded BPE vocabulary");
        Ok(Self { bpe, encoding })
    }

    /// Vocabulary in use
    pub fn encoding(&self) -> BpeEncoding {
        self.encoding
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        Ok(self.bpe.encode_ordinary(text))
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        self.bpe
            .decode(ids.to_vec())
            .map_err(|e| CoreError::Tokenizer(e.to_string()))
    }

    fn name(&self) -> &str {
        self.encoding.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ChunkerConfig, EnglishSegmenter, TokenChunker};

    #[test]
    fn test_round_trip() {
        let tok = TiktokenTokenizer::new(BpeEncoding::Cl100k).unwrap();
        let text = "Hi there. This is a test.";
        let ids = tok.encode(text).unwrap();
        assert!(!ids.is_empty());
        assert!(ids.len() < text.len());
        assert_eq!(tok.decode(&ids).unwrap(), text);
        assert_eq!(tok.name(), "cl100k_base");
    }

    #[test]
    fn test_special_tokens_are_plain_text() {
        let tok = TiktokenTokenizer::new(BpeEncoding::Cl100k).unwrap();
        let text = "<|endoftext|>";
        let ids = tok.encode(text).unwrap();
        assert!(ids.len() > 1);
        assert_eq!(tok.decode(&ids).unwrap(), text);
    }

    #[test]
    fn test_chunk_counts_are_re_encoded() {
        // slices of an over-long sentence merge differently once joined
        let tok = TiktokenTokenizer::new(BpeEncoding::Cl100k).unwrap();
        let seg = EnglishSegmenter::new();
        let config = ChunkerConfig::with_max_tokens(5).unwrap();
        let chunker = TokenChunker::new(&tok, &seg, config).unwrap();

        for text in ["!a??yddz", "Hi there. This is a test."] {
            let output = chunker.chunk(text).unwrap();
            let rebuilt: String = output.chunks.iter().map(|c| c.text.as_str()).collect();
            assert_eq!(rebuilt, text);
            for chunk in &output.chunks {
                assert_eq!(chunk.tokens, tok.count(&chunk.text).unwrap(), "{chunk:?}");
            }
            assert_eq!(
                output.stats.total_tokens,
                output.chunks.iter().map(|c| c.tokens).sum::<usize>()
            );
        }
    }
}
