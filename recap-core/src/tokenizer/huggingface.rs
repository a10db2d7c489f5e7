//! HuggingFace `tokenizer.json` backend

use super::{TokenId, Tokenizer, TokenizerKind};
use crate::error::{CoreError, Result};
use std::path::Path;

/// Tokenizer loaded from a HuggingFace `tokenizer.json`
///
/// This is how the BART-large-CNN vocabulary is used: export its
/// `tokenizer.json` and point the chunker at it.
pub struct HuggingFaceTokenizer {
    inner: tokenizers::Tokenizer,
    name: String,
}

impl std::fmt::Debug for HuggingFaceTokenizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceTokenizer")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl HuggingFaceTokenizer {
    /// Load a serialized tokenizer
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let inner = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            CoreError::Tokenizer(format!("failed to load {}: {e}", path.display()))
        })?;

        tracing::debug!(path = %path.display(), "loaded HuggingFace tokenizer");
        Ok(Self {
            inner,
            name: tokenizer_name(path),
        })
    }
}

/// Same spelling as `TokenizerKind::HuggingFace`, so each file gets its own name
fn tokenizer_name(path: &Path) -> String {
    TokenizerKind::HuggingFace(path.to_path_buf()).to_string()
}

impl Tokenizer for HuggingFaceTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        let encoding = self
            .inner
            .encode(text, false)
            .map_err(|e| CoreError::Tokenizer(e.to_string()))?;
        Ok(encoding.get_ids().to_vec())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        self.inner
            .decode(ids, false)
            .map_err(|e| CoreError::Tokenizer(e.to_string()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
