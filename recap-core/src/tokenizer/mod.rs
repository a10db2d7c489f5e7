//! Tokenizer capability
//!
//! The chunker budgets against token counts but never looks inside a
//! token. Anything that can turn text into ids and back implements
//! [`Tokenizer`]; the backend is built once and passed by reference.

mod byte;
#[cfg(feature = "huggingface")]
mod huggingface;
#[cfg(feature = "tiktoken")]
mod tiktoken;

pub use byte::ByteTokenizer;
#[cfg(feature = "huggingface")]
pub use huggingface::HuggingFaceTokenizer;
#[cfg(feature = "tiktoken")]
pub use tiktoken::{BpeEncoding, TiktokenTokenizer};

use crate::error::{CoreError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Token identifier
pub type TokenId = u32;

/// Text ⇄ token id conversion
pub trait Tokenizer: Send + Sync {
    /// Encode text without special or boundary tokens
    fn encode(&self, text: &str) -> Result<Vec<TokenId>>;

    /// Decode ids produced by [`encode`](Self::encode) back to text
    fn decode(&self, ids: &[TokenId]) -> Result<String>;

    /// Number of tokens `text` encodes to
    fn count(&self, text: &str) -> Result<usize> {
        Ok(self.encode(text)?.len())
    }

    /// Backend name for logs and reports
    ///
    /// Distinct vocabularies need distinct names; analysis caches key on it.
    fn name(&self) -> &str;
}

impl<T: Tokenizer + ?Sized> Tokenizer for Box<T> {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        (**self).encode(text)
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        (**self).decode(ids)
    }

    fn count(&self, text: &str) -> Result<usize> {
        (**self).count(text)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Selectable tokenizer backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerKind {
    /// One token per UTF-8 byte
    Bytes,
    /// OpenAI `cl100k_base` BPE
    Cl100k,
    /// OpenAI `o200k_base` BPE
    O200k,
    /// HuggingFace `tokenizer.json` on disk
    HuggingFace(PathBuf),
}

impl TokenizerKind {
    /// Names accepted by [`FromStr`], for help output
    pub const NAMES: &'static [&'static str] = &["bytes", "cl100k", "o200k", "hf:<path>"];

    /// Instantiate the backend
    pub fn build(&self) -> Result<Box<dyn Tokenizer>> {
        match self {
            TokenizerKind::Bytes => Ok(Box::new(ByteTokenizer)),
            #[cfg(feature = "tiktoken")]
            TokenizerKind::Cl100k => Ok(Box::new(TiktokenTokenizer::new(BpeEncoding::Cl100k)?)),
            #[cfg(feature = "tiktoken")]
            TokenizerKind::O200k => Ok(Box::new(TiktokenTokenizer::new(BpeEncoding::O200k)?)),
            #[cfg(not(feature = "tiktoken"))]
            TokenizerKind::Cl100k | TokenizerKind::O200k => Err(CoreError::Unsupported(format!(
                "tokenizer '{self}' requires the `tiktoken` feature"
            ))),
            #[cfg(feature = "huggingface")]
            TokenizerKind::HuggingFace(path) => {
                Ok(Box::new(HuggingFaceTokenizer::from_file(path)?))
            }
            #[cfg(not(feature = "huggingface"))]
            TokenizerKind::HuggingFace(_) => Err(CoreError::Unsupported(format!(
                "tokenizer '{self}' requires the `huggingface` feature"
            ))),
        }
    }
}

impl Default for TokenizerKind {
    fn default() -> Self {
        if cfg!(feature = "tiktoken") {
            TokenizerKind::Cl100k
        } else {
            TokenizerKind::Bytes
        }
    }
}

impl fmt::Display for TokenizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerKind::Bytes => write!(f, "bytes"),
            TokenizerKind::Cl100k => write!(f, "cl100k"),
            TokenizerKind::O200k => write!(f, "o200k"),
            TokenizerKind::HuggingFace(path) => write!(f, "hf:{}", path.display()),
        }
    }
}

impl FromStr for TokenizerKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(path) = s.strip_prefix("hf:") {
            if path.is_empty() {
                return Err(CoreError::InvalidArgument(
                    "hf: tokenizer needs a path to tokenizer.json".into(),
                ));
            }
            return Ok(TokenizerKind::HuggingFace(PathBuf::from(path)));
        }

        match s.to_lowercase().as_str() {
            "bytes" | "byte" => Ok(TokenizerKind::Bytes),
            "cl100k" | "cl100k_base" => Ok(TokenizerKind::Cl100k),
            "o200k" | "o200k_base" => Ok(TokenizerKind::O200k),
            other => Err(CoreError::Unsupported(format!("unknown tokenizer '{other}'"))),
        }
    }
}
