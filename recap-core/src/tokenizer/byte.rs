//! Byte-level tokenizer

use super::{TokenId, Tokenizer};
use crate::error::{CoreError, Result};

/// One token per UTF-8 byte, id = byte value
///
/// Needs no model files and round-trips any string exactly. Decoding a
/// run of ids that splits a multi-byte character yields U+FFFD for the
/// broken sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByteTokenizer;

impl Tokenizer for ByteTokenizer {
    fn encode(&self, text: &str) -> Result<Vec<TokenId>> {
        Ok(text.bytes().map(TokenId::from).collect())
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String> {
        let bytes = ids
            .iter()
            .map(|&id| {
                u8::try_from(id).map_err(|_| {
                    CoreError::Tokenizer(format!("token id {id} is outside the byte range"))
                })
            })
            .collect::<Result<Vec<u8>>>()?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn count(&self, text: &str) -> Result<usize> {
        Ok(text.len())
    }

    fn name(&self) -> &str {
        "bytes"
    }
}
