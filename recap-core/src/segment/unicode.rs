//! UAX #29 sentence boundaries

use super::SentenceSegmenter;
use unicode_segmentation::UnicodeSegmentation;

/// Segmenter using the Unicode default sentence boundary algorithm
///
/// Whitespace-only pieces (UAX #29 breaks after every line feed) are
/// folded into the preceding sentence, or the following one at the start
/// of the text, so output keeps tiling the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSegmenter;

impl SentenceSegmenter for UnicodeSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        // (start, end) byte ranges; pieces are contiguous
        let mut ranges: Vec<(usize, usize)> = Vec::new();
        let mut pending_start: Option<usize> = None;

        for (offset, piece) in text.split_sentence_bound_indices() {
            let end = offset + piece.len();
            if piece.trim().is_empty() {
                match ranges.last_mut() {
                    Some(last) => last.1 = end,
                    None => {
                        pending_start.get_or_insert(offset);
                    }
                }
                continue;
            }
            let start = pending_start.take().unwrap_or(offset);
            ranges.push((start, end));
        }

        ranges.into_iter().map(|(start, end)| &text[start..end]).collect()
    }

    fn name(&self) -> &str {
        "unicode"
    }
}
