//! English sentence boundary rules
//!
//! A terminator run (`.`, `!`, `?`, `…`, possibly followed by closing
//! quotes or brackets) ends a sentence when it is followed by whitespace
//! or the end of the text, unless:
//! - the next word starts with a lowercase letter;
//! - a single period follows a title (`Dr.`), or follows an abbreviation,
//!   an initial or a dotted acronym (`etc.`, `J.`, `U.S.`) and the next
//!   word is not a common sentence starter.
//!
//! Decimal points and clock times never qualify because no whitespace
//! follows the dot. A blank line always ends a sentence.

use super::tables::{ABBREVIATIONS, SENTENCE_STARTERS, TITLES};
use super::SentenceSegmenter;
use std::collections::HashSet;

/// Rule-based English segmenter
#[derive(Debug, Clone)]
pub struct EnglishSegmenter {
    titles: HashSet<String>,
    abbreviations: HashSet<String>,
    starters: HashSet<String>,
}

impl Default for EnglishSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl EnglishSegmenter {
    /// Create a segmenter with the built-in word tables
    pub fn new() -> Self {
        Self {
            titles: TITLES.iter().map(|s| s.to_string()).collect(),
            abbreviations: ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
            starters: SENTENCE_STARTERS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Add abbreviations (case-insensitive, trailing period optional)
    pub fn with_abbreviations<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for abbr in extra {
            let abbr = abbr.as_ref().trim().trim_end_matches('.').to_lowercase();
            if !abbr.is_empty() {
                self.abbreviations.insert(abbr);
            }
        }
        self
    }

    /// Byte offsets where sentence content ends (exclusive), in order
    fn content_ends(&self, text: &str) -> Vec<usize> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut ends = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let (pos, ch) = chars[i];

            if ch == '\n' {
                let mut j = i + 1;
                let mut newlines = 1;
                while j < chars.len() && chars[j].1.is_whitespace() {
                    if chars[j].1 == '\n' {
                        newlines += 1;
                    }
                    j += 1;
                }
                if newlines >= 2 {
                    ends.push(pos);
                }
                i = j;
                continue;
            }

            if !is_terminator(ch) {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            while j < chars.len() && is_terminator(chars[j].1) {
                j += 1;
            }
            let single_period = ch == '.' && j == i + 1;
            while j < chars.len() && is_closer(chars[j].1) {
                j += 1;
            }

            match chars.get(j) {
                None => {
                    ends.push(text.len());
                    break;
                }
                Some(&(end, next)) if next.is_whitespace() => {
                    if self.is_boundary(text, pos, end, single_period) {
                        ends.push(end);
                    }
                }
                Some(_) => {}
            }
            i = j;
        }

        ends
    }

    /// Decide a terminator run at `dot` (ending at `end`, followed by whitespace)
    fn is_boundary(&self, text: &str, dot: usize, end: usize, single_period: bool) -> bool {
        let following = text[end..].trim_start();
        let following = following.trim_start_matches(is_opener);

        if following.chars().next().is_some_and(char::is_lowercase) {
            return false;
        }

        if !single_period {
            return true;
        }

        let word = previous_word(text, dot);
        let lower = word.to_lowercase();

        if self.titles.contains(&lower) {
            return false;
        }

        if self.abbreviations.contains(&lower) || is_initial(word) || is_dotted_acronym(word) {
            return self.starters.contains(next_word(following));
        }

        true
    }
}

impl SentenceSegmenter for EnglishSegmenter {
    fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let mut sentences = Vec::new();
        let mut start = 0;

        for end in self.content_ends(text) {
            if end <= start || text[start..end].trim().is_empty() {
                continue;
            }
            let rest = &text[end..];
            let next = end + (rest.len() - rest.trim_start().len());
            sentences.push(&text[start..next]);
            start = next;
        }

        if start < text.len() {
            sentences.push(&text[start..]);
        }

        sentences
    }

    fn name(&self) -> &str {
        "english"
    }
}

fn is_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?' | '…' | '‽')
}

fn is_closer(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | '\u{201D}' | '\u{2019}' | ')' | ']' | '}' | '»'
    )
}

fn is_opener(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | '\u{201C}' | '\u{2018}' | '(' | '[' | '{' | '«'
    )
}

/// The word (letters, digits and inner dots) directly before byte offset `dot`
fn previous_word(text: &str, dot: usize) -> &str {
    let start = text[..dot]
        .char_indices()
        .rev()
        .take_while(|&(_, c)| c.is_alphanumeric() || c == '.')
        .last()
        .map_or(dot, |(p, _)| p);
    text[start..dot].trim_start_matches('.')
}

fn next_word(text: &str) -> &str {
    let end = text
        .char_indices()
        .find(|&(_, c)| !(c.is_alphanumeric() || c == '\''))
        .map_or(text.len(), |(p, _)| p);
    &text[..end]
}

fn is_initial(word: &str) -> bool {
    let mut chars = word.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase())
}

fn is_dotted_acronym(word: &str) -> bool {
    word.contains('.')
        && word.split('.').all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
        })
}
