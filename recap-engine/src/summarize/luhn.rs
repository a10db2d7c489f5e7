//! Luhn's extractive summariser
//!
//! Significant words are the words occurring more than once among the most
//! frequent `significant_percentage` share of all (non-stop) words. A
//! sentence is rated by its best cluster: a run that starts at a significant
//! word and ends once `max_gap_size` insignificant words follow in a row.
//! A cluster rates `significant² / length` (trailing gap excluded), and a
//! cluster holding a single significant word rates zero. The best-rated
//! sentences are returned in document order.

use super::Summarizer;
use crate::error::{EngineError, Result};
use recap_core::{EnglishSegmenter, SentenceSegmenter};
use std::collections::{HashMap, HashSet};
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// Sentences picked per text
pub const DEFAULT_SENTENCES: usize = 1;
/// Share of the vocabulary considered for significance
pub const DEFAULT_SIGNIFICANT_PERCENTAGE: f64 = 1.0;
/// Insignificant words that close a cluster
pub const DEFAULT_MAX_GAP_SIZE: usize = 4;

/// Extractive summariser after H. P. Luhn (1958)
pub struct LuhnSummarizer {
    sentences_count: usize,
    significant_percentage: f64,
    max_gap_size: usize,
    stop_words: HashSet<String>,
    segmenter: Box<dyn SentenceSegmenter>,
}

impl Default for LuhnSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LuhnSummarizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LuhnSummarizer")
            .field("sentences_count", &self.sentences_count)
            .field("significant_percentage", &self.significant_percentage)
            .field("max_gap_size", &self.max_gap_size)
            .field("stop_words", &self.stop_words.len())
            .field("segmenter", &self.segmenter.name())
            .finish()
    }
}

impl LuhnSummarizer {
    /// One sentence per text, no stop words, English segmentation
    pub fn new() -> Self {
        Self {
            sentences_count: DEFAULT_SENTENCES,
            significant_percentage: DEFAULT_SIGNIFICANT_PERCENTAGE,
            max_gap_size: DEFAULT_MAX_GAP_SIZE,
            stop_words: HashSet::new(),
            segmenter: Box::new(EnglishSegmenter::new()),
        }
    }

    /// Number of sentences to keep
    pub fn with_sentences(mut self, count: usize) -> Self {
        self.sentences_count = count;
        self
    }

    /// Share of the most frequent words eligible as significant, in `0.0..=1.0`
    pub fn with_significant_percentage(mut self, share: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&share) {
            return Err(EngineError::Config(format!(
                "significant_percentage must be between 0 and 1, got {share}"
            )));
        }
        self.significant_percentage = share;
        Ok(self)
    }

    /// Insignificant words that end a cluster
    pub fn with_max_gap_size(mut self, gap: usize) -> Result<Self> {
        if gap == 0 {
            return Err(EngineError::Config("max_gap_size must be at least 1".into()));
        }
        self.max_gap_size = gap;
        Ok(self)
    }

    /// Words ignored when picking significant words
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|w| w.as_ref().to_lowercase())
            .collect();
        self
    }

    /// Segmenter used to find sentences
    pub fn with_segmenter(mut self, segmenter: Box<dyn SentenceSegmenter>) -> Self {
        self.segmenter = segmenter;
        self
    }

    /// Sentences to keep per text
    pub fn sentences_count(&self) -> usize {
        self.sentences_count
    }

    fn significant_words(&self, sentences: &[Vec<String>]) -> HashSet<String> {
        let words: Vec<&str> = sentences
            .iter()
            .flatten()
            .map(String::as_str)
            .filter(|w| !self.stop_words.contains(*w))
            .collect();

        // first-seen order breaks frequency ties
        let mut order: Vec<&str> = Vec::new();
        let mut frequency: HashMap<&str, usize> = HashMap::new();
        for word in &words {
            let count = frequency.entry(word).or_insert(0);
            if *count == 0 {
                order.push(word);
            }
            *count += 1;
        }
        order.sort_by(|a, b| frequency[b].cmp(&frequency[a]));

        let best = (words.len() as f64 * self.significant_percentage) as usize;
        order
            .into_iter()
            .take(best)
            .filter(|w| frequency[w] > 1)
            .map(str::to_string)
            .collect()
    }

    fn rate_sentence(&self, words: &[String], significant: &HashSet<String>) -> f64 {
        let mut clusters: Vec<Vec<bool>> = Vec::new();
        let mut in_cluster = false;

        for word in words {
            let is_significant = significant.contains(word);
            if is_significant && !in_cluster {
                in_cluster = true;
                clusters.push(vec![true]);
            } else if in_cluster {
                if let Some(cluster) = clusters.last_mut() {
                    cluster.push(is_significant);
                }
            }

            if let Some(cluster) = clusters.last() {
                if cluster.len() >= self.max_gap_size
                    && cluster[cluster.len() - self.max_gap_size..]
                        .iter()
                        .all(|s| !s)
                {
                    in_cluster = false;
                }
            }
        }

        clusters
            .iter()
            .map(|cluster| cluster_rating(cluster))
            .fold(0.0, f64::max)
    }
}

fn cluster_rating(cluster: &[bool]) -> f64 {
    let len = cluster.iter().rposition(|s| *s).map_or(0, |last| last + 1);
    let significant = cluster.iter().filter(|s| **s).count();
    if significant <= 1 {
        return 0.0;
    }
    (significant * significant) as f64 / len as f64
}

/// Lowercased words of a sentence: letters, apostrophes and hyphens,
/// starting with a letter
fn sentence_words(sentence: &str) -> Vec<String> {
    sentence
        .unicode_words()
        .filter(|word| {
            let mut chars = word.chars();
            chars.next().is_some_and(char::is_alphabetic)
                && chars.all(|c| c.is_alphabetic() || c == '\'' || c == '-')
        })
        .map(str::to_lowercase)
        .collect()
}

impl Summarizer for LuhnSummarizer {
    fn summarize(&self, text: &str) -> Result<String> {
        let sentences: Vec<&str> = self
            .segmenter
            .segment(text)
            .into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if sentences.is_empty() || self.sentences_count == 0 {
            return Ok(String::new());
        }

        let words: Vec<Vec<String>> = sentences.iter().map(|s| sentence_words(s)).collect();
        let significant = self.significant_words(&words);

        let mut rated: Vec<(usize, f64)> = words
            .iter()
            .enumerate()
            .map(|(order, w)| (order, self.rate_sentence(w, &significant)))
            .collect();
        // stable: equal ratings keep document order
        rated.sort_by(|a, b| b.1.total_cmp(&a.1));
        rated.truncate(self.sentences_count);
        rated.sort_by_key(|(order, _)| *order);

        tracing::debug!(
            sentences = sentences.len(),
            significant = significant.len(),
            picked = rated.len(),
            "luhn summary"
        );

        Ok(rated
            .into_iter()
            .map(|(order, _)| sentences[order])
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn name(&self) -> &str {
        "luhn"
    }
}
