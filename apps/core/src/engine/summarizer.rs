//! Extractive sentence summarization.
//!
//! Scores each sentence by the corpus frequency of its content words,
//! divided by the square root of the sentence length so long sentences do
//! not win by volume alone, and keeps the best sentences in their original
//! order.

use std::collections::{HashMap, HashSet};

use super::keywords::STOPWORDS_PT;
use super::text;

/// Frequency-based extractive summarizer
pub struct Summarizer {
    stopwords: HashSet<&'static str>,
}

impl Default for Summarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer {
    /// Create a new summarizer with the Portuguese stop-word set
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS_PT.iter().copied().collect(),
        }
    }

    fn content_words<'a>(&self, normalized: &'a str) -> Vec<&'a str> {
        text::words(normalized)
            .filter(|w| !self.stopwords.contains(w))
            .collect()
    }

    /// Summarize `text` down to at most `max_sentences` sentences.
    ///
    /// Texts that already fit are returned unchanged, byte for byte.
    /// Selected sentences keep their original order and are joined with a
    /// single space. When no content word survives stop-word filtering the
    /// first `max_sentences` sentences are returned instead.
    pub fn summarize(&self, text: &str, max_sentences: usize) -> String {
        let sentences = text::sentences(text);
        if sentences.len() <= max_sentences {
            return text.to_string();
        }

        let normalized = text::normalize(text);
        let corpus = self.content_words(&normalized);
        if corpus.is_empty() {
            return sentences[..max_sentences].join(" ");
        }

        let mut frequencies: HashMap<&str, usize> = HashMap::new();
        for word in &corpus {
            *frequencies.entry(word).or_insert(0) += 1;
        }

        let mut scored: Vec<(usize, f64)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| {
                let sentence_norm = text::normalize(sentence);
                let sentence_words = self.content_words(&sentence_norm);
                if sentence_words.is_empty() {
                    return (index, 0.0);
                }
                let weight: usize = sentence_words
                    .iter()
                    .map(|w| frequencies.get(w).copied().unwrap_or(0))
                    .sum();
                (index, weight as f64 / (sentence_words.len() as f64).sqrt())
            })
            .collect();

        // Stable sort: equal scores keep original sentence order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut selected: Vec<usize> = scored
            .iter()
            .take(max_sentences)
            .map(|(index, _)| *index)
            .collect();
        selected.sort_unstable();

        selected
            .into_iter()
            .map(|index| sentences[index])
            .collect::<Vec<_>>()
            .join(" ")
    }
}
