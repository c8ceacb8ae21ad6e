//! Keyword extraction by frequency ranking.
//!
//! Splits a question into words, drops Portuguese stop-words and ranks the
//! rest by raw frequency. Adjacent pairs of the filtered word list are
//! ranked as bigrams and reported first. Pairing happens after stop-word
//! removal, so a bigram may join two words that were not adjacent in the
//! source text; intent scoring depends on that exact behavior, keep it.

use std::collections::{HashMap, HashSet};

use super::text;

/// Stop-words for Portuguese
///
/// Carried over verbatim from the knowledge-base authoring guide. Entries
/// with accents or spaces can never match a normalized token; they stay in
/// the list so the filter matches the documented set.
pub(crate) const STOPWORDS_PT: &[&str] = &[
    "a",
    "e",
    "o",
    "as",
    "os",
    "um",
    "uma",
    "de",
    "do",
    "da",
    "dos",
    "das",
    "em",
    "no",
    "na",
    "nos",
    "nas",
    "por",
    "para",
    "com",
    "sem",
    "ou",
    "que",
    "como",
    "onde",
    "qual",
    "quais",
    "é",
    "são",
    "eu",
    "você",
    "voce",
    "me",
    "minha",
    "meu",
    "se",
    "este",
    "esta",
    "isso",
    "ao",
    "à",
    "às",
    "pelo",
    "pela",
    "pelos",
    "pelas",
    "tambem",
    "também",
    "tem",
    "temos",
    "pode",
    "poder",
    "porquê",
    "por que",
];

/// Frequency-based keyword extractor
pub struct KeywordExtractor {
    stopwords: HashSet<&'static str>,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordExtractor {
    /// Create a new extractor with the Portuguese stop-word set
    pub fn new() -> Self {
        Self {
            stopwords: STOPWORDS_PT.iter().copied().collect(),
        }
    }

    /// Check if a word is a stop-word
    fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Normalize `text` and return its words with stop-words removed
    fn content_words(&self, text: &str) -> Vec<String> {
        let normalized = text::normalize(text);
        text::words(&normalized)
            .filter(|w| !self.is_stopword(w))
            .map(str::to_string)
            .collect()
    }

    /// Extract the ranked keywords of `text`.
    ///
    /// Returns the top-2 bigrams followed by the `top_k` most frequent
    /// unigrams; a unigram that is a constituent word or textual duplicate
    /// of a selected bigram is dropped from the tail. Result length is at
    /// most `top_k + 2`. Ties rank by first appearance in the text.
    pub fn extract(&self, text: &str, top_k: usize) -> Vec<String> {
        let words = self.content_words(text);
        if words.is_empty() {
            return vec![];
        }

        let unigrams = top_by_frequency(words.iter().map(String::as_str), top_k);

        let pairs: Vec<String> = words
            .windows(2)
            .map(|pair| format!("{} {}", pair[0], pair[1]))
            .collect();
        let bigrams = top_by_frequency(pairs.iter().map(String::as_str), 2);

        let mut keywords: Vec<String> = bigrams.iter().map(|b| b.to_string()).collect();
        for unigram in unigrams {
            let covered = bigrams
                .iter()
                .any(|b| *b == unigram || b.split(' ').any(|part| part == unigram));
            if !covered {
                keywords.push(unigram.to_string());
            }
        }
        keywords
    }
}

/// Rank distinct items by descending count; ties keep first-seen order.
fn top_by_frequency<'a>(items: impl Iterator<Item = &'a str>, k: usize) -> Vec<&'a str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();
    for item in items {
        let count = counts.entry(item).or_insert(0);
        if *count == 0 {
            order.push(item);
        }
        *count += 1;
    }
    let mut ranked: Vec<(&str, usize)> = order.into_iter().map(|w| (w, counts[w])).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.into_iter().take(k).map(|(w, _)| w).collect()
}
