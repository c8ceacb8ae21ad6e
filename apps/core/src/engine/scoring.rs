//! Intent scoring and resolution.
//!
//! Combines two signals per (question, intent) pair: compiled patterns
//! matched against the normalized question, and extracted-keyword overlap
//! with the intent's flattened pattern text. Patterns capture the phrasings
//! the author anticipated; keyword overlap degrades gracefully when the
//! phrasing differs but the vocabulary matches, and the bigram bonus
//! rewards exact two-word phrase reuse.

use tracing::debug;

use super::keywords::KeywordExtractor;
use super::text;
use crate::kb::{Intent, KnowledgeBase};

/// Minimum score an intent needs to be usable as the answer.
pub const CONFIDENCE_THRESHOLD: u32 = 2;

/// Points per compiled pattern matching the normalized question.
const PATTERN_MATCH_POINTS: u32 = 3;
/// Points per keyword found whole-word in the pattern text.
const KEYWORD_POINTS: u32 = 1;
/// Extra points per bigram keyword found verbatim in the pattern text.
const BIGRAM_POINTS: u32 = 2;
/// How many keywords of the question take part in scoring.
const SCORING_KEYWORDS: usize = 6;

/// Scores questions against intents and picks the best one.
pub struct IntentResolver {
    keywords: KeywordExtractor,
}

impl Default for IntentResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentResolver {
    /// Create a new resolver
    pub fn new() -> Self {
        Self {
            keywords: KeywordExtractor::new(),
        }
    }

    /// Relevance score of `intent` for `question`.
    ///
    /// Non-negative; appending a matching pattern to the intent never
    /// lowers it. The bigram bonus is additive with the whole-word point
    /// when the same bigram satisfies both checks.
    pub fn score(&self, question: &str, intent: &Intent) -> u32 {
        let normalized = text::normalize(question);
        let mut score = 0;

        for pattern in intent.regexes() {
            if pattern.is_match(&normalized) {
                score += PATTERN_MATCH_POINTS;
            }
        }

        let keywords = self.keywords.extract(question, SCORING_KEYWORDS);
        let pattern_text = intent.pattern_text();
        for keyword in &keywords {
            if text::contains_whole_word(pattern_text, keyword) {
                score += KEYWORD_POINTS;
            }
            if keyword.contains(' ') && pattern_text.contains(keyword.as_str()) {
                score += BIGRAM_POINTS;
            }
        }
        score
    }

    /// Best-scoring intent of the knowledge base, with its score.
    ///
    /// Only a strictly greater score replaces the current best, so the
    /// first intent in document order wins ties. A score of 0 returns no
    /// intent; callers must treat anything below [`CONFIDENCE_THRESHOLD`]
    /// as no-match.
    pub fn resolve<'kb>(
        &self,
        question: &str,
        kb: &'kb KnowledgeBase,
    ) -> (Option<&'kb Intent>, u32) {
        let mut best = None;
        let mut best_score = 0;
        for intent in kb.intents() {
            let score = self.score(question, intent);
            if score > best_score {
                best_score = score;
                best = Some(intent);
            }
        }
        if let Some(intent) = best {
            debug!("resolved intent '{}' with score {}", intent.id, best_score);
        }
        (best, best_score)
    }
}
