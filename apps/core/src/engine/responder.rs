//! Response orchestration.
//!
//! Ties the pipeline together for one question: material detection first,
//! then intent resolution, then the keyword-annotated fallback. Every
//! branch produces an answer; per-question calls never fail.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::keywords::KeywordExtractor;
use super::scoring::{IntentResolver, CONFIDENCE_THRESHOLD};
use super::summarizer::Summarizer;
use super::text;
use crate::kb::KnowledgeBase;

/// Sentence count above which an intent response gets a summary attached.
const SUMMARY_TRIGGER_SENTENCES: usize = 2;
/// Length of the summary attached to long intent responses.
const SUMMARY_SENTENCES: usize = 2;
/// How many keywords the fallback suffix reports.
const FALLBACK_KEYWORDS: usize = 4;

/// The answer to one question: response text plus an optional summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    /// Response text shown to the user.
    pub response: String,
    /// Extractive summary of the response; empty when not applicable.
    pub summary: String,
}

/// Orchestrates material detection, intent resolution and summarization
/// over a shared immutable knowledge base.
pub struct Responder {
    kb: Arc<KnowledgeBase>,
    resolver: IntentResolver,
    keywords: KeywordExtractor,
    summarizer: Summarizer,
    rng: StdRng,
}

impl Responder {
    /// Create a responder with an entropy-seeded fallback generator.
    pub fn new(kb: Arc<KnowledgeBase>) -> Self {
        Self::with_rng(kb, StdRng::from_entropy())
    }

    /// Create a responder with a fixed seed, for reproducible fallbacks.
    pub fn with_seed(kb: Arc<KnowledgeBase>, seed: u64) -> Self {
        Self::with_rng(kb, StdRng::seed_from_u64(seed))
    }

    fn with_rng(kb: Arc<KnowledgeBase>, rng: StdRng) -> Self {
        Self {
            kb,
            resolver: IntentResolver::new(),
            keywords: KeywordExtractor::new(),
            summarizer: Summarizer::new(),
            rng,
        }
    }

    /// Answer `question`.
    ///
    /// Material detection runs first and short-circuits intent scoring;
    /// a confident intent (score >= threshold) answers with all of its
    /// candidate responses joined, summarized when long; otherwise a
    /// fallback phrase annotated with the detected keywords is returned.
    pub fn respond(&mut self, question: &str) -> Answer {
        if question.trim().is_empty() {
            return Answer {
                response: self.pick_fallback(),
                summary: String::new(),
            };
        }

        let kb = Arc::clone(&self.kb);

        let materials = kb.detect_materials(question);
        if !materials.is_empty() {
            debug!("answering with {} detected materials", materials.len());
            let response = materials
                .iter()
                .map(|entry| entry.response.as_str())
                .collect::<Vec<_>>()
                .join(" ");
            return Answer {
                response,
                summary: String::new(),
            };
        }

        let (best, score) = self.resolver.resolve(question, &kb);
        if let Some(intent) = best {
            if score >= CONFIDENCE_THRESHOLD {
                debug!("answering with intent '{}' (score {})", intent.id, score);
                let response = intent.responses.join(" ");
                let summary = if text::sentences(&response).len() > SUMMARY_TRIGGER_SENTENCES {
                    self.summarizer.summarize(&response, SUMMARY_SENTENCES)
                } else {
                    String::new()
                };
                return Answer { response, summary };
            }
        }

        let keywords = self.keywords.extract(question, FALLBACK_KEYWORDS);
        let fallback = self.pick_fallback();
        let response = if keywords.is_empty() {
            fallback
        } else {
            format!("{} (Palavras detectadas: {})", fallback, keywords.join(", "))
        };
        Answer {
            response,
            summary: String::new(),
        }
    }

    /// Extractive summary of `text`, at most `max_sentences` sentences.
    pub fn summarize(&self, text: &str, max_sentences: usize) -> String {
        self.summarizer.summarize(text, max_sentences)
    }

    /// Ranked keywords of `text`, at most `top_k + 2` entries.
    pub fn extract_keywords(&self, text: &str, top_k: usize) -> Vec<String> {
        self.keywords.extract(text, top_k)
    }

    fn pick_fallback(&mut self) -> String {
        // fallbacks are validated non-empty at load time
        self.kb
            .fallbacks()
            .choose(&mut self.rng)
            .cloned()
            .unwrap_or_default()
    }
}
