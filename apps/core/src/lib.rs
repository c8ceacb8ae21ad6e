//! # FAQBot Core
//!
//! Rule-based response engine for a Portuguese FAQ assistant.
//! Matches free-text questions against a knowledge base of intents,
//! detects literal requests for course material, and produces short
//! extractive summaries of arbitrary text.
//!
//! The crate is the analysis core only: HTTP routes, templates and
//! conversation history live in the hosting application, which hands raw
//! strings in and renders whatever comes back. The host's entry points are
//! [`Responder::respond`], [`Responder::summarize`] and
//! [`Responder::extract_keywords`].

pub mod engine;
pub mod error;
pub mod kb;

#[cfg(test)]
mod tests;

pub use engine::keywords::KeywordExtractor;
pub use engine::responder::{Answer, Responder};
pub use engine::scoring::{IntentResolver, CONFIDENCE_THRESHOLD};
pub use engine::summarizer::Summarizer;
pub use error::EngineError;
pub use kb::{Intent, KnowledgeBase, KnowledgeBaseDoc, MaterialEntry};
