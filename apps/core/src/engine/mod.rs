//! # Response Engine
//!
//! Rule-based pipeline that turns a free-text question into an answer.
//! No ML model involved - pure text normalization, frequency counting and
//! regex matching against a pre-compiled knowledge base.
//!
//! ## Components
//! - `text`: normalization and tokenization
//! - `keywords`: frequency-based keyword extraction
//! - `scoring`: intent scoring and resolution
//! - `summarizer`: extractive sentence summarization
//! - `responder`: main orchestrator

pub mod keywords;
pub mod responder;
pub mod scoring;
pub mod summarizer;
pub mod text;

// Re-export main types for convenience
pub use keywords::KeywordExtractor;
pub use responder::{Answer, Responder};
pub use scoring::{IntentResolver, CONFIDENCE_THRESHOLD};
pub use summarizer::Summarizer;
