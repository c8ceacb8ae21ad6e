use thiserror::Error;

/// Errors raised while building a [`KnowledgeBase`](crate::kb::KnowledgeBase).
///
/// The engine has exactly one failure domain: knowledge-base construction.
/// Per-question operations (`respond`, `summarize`, `extract_keywords`)
/// accept arbitrary text and always succeed.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The knowledge-base document is not valid JSON or misses a required field.
    #[error("knowledge base parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The document parsed but violates a schema constraint.
    #[error("knowledge base validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// An intent carries a pattern that does not compile as a regex.
    #[error("invalid pattern {pattern:?} in intent '{intent}': {source}")]
    Pattern {
        /// Identifier of the offending intent.
        intent: String,
        /// The raw pattern string that failed to compile.
        pattern: String,
        /// Compilation error reported by the regex engine.
        source: regex::Error,
    },
}
