//! Knowledge base loading and material detection.
//!
//! The knowledge base is a JSON document with three required top-level
//! fields: `intencoes` (intents with match patterns and candidate
//! responses), `materiais` (literal trigger phrases mapped to a fixed
//! response each) and `fallbacks` (generic replies). It is parsed and
//! validated once at startup; every pattern is compiled eagerly so a
//! malformed regex fails the load instead of a later query. The resulting
//! [`KnowledgeBase`] is immutable and can be shared across request workers
//! without locking.
//!
//! Reading the document from disk or network is the hosting application's
//! concern; the core only takes the JSON text or the parsed document.

use std::fmt;

use regex::{Regex, RegexBuilder};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, info};
use validator::Validate;

use crate::engine::text;
use crate::error::EngineError;

/// One intent as it appears in the document.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct IntentDoc {
    /// Unique identifier.
    #[validate(length(min = 1, message = "intent id must not be empty"))]
    pub id: String,
    /// Regex pattern strings; optional, defaults to empty.
    #[serde(rename = "padroes", default)]
    pub patterns: Vec<String>,
    /// Candidate response strings; optional, defaults to empty.
    #[serde(rename = "respostas", default)]
    pub responses: Vec<String>,
}

/// One material entry as it appears under `materiais`.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialDoc {
    /// Literal trigger phrases.
    #[serde(rename = "padroes", default)]
    pub patterns: Vec<String>,
    /// The fixed response returned when a trigger hits.
    #[serde(rename = "resposta")]
    pub response: String,
}

/// The raw knowledge-base document.
///
/// All three top-level fields are required; a document that misses one is
/// rejected instead of silently defaulting to empty.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct KnowledgeBaseDoc {
    /// Intents in document order.
    #[serde(rename = "intencoes")]
    #[validate(nested)]
    pub intents: Vec<IntentDoc>,
    /// Material entries in document order.
    #[serde(rename = "materiais", deserialize_with = "deserialize_materials")]
    pub materials: Vec<MaterialEntry>,
    /// Generic replies used when no intent clears the threshold.
    #[validate(length(min = 1, message = "at least one fallback is required"))]
    pub fallbacks: Vec<String>,
}

/// A material entry: literal triggers and one fixed response.
#[derive(Debug, Clone)]
pub struct MaterialEntry {
    /// Name of the material (the JSON key under `materiais`).
    pub name: String,
    /// Literal phrases matched whole-word against the question.
    pub triggers: Vec<String>,
    /// Fixed response recorded on the first trigger hit.
    pub response: String,
}

/// Deserialize the `materiais` object keeping document order.
fn deserialize_materials<'de, D>(deserializer: D) -> Result<Vec<MaterialEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    struct MaterialsVisitor;

    impl<'de> Visitor<'de> for MaterialsVisitor {
        type Value = Vec<MaterialEntry>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of material name to material entry")
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::new();
            while let Some((name, doc)) = map.next_entry::<String, MaterialDoc>()? {
                entries.push(MaterialEntry {
                    name,
                    triggers: doc.patterns,
                    response: doc.response,
                });
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_map(MaterialsVisitor)
}

/// A compiled intent: the document entry plus its eagerly compiled patterns.
#[derive(Debug)]
pub struct Intent {
    /// Unique identifier.
    pub id: String,
    /// Raw pattern strings as authored.
    pub patterns: Vec<String>,
    /// Candidate response strings.
    pub responses: Vec<String>,
    /// Patterns compiled once, case-insensitively, from their accent-folded
    /// form so they can match the accent-free normalized question.
    regexes: Vec<Regex>,
    /// All raw patterns flattened into one lower-cased blob for keyword
    /// overlap; lower-cased only, accents preserved.
    pattern_text: String,
}

impl Intent {
    fn from_doc(doc: IntentDoc) -> Result<Self, EngineError> {
        let mut regexes = Vec::with_capacity(doc.patterns.len());
        for pattern in &doc.patterns {
            let compiled = RegexBuilder::new(&text::fold_accents(pattern))
                .case_insensitive(true)
                .build()
                .map_err(|source| EngineError::Pattern {
                    intent: doc.id.clone(),
                    pattern: pattern.clone(),
                    source,
                })?;
            regexes.push(compiled);
        }
        let pattern_text = doc.patterns.join(" ").to_lowercase();
        Ok(Self {
            id: doc.id,
            patterns: doc.patterns,
            responses: doc.responses,
            regexes,
            pattern_text,
        })
    }

    pub(crate) fn regexes(&self) -> &[Regex] {
        &self.regexes
    }

    pub(crate) fn pattern_text(&self) -> &str {
        &self.pattern_text
    }
}

/// The immutable, fully compiled knowledge base.
#[derive(Debug)]
pub struct KnowledgeBase {
    intents: Vec<Intent>,
    materials: Vec<MaterialEntry>,
    fallbacks: Vec<String>,
}

impl KnowledgeBase {
    /// Build a knowledge base from a JSON document string.
    ///
    /// Fails fast on invalid JSON, a missing required field, a schema
    /// violation or a pattern that does not compile.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let doc: KnowledgeBaseDoc = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Build a knowledge base from an already-parsed document.
    pub fn from_document(doc: KnowledgeBaseDoc) -> Result<Self, EngineError> {
        doc.validate()?;
        let intents = doc
            .intents
            .into_iter()
            .map(Intent::from_doc)
            .collect::<Result<Vec<_>, _>>()?;
        let kb = Self {
            intents,
            materials: doc.materials,
            fallbacks: doc.fallbacks,
        };
        info!(
            "knowledge base loaded: {} intents, {} materials, {} fallbacks",
            kb.intents.len(),
            kb.materials.len(),
            kb.fallbacks.len()
        );
        Ok(kb)
    }

    /// Iterate over the intents in document order.
    pub fn intents(&self) -> impl Iterator<Item = &Intent> {
        self.intents.iter()
    }

    /// Number of loaded intents.
    pub fn intent_count(&self) -> usize {
        self.intents.len()
    }

    /// Number of loaded material entries.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// The configured fallback phrases; validated non-empty at load time.
    pub fn fallbacks(&self) -> &[String] {
        &self.fallbacks
    }

    /// Detect material entries triggered by `question`.
    ///
    /// Triggers are matched whole-word and case-insensitively against the
    /// raw question; the first hit records the entry and skips its remaining
    /// triggers. Output follows document order. Detection takes precedence
    /// over intent scoring in the responder.
    pub fn detect_materials(&self, question: &str) -> Vec<&MaterialEntry> {
        let haystack = question.to_lowercase();
        let mut detected = Vec::new();
        for entry in &self.materials {
            let hit = entry
                .triggers
                .iter()
                .any(|trigger| text::contains_whole_word(&haystack, &trigger.to_lowercase()));
            if hit {
                debug!("material '{}' detected", entry.name);
                detected.push(entry);
            }
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb_from(json: &str) -> KnowledgeBase {
        KnowledgeBase::from_json_str(json).expect("valid knowledge base")
    }

    const SAMPLE: &str = r#"{
        "intencoes": [
            {
                "id": "horario",
                "padroes": ["horário", "que horas"],
                "respostas": ["Atendemos das 8h às 18h."]
            }
        ],
        "materiais": {
            "edital": {
                "padroes": ["edital"],
                "resposta": "O edital está na página do curso."
            },
            "cronograma": {
                "padroes": ["cronograma", "calendário"],
                "resposta": "O cronograma foi enviado por e-mail."
            }
        },
        "fallbacks": ["Desculpe, não entendi."]
    }"#;

    #[test]
    fn test_loads_sample_document() {
        let kb = kb_from(SAMPLE);
        assert_eq!(kb.intent_count(), 1);
        assert_eq!(kb.material_count(), 2);
        assert_eq!(kb.fallbacks().len(), 1);
    }

    #[test]
    fn test_materials_keep_document_order() {
        let kb = kb_from(SAMPLE);
        let names: Vec<&str> = kb.materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["edital", "cronograma"]);
    }

    #[test]
    fn test_missing_top_level_field_is_rejected() {
        let err = KnowledgeBase::from_json_str(r#"{"intencoes": [], "materiais": {}}"#)
            .expect_err("missing fallbacks must fail");
        assert!(matches!(err, EngineError::Parse(_)));
    }

    #[test]
    fn test_empty_fallback_list_is_rejected() {
        let json = r#"{"intencoes": [], "materiais": {}, "fallbacks": []}"#;
        let err = KnowledgeBase::from_json_str(json).expect_err("empty fallbacks must fail");
        assert!(matches!(err, EngineError::Validation(_)));
    }

    #[test]
    fn test_malformed_pattern_is_rejected_at_load() {
        let json = r#"{
            "intencoes": [{"id": "quebrada", "padroes": ["(aberto"], "respostas": []}],
            "materiais": {},
            "fallbacks": ["ok"]
        }"#;
        let err = KnowledgeBase::from_json_str(json).expect_err("bad regex must fail");
        match err {
            EngineError::Pattern { intent, pattern, .. } => {
                assert_eq!(intent, "quebrada");
                assert_eq!(pattern, "(aberto");
            }
            other => panic!("expected Pattern error, got {other:?}"),
        }
    }

    #[test]
    fn test_intent_lists_default_to_empty() {
        let json = r#"{
            "intencoes": [{"id": "vazia"}],
            "materiais": {},
            "fallbacks": ["ok"]
        }"#;
        let kb = kb_from(json);
        let intent = kb.intents().next().expect("one intent");
        assert!(intent.patterns.is_empty());
        assert!(intent.responses.is_empty());
    }

    #[test]
    fn test_detect_materials_is_whole_word_and_ordered() {
        let kb = kb_from(SAMPLE);

        // "editalzinho" must not trigger the whole-word match.
        assert!(kb.detect_materials("cadê o editalzinho").is_empty());

        let hits = kb.detect_materials("Preciso do cronograma e do edital!");
        let names: Vec<&str> = hits.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["edital", "cronograma"]);
    }

    #[test]
    fn test_detect_materials_short_circuits_per_entry() {
        let kb = kb_from(SAMPLE);
        // Both triggers of "cronograma" present; the entry appears once.
        let hits = kb.detect_materials("o cronograma ou o calendário?");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "cronograma");
    }
}
