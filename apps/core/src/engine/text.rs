//! Text normalization and tokenization.
//!
//! Canonicalizes raw text into a lower-case, accent-free alphabet and splits
//! it into words and sentences. Word tokenization operates on normalized
//! text only; sentence splitting works on the original text so casing and
//! punctuation survive for display.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters that terminate a sentence.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

/// Strip accents: canonical decomposition with combining marks removed.
///
/// `horário` becomes `horario`, `ação` becomes `acao`.
pub fn fold_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Normalize raw text: lower-case, strip accents, keep only
/// `[a-z0-9 .,?!]`, collapse whitespace runs to a single space.
///
/// The collapse step also trims, so repeated application is a fixed point.
/// Empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let folded = fold_accents(lowered.trim());
    let replaced: String = folded
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, ' ' | '.' | ',' | '?' | '!')
            {
                c
            } else {
                ' '
            }
        })
        .collect();
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Iterate over the maximal `[a-z0-9]+` runs of normalized text.
///
/// Lazy and restartable; call again to walk the words a second time.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// Split raw text into sentences on `.`, `?` or `!` followed by whitespace.
///
/// Pieces are trimmed and empty ones dropped; original casing and
/// punctuation are preserved. Text without a terminator is one sentence.
pub fn sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if SENTENCE_TERMINATORS.contains(&c) {
            if let Some(&(next_idx, next)) = chars.peek() {
                if next.is_whitespace() {
                    let piece = text[start..next_idx].trim();
                    if !piece.is_empty() {
                        out.push(piece);
                    }
                    start = next_idx;
                }
            }
        }
    }
    let tail = text[start..].trim();
    if !tail.is_empty() {
        out.push(tail);
    }
    out
}

/// Whole-word substring search: `needle` must occur in `haystack` with no
/// word character (alphanumeric or `_`) directly adjacent on either side.
pub fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    for (idx, matched) in haystack.match_indices(needle) {
        let before = haystack[..idx].chars().next_back();
        let after = haystack[idx + matched.len()..].chars().next();
        if !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char) {
            return true;
        }
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents_and_case() {
        assert_eq!(normalize("Qual é o Horário?"), "qual e o horario?");
        assert_eq!(normalize("Ação, reação!"), "acao, reacao!");
    }

    #[test]
    fn test_normalize_replaces_symbols_and_collapses() {
        assert_eq!(normalize("ola   @#$ mundo"), "ola mundo");
        assert_eq!(normalize("  tab\tand\nnewline  "), "tab and newline");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = ["Qual é o horário?", "¿Qué?", "  A  B  ", "", "número 42!"];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_words_extracts_alphanumeric_runs() {
        let norm = normalize("Bom dia, turma 101!");
        let words: Vec<&str> = words(&norm).collect();
        assert_eq!(words, vec!["bom", "dia", "turma", "101"]);
    }

    #[test]
    fn test_words_is_restartable() {
        let text = "um dois tres";
        assert_eq!(words(text).count(), 3);
        assert_eq!(words(text).count(), 3);
    }

    #[test]
    fn test_sentences_split_and_trim() {
        let sents = sentences("Primeira frase. Segunda frase? Terceira!");
        assert_eq!(sents, vec!["Primeira frase.", "Segunda frase?", "Terceira!"]);
    }

    #[test]
    fn test_sentences_without_terminator() {
        assert_eq!(sentences("sem pontuacao final"), vec!["sem pontuacao final"]);
    }

    #[test]
    fn test_sentences_terminator_needs_whitespace() {
        // "3.5" must not split: the dot is not followed by whitespace.
        let sents = sentences("A nota foi 3.5 na prova. Depois subiu.");
        assert_eq!(sents, vec!["A nota foi 3.5 na prova.", "Depois subiu."]);
    }

    #[test]
    fn test_contains_whole_word() {
        assert!(contains_whole_word("qual o horario de hoje", "horario"));
        assert!(!contains_whole_word("os horarios de hoje", "horario"));
        assert!(contains_whole_word("horario atendimento extra", "horario atendimento"));
        assert!(!contains_whole_word("qualquer coisa", ""));
    }
}
