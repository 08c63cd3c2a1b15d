//! Trigger phrase vocabularies.

use regex::Regex;
use tracing::warn;

/// A case-insensitive set of trigger phrases compiled into one regex.
///
/// A phrase must start on a word boundary but may run into a longer word, so `recommend`
/// matches "recommended" and `example` matches "Examples", while `must` does not match
/// "trust". Internal whitespace matches any run of whitespace.
#[derive(Debug, Clone)]
pub struct TriggerVocabulary {
    /// Alternation of all phrases; `None` when the vocabulary is empty.
    pattern: Option<Regex>,
}

impl TriggerVocabulary {
    /// Compiles `phrases`, ignoring blank entries.
    pub fn new(phrases: &[String]) -> Self {
        let mut alternatives: Vec<String> = phrases
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| phrase_pattern(p))
            .collect();
        if alternatives.is_empty() {
            return Self { pattern: None };
        }
        // Longest first, so overlapping phrases report the more specific match.
        alternatives.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        alternatives.dedup();

        let source = format!("(?i)(?:{})", alternatives.join("|"));
        match Regex::new(&source) {
            Ok(pattern) => Self {
                pattern: Some(pattern),
            },
            Err(e) => {
                warn!(error = %e, "trigger vocabulary did not compile, ignoring it");
                Self { pattern: None }
            }
        }
    }

    /// Returns true if any phrase occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }

    /// Returns true when no phrase can ever match.
    pub fn is_empty(&self) -> bool {
        self.pattern.is_none()
    }
}

/// Regex source for one phrase.
fn phrase_pattern(phrase: &str) -> String {
    let body = phrase
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    let starts_with_word = phrase
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_');
    if starts_with_word {
        format!(r"\b{body}")
    } else {
        body
    }
}
