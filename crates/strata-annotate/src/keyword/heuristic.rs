//! Regex keyword heuristics.
//!
//! The fallback every other backend degrades to. It never fails and needs no model: it
//! proposes capitalized spans (proper nouns, product names) and technical tokens such as
//! `utf8`, `http2` or `max_connections`, scored by how often they occur.

use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use strata_document::Confidence;

use super::{KeywordBackend, ScoredKeyword};
use crate::{AnnotateError, Stopwords};

/// Runs of capitalized words, e.g. `Kubernetes Operator Framework`.
static CAPITALIZED_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Z][a-zA-Z]+(?:[ \t]+[A-Z][a-zA-Z]+)+\b")
        .expect("capitalized span regex is valid")
});

/// Single capitalized words of four letters or more.
static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-zA-Z]{3,}\b").expect("capitalized word regex is valid"));

/// Letters followed by digits, or snake_case identifiers.
static TECHNICAL_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[a-zA-Z]+[0-9]+[a-zA-Z]*\b|\b[a-z]+(?:_[a-z0-9]+)+\b")
        .expect("technical token regex is valid")
});

/// Words inside a capitalized span.
static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+").expect("word regex is valid"));

/// Capitalized spans and technical tokens.
pub struct HeuristicBackend {
    /// Words trimmed from the ends of capitalized spans.
    stopwords: Stopwords,
}

impl HeuristicBackend {
    /// Creates the heuristic backend.
    pub fn new(stopwords: &Stopwords) -> Self {
        Self {
            stopwords: stopwords.clone(),
        }
    }

    /// Strips leading and trailing stopwords from a capitalized span.
    ///
    /// Sentence-initial words make spans like `The Borrow Checker`; the span is kept as
    /// `Borrow Checker`.
    fn trim_span<'t>(&self, span: &'t str) -> Option<&'t str> {
        let words: Vec<_> = WORD.find_iter(span).collect();
        let first = words.iter().find(|w| !self.stopwords.contains(w.as_str()))?;
        let last = words.iter().rev().find(|w| !self.stopwords.contains(w.as_str()))?;
        Some(&span[first.start()..last.end()])
    }
}

impl KeywordBackend for HeuristicBackend {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn extract(&self, text: &str) -> Result<Vec<ScoredKeyword>, AnnotateError> {
        // Keyed by exact text; the first confidence assigned to a term wins.
        let mut counts: HashMap<&str, (usize, Confidence)> = HashMap::new();

        for m in TECHNICAL_TOKEN.find_iter(text) {
            counts.entry(m.as_str()).or_insert((0, Confidence::Medium)).0 += 1;
        }
        for m in CAPITALIZED_SPAN.find_iter(text) {
            if let Some(span) = self.trim_span(m.as_str()) {
                counts.entry(span).or_insert((0, Confidence::Low)).0 += 1;
            }
        }
        for m in CAPITALIZED_WORD.find_iter(text) {
            counts.entry(m.as_str()).or_insert((0, Confidence::Low)).0 += 1;
        }

        Ok(counts
            .into_iter()
            .map(|(term, (count, confidence))| ScoredKeyword::new(term, count as f32, confidence))
            .collect())
    }
}
