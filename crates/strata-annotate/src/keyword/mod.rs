//! Keyword extraction.
//!
//! Three backends are available, selected by [`KeywordAlgorithm`]:
//!
//! - **RAKE**: key phrases from word co-occurrence. Phrases are high confidence.
//! - **TextRank**: graph-based ranking similar to PageRank. Medium confidence.
//! - **Heuristic**: capitalized spans and technical tokens. Low to medium confidence.
//!
//! [`KeywordExtractor`] wraps a backend with the shared post-processing: stopword and length
//! filtering, casing recovery, deterministic ranking, case-insensitive dedup and the cap. When
//! the backend fails or finds nothing in non-empty text, the extractor falls back to the
//! heuristic.

mod heuristic;
mod local;

use std::{cmp::Ordering, collections::HashSet};

pub use heuristic::HeuristicBackend;
pub use local::{RakeBackend, TextRankBackend};
use strata_config::{KeywordAlgorithm, KeywordSettings};
use strata_document::{Confidence, Keyword};
use tracing::{debug, warn};

use crate::{AnnotateError, Stopwords};

/// A keyword candidate with its backend score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKeyword {
    /// The candidate term.
    pub term: String,
    /// Backend score; higher is more relevant.
    pub score: f32,
    /// Confidence of the strategy that proposed this term.
    pub confidence: Confidence,
}

impl ScoredKeyword {
    /// Creates a scored keyword.
    pub fn new(term: impl Into<String>, score: f32, confidence: Confidence) -> Self {
        Self {
            term: term.into(),
            score,
            confidence,
        }
    }
}

/// A keyword extraction strategy.
pub trait KeywordBackend {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Proposes scored candidates for `text`, in any order.
    fn extract(&self, text: &str) -> Result<Vec<ScoredKeyword>, AnnotateError>;
}

/// Builds the backend for `algorithm`.
pub fn backend_for(
    algorithm: KeywordAlgorithm,
    stopwords: &Stopwords,
) -> Box<dyn KeywordBackend> {
    match algorithm {
        KeywordAlgorithm::Rake => Box::new(RakeBackend::new(stopwords)),
        KeywordAlgorithm::TextRank => Box::new(TextRankBackend::new(stopwords)),
        KeywordAlgorithm::Heuristic => Box::new(HeuristicBackend::new(stopwords)),
    }
}

/// Runs a keyword backend and turns its candidates into ranked [`Keyword`]s.
pub struct KeywordExtractor {
    /// Preferred backend.
    backend: Box<dyn KeywordBackend>,
    /// Backend used when the preferred one fails or comes back empty.
    fallback: HeuristicBackend,
    /// Stopword filter.
    stopwords: Stopwords,
    /// Minimum candidate length in characters.
    min_length: usize,
}

impl KeywordExtractor {
    /// Creates an extractor for the configured algorithm.
    pub fn new(settings: &KeywordSettings) -> Self {
        let stopwords = Stopwords::new();
        let backend = backend_for(settings.algorithm, &stopwords);
        Self::assemble(backend, stopwords, settings)
    }

    /// Creates an extractor around a custom backend.
    pub fn with_backend(backend: Box<dyn KeywordBackend>, settings: &KeywordSettings) -> Self {
        Self::assemble(backend, Stopwords::new(), settings)
    }

    /// Shared constructor.
    fn assemble(
        backend: Box<dyn KeywordBackend>,
        stopwords: Stopwords,
        settings: &KeywordSettings,
    ) -> Self {
        Self {
            backend,
            fallback: HeuristicBackend::new(&stopwords),
            stopwords,
            min_length: settings.min_length,
        }
    }

    /// Name of the preferred backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Extracts at most `limit` keywords from `text`, strongest first.
    pub fn extract(&self, text: &str, limit: usize) -> Vec<Keyword> {
        if text.trim().is_empty() || limit == 0 {
            return Vec::new();
        }
        let candidates = self.candidates(text);
        self.rank(text, candidates, limit)
    }

    /// Runs the preferred backend, degrading to the heuristic.
    fn candidates(&self, text: &str) -> Vec<ScoredKeyword> {
        match self.backend.extract(text) {
            Ok(candidates) if !candidates.is_empty() => return candidates,
            Ok(_) => warn!(
                backend = self.backend.name(),
                "keyword backend found nothing, using heuristic"
            ),
            Err(e) => warn!(
                backend = self.backend.name(),
                error = %e,
                "keyword backend failed, using heuristic"
            ),
        }
        self.fallback.extract(text).unwrap_or_default()
    }

    /// Filters, re-cases, sorts, dedups and caps candidates.
    fn rank(&self, text: &str, candidates: Vec<ScoredKeyword>, limit: usize) -> Vec<Keyword> {
        let mut kept: Vec<ScoredKeyword> = candidates
            .into_iter()
            .filter_map(|mut candidate| {
                let term = candidate.term.trim();
                if !self.is_candidate(term) {
                    debug!(term, "dropping keyword candidate");
                    return None;
                }
                candidate.term = recover_casing(text, term);
                Some(candidate)
            })
            .collect();

        kept.sort_by(|a, b| match b.score.total_cmp(&a.score) {
            Ordering::Equal => a.term.cmp(&b.term),
            other => other,
        });

        let mut seen = HashSet::new();
        kept.into_iter()
            .filter(|candidate| seen.insert(candidate.term.to_lowercase()))
            .take(limit)
            .map(|candidate| Keyword::new(candidate.term, candidate.confidence))
            .collect()
    }

    /// Returns true when `term` is long enough, has a letter and is not all stopwords.
    fn is_candidate(&self, term: &str) -> bool {
        term.chars().count() >= self.min_length
            && term.chars().any(char::is_alphabetic)
            && !self.stopwords.covers(term)
    }
}

/// Returns `term` with the casing of its first occurrence in `text`.
///
/// Matching is ASCII case-insensitive so byte offsets line up; a term that does not occur
/// verbatim (e.g. a phrase spanning a line break) is returned unchanged.
fn recover_casing(text: &str, term: &str) -> String {
    let haystack = text.to_ascii_lowercase();
    let needle = term.to_ascii_lowercase();
    haystack
        .find(&needle)
        .and_then(|start| text.get(start..start + needle.len()))
        .unwrap_or(term)
        .to_string()
}
