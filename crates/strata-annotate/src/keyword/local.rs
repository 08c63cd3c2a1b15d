//! Statistical keyword backends.
//!
//! These backends rank terms within a single text using the `keyword_extraction` crate.
//! Their output is lowercased; the extractor restores document casing afterwards.

use keyword_extraction::{
    rake::{Rake, RakeParams},
    text_rank::{TextRank, TextRankParams},
};
use strata_document::Confidence;

use super::{KeywordBackend, ScoredKeyword};
use crate::{AnnotateError, Stopwords};

/// Extended punctuation list including box-drawing characters and other markdown artifacts.
///
/// The default punctuation in `keyword_extraction` only covers Latin/Germanic languages.
/// This list adds Unicode box-drawing characters commonly found in converted tables.
static PUNCTUATION: &[&str] = &[
    ".", ",", ":", ";", "!", "?", "(", ")", "[", "]", "{", "}", "\"", "'", "`", "-", "—", "–", "/",
    "\\", "|", "@", "#", "$", "%", "^", "&", "*", "+", "=", "<", ">", "~", "_", "•", "·", "›",
    "─", "│", "┌", "┐", "└", "┘", "├", "┤", "┬", "┴", "┼", "═", "║", "╔", "╗", "╚", "╝", "╠", "╣",
    "╦", "╩", "╬",
];

/// Longest phrase either backend will propose.
const PHRASE_LENGTH: usize = 3;

/// RAKE (Rapid Automatic Keyword Extraction) backend.
///
/// Scores phrases by word co-occurrence. Multi-word phrases are a stronger signal than the
/// single words RAKE falls back to, so they carry higher confidence.
pub struct RakeBackend {
    /// Stopwords that delimit candidate phrases.
    stopwords: Vec<String>,
}

impl RakeBackend {
    /// Creates a RAKE backend splitting phrases on `stopwords`.
    pub fn new(stopwords: &Stopwords) -> Self {
        Self {
            stopwords: stopwords.as_vec(),
        }
    }
}

impl KeywordBackend for RakeBackend {
    fn name(&self) -> &'static str {
        "rake"
    }

    fn extract(&self, text: &str) -> Result<Vec<ScoredKeyword>, AnnotateError> {
        let params =
            RakeParams::WithDefaultsAndPhraseLength(text, &self.stopwords, Some(PHRASE_LENGTH));
        let rake = Rake::new(params);

        Ok(rake
            .get_ranked_keyword_scores(usize::MAX)
            .into_iter()
            .map(|(term, score)| {
                let confidence = if term.split_whitespace().nth(1).is_some() {
                    Confidence::High
                } else {
                    Confidence::Medium
                };
                ScoredKeyword::new(term, score, confidence)
            })
            .collect())
    }
}

/// TextRank graph-based backend.
///
/// Ranks single words with a PageRank-style iteration over a co-occurrence graph.
pub struct TextRankBackend {
    /// Stopwords excluded from the graph.
    stopwords: Vec<String>,
    /// Punctuation characters that break co-occurrence windows.
    punctuation: Vec<String>,
}

/// Window size for the TextRank co-occurrence graph.
const WINDOW_SIZE: usize = 2;
/// Damping factor for the PageRank iteration.
const DAMPING_FACTOR: f32 = 0.85;
/// Convergence tolerance.
const TOLERANCE: f32 = 0.00005;

impl TextRankBackend {
    /// Creates a TextRank backend with `stopwords` and the extended punctuation list.
    pub fn new(stopwords: &Stopwords) -> Self {
        Self {
            stopwords: stopwords.as_vec(),
            punctuation: PUNCTUATION.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

impl KeywordBackend for TextRankBackend {
    fn name(&self) -> &'static str {
        "textrank"
    }

    fn extract(&self, text: &str) -> Result<Vec<ScoredKeyword>, AnnotateError> {
        let params = TextRankParams::All(
            text,
            &self.stopwords,
            Some(&self.punctuation),
            WINDOW_SIZE,
            DAMPING_FACTOR,
            TOLERANCE,
            Some(PHRASE_LENGTH),
        );
        let text_rank = TextRank::new(params);

        Ok(text_rank
            .get_ranked_word_scores(usize::MAX)
            .into_iter()
            .map(|(term, score)| ScoredKeyword::new(term, score, Confidence::Medium))
            .collect())
    }
}
