//! Annotation records attached to a structured document.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::SectionId;

/// Reliability of an extracted annotation, ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Regex heuristics.
    Low,
    /// Single-term statistics or line-level pattern matches.
    Medium,
    /// Phrase-level analysis or structural (section title) signals.
    High,
}

impl Confidence {
    /// The lowercase label used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A keyword with the confidence of the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Keyword {
    /// The keyword as it first appears in the text.
    pub text: String,
    /// Confidence level.
    #[serde(rename = "confidence_level")]
    pub confidence: Confidence,
}

impl Keyword {
    /// Creates a keyword.
    pub fn new(text: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            text: text.into(),
            confidence,
        }
    }
}

/// A best practice or example pulled from the document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExtractionItem {
    /// The extracted text: a whole section body or a matched line with its context.
    pub text: String,
    /// Section the item came from, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_section_id: Option<SectionId>,
    /// Classification tags, e.g. `best_practice` plus the rule that fired.
    pub tags: Vec<String>,
    /// Confidence level.
    #[serde(rename = "confidence_level")]
    pub confidence: Confidence,
}

/// Document-level annotations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Analysis {
    /// Document keywords, strongest first.
    pub keywords: Vec<Keyword>,
    /// Extracted best practices: section-title matches, then line matches.
    pub best_practices: Vec<ExtractionItem>,
    /// Extracted examples: section-title matches, then line matches.
    pub examples: Vec<ExtractionItem>,
}
