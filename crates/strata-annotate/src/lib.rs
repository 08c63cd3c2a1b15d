//! Annotation pass for structured documents.
//!
//! The [`Annotator`] runs two independent sub-passes over a structured document:
//!
//! 1. **Keywords**: document-level keywords from the raw text, and section-level keywords
//!    from each section's own title and content.
//! 2. **Extraction**: best practices and examples, found through section titles and through
//!    advisory or illustrative lines.
//!
//! Annotation never changes section structure. It writes `keywords` on each section
//! (replacing whatever was there) and returns a fresh [`Analysis`], so running it twice
//! gives the same result. Keyword backend failures degrade to the regex heuristic and are
//! logged, never returned.
//!
//! ## Keyword Extraction Algorithms
//!
//! - **RAKE** (default): phrase co-occurrence analysis
//! - **TextRank**: graph-based ranking similar to PageRank
//! - **Heuristic**: capitalized spans and technical tokens

#![warn(missing_docs)]

mod error;
mod extraction;
pub mod keyword;
mod stopwords;
mod vocabulary;

pub use error::AnnotateError;
pub use extraction::{
    BEST_PRACTICE_TAG, CONTENT_PATTERN_TAG, EXAMPLE_TAG, Extracted, ExtractionRules,
    SECTION_BASED_TAG,
};
pub use keyword::{KeywordBackend, KeywordExtractor, ScoredKeyword};
pub use stopwords::Stopwords;
use strata_config::{Config, ExtractionSettings, KeywordSettings};
use strata_document::{Analysis, Document, Section, visit_preorder_mut};
use tracing::debug;
pub use vocabulary::TriggerVocabulary;

/// Keyword extraction and best-practice/example rules, ready to run on many documents.
pub struct Annotator {
    /// Keyword extractor.
    keywords: KeywordExtractor,
    /// Extraction rules.
    rules: ExtractionRules,
    /// Document keyword cap.
    max_keywords: usize,
    /// Per-section keyword cap.
    max_section_keywords: usize,
}

impl Annotator {
    /// Builds an annotator from keyword and extraction settings.
    pub fn new(keywords: &KeywordSettings, extraction: &ExtractionSettings) -> Self {
        Self::with_extractor(KeywordExtractor::new(keywords), keywords, extraction)
    }

    /// Builds an annotator from a merged configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.keywords, &config.extraction)
    }

    /// Builds an annotator around a custom keyword extractor.
    pub fn with_extractor(
        extractor: KeywordExtractor,
        keywords: &KeywordSettings,
        extraction: &ExtractionSettings,
    ) -> Self {
        Self {
            keywords: extractor,
            rules: ExtractionRules::new(extraction),
            max_keywords: keywords.max_keywords,
            max_section_keywords: keywords.max_section_keywords,
        }
    }

    /// Annotates `sections` (structured from `raw_text`) and returns the document analysis.
    pub fn annotate(&self, raw_text: &str, sections: &mut [Section]) -> Analysis {
        visit_preorder_mut(sections, |section| {
            let text = section_text(section);
            section.keywords = self.keywords.extract(&text, self.max_section_keywords);
        });

        let extracted = self.rules.extract(raw_text, sections);
        let analysis = Analysis {
            keywords: self.keywords.extract(raw_text, self.max_keywords),
            best_practices: extracted.best_practices,
            examples: extracted.examples,
        };
        debug!(
            backend = self.keywords.backend_name(),
            keywords = analysis.keywords.len(),
            best_practices = analysis.best_practices.len(),
            examples = analysis.examples.len(),
            "annotated document"
        );
        analysis
    }

    /// Annotates a document in place, replacing any previous analysis.
    pub fn annotate_document(&self, document: &mut Document) {
        let analysis = self.annotate(&document.raw_text, &mut document.sections);
        document.analysis = Some(analysis);
    }
}

/// Annotates `sections` with freshly built rules from `keywords` and `extraction`.
pub fn annotate(
    raw_text: &str,
    sections: &mut [Section],
    keywords: &KeywordSettings,
    extraction: &ExtractionSettings,
) -> Analysis {
    Annotator::new(keywords, extraction).annotate(raw_text, sections)
}

/// Title and content of one section, without its children.
fn section_text(section: &Section) -> String {
    if section.title.is_empty() {
        section.body()
    } else {
        format!("{}\n{}", section.title, section.body())
    }
}

#[cfg(test)]
mod tests {
    use strata_config::{KeywordAlgorithm, StructureSettings};
    use strata_document::{Confidence, Metadata, SourceFormat, flatten};

    use super::*;

    const GUIDE: &str = "\
# Kubernetes Deployment
Kubernetes runs containers across a cluster of machines.

## Best Practices
Pin container image versions.
You should always set resource limits.

## Examples
For example, deploy the Nginx Ingress controller with Helm.
";

    fn document(text: &str) -> Document {
        Document::from_text(
            text,
            Metadata::new("guide", "guide.md", SourceFormat::Markdown),
            &StructureSettings::default(),
        )
        .unwrap()
    }

    fn heuristic_settings() -> KeywordSettings {
        KeywordSettings {
            algorithm: KeywordAlgorithm::Heuristic,
            ..KeywordSettings::default()
        }
    }

    #[test]
    fn test_annotate_fills_analysis_and_section_keywords() {
        let mut doc = document(GUIDE);
        let annotator = Annotator::new(&KeywordSettings::default(), &ExtractionSettings::default());
        annotator.annotate_document(&mut doc);

        let analysis = doc.analysis.as_ref().unwrap();
        assert!(!analysis.keywords.is_empty());
        assert!(analysis.keywords.len() <= 50);
        assert!(!analysis.best_practices.is_empty());
        assert!(!analysis.examples.is_empty());

        let best = &analysis.best_practices[0];
        assert_eq!(best.confidence, Confidence::High);
        assert_eq!(best.tags, [BEST_PRACTICE_TAG, SECTION_BASED_TAG]);

        assert!(doc.iter_sections().any(|s| !s.keywords.is_empty()));
    }

    #[test]
    fn test_annotate_is_idempotent() {
        let mut doc = document(GUIDE);
        let annotator = Annotator::new(&KeywordSettings::default(), &ExtractionSettings::default());

        annotator.annotate_document(&mut doc);
        let first = doc.clone();
        annotator.annotate_document(&mut doc);

        assert_eq!(doc, first);
    }

    #[test]
    fn test_annotate_does_not_touch_structure() {
        let mut doc = document(GUIDE);
        let before: Vec<_> = doc
            .iter_sections()
            .map(|s| (s.id.clone(), s.level, s.content.clone(), s.children.len()))
            .collect();

        Annotator::from_config(&Config::default()).annotate_document(&mut doc);

        let after: Vec<_> = doc
            .iter_sections()
            .map(|s| (s.id.clone(), s.level, s.content.clone(), s.children.len()))
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_section_keywords_are_capped() {
        let mut doc = document(GUIDE);
        let settings = KeywordSettings {
            max_section_keywords: 1,
            ..heuristic_settings()
        };
        Annotator::new(&settings, &ExtractionSettings::default()).annotate_document(&mut doc);
        assert!(doc.iter_sections().all(|s| s.keywords.len() <= 1));
    }

    #[test]
    fn test_section_keywords_come_from_the_section() {
        let mut doc = document(GUIDE);
        Annotator::new(&heuristic_settings(), &ExtractionSettings::default())
            .annotate_document(&mut doc);

        let sections = flatten(&doc.sections);
        let examples = sections.iter().find(|s| s.title == "Examples").unwrap();
        let texts: Vec<_> = examples.keywords.iter().map(|k| k.text.as_str()).collect();
        assert!(texts.contains(&"Nginx Ingress"));
        assert!(!texts.contains(&"Kubernetes"));
    }

    #[test]
    fn test_heuristic_document_keywords() {
        let mut doc = document(GUIDE);
        Annotator::new(&heuristic_settings(), &ExtractionSettings::default())
            .annotate_document(&mut doc);
        let analysis = doc.analysis.unwrap();
        let kube = analysis
            .keywords
            .iter()
            .find(|k| k.text == "Kubernetes")
            .unwrap();
        assert_eq!(kube.confidence, Confidence::Low);
        assert_eq!(analysis.keywords[0].text, "Kubernetes");
    }

    #[test]
    fn test_free_function_matches_annotator() {
        let mut doc = document(GUIDE);
        let mut sections = doc.sections.clone();
        let analysis = annotate(
            &doc.raw_text,
            &mut sections,
            &KeywordSettings::default(),
            &ExtractionSettings::default(),
        );
        Annotator::new(&KeywordSettings::default(), &ExtractionSettings::default())
            .annotate_document(&mut doc);
        assert_eq!(Some(analysis), doc.analysis);
        assert_eq!(sections, doc.sections);
    }

    #[test]
    fn test_line_item_points_at_enclosing_section() {
        let mut doc = document(GUIDE);
        Annotator::from_config(&Config::default()).annotate_document(&mut doc);
        let analysis = doc.analysis.unwrap();
        let line_item = analysis
            .examples
            .iter()
            .find(|item| item.tags[1] == CONTENT_PATTERN_TAG)
            .unwrap();
        let source = line_item.source_section_id.as_ref().unwrap();
        assert_eq!(doc.sections[0].children[1].id, *source);
    }
}
