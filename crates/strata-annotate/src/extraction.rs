//! Best-practice and example extraction.
//!
//! Each rule runs two passes:
//!
//! 1. **Section pass**: sections whose title matches the rule's title vocabulary contribute
//!    their whole body as one high-confidence item tagged `section_based`.
//! 2. **Line pass**: raw-text lines matching the rule's phrase vocabulary contribute the line
//!    plus a window of surrounding lines as a medium-confidence item tagged
//!    `content_pattern`. Heading lines are skipped. The item is attributed to the section
//!    enclosing the matched line.
//!
//! Section items come first, then line items, each in document order.
//!
//! The categories are exclusive. The best-practice rule runs first and claims every section
//! whose title, and every line whose text, matches its vocabulary; the example rule skips
//! whatever was claimed, even if the claimed section or line produced no item.

use std::collections::HashSet;

use strata_config::ExtractionSettings;
use strata_document::{Confidence, ExtractionItem, Section, SectionId, SectionKind, flatten};
use tracing::debug;

use crate::TriggerVocabulary;

/// Tag for items produced by the best-practice rule.
pub const BEST_PRACTICE_TAG: &str = "best_practice";
/// Tag for items produced by the example rule.
pub const EXAMPLE_TAG: &str = "example";
/// Tag for items produced from a matching section title.
pub const SECTION_BASED_TAG: &str = "section_based";
/// Tag for items produced from a matching line.
pub const CONTENT_PATTERN_TAG: &str = "content_pattern";

/// Line-pass items longer than this are dropped.
const MAX_CONTEXT_CHARS: usize = 4_000;

/// One extraction rule: what to look for and how much context to keep.
#[derive(Debug, Clone)]
struct Rule {
    /// Tag naming what the rule extracts.
    kind: &'static str,
    /// Section title triggers.
    titles: TriggerVocabulary,
    /// Line triggers.
    phrases: TriggerVocabulary,
    /// Lines of context on each side of a matched line.
    window: usize,
}

/// Compiled best-practice and example rules.
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Best-practice rule.
    best_practice: Rule,
    /// Example rule.
    example: Rule,
}

impl ExtractionRules {
    /// Compiles the trigger vocabularies in `settings`.
    pub fn new(settings: &ExtractionSettings) -> Self {
        Self {
            best_practice: Rule {
                kind: BEST_PRACTICE_TAG,
                titles: TriggerVocabulary::new(&settings.best_practice_titles),
                phrases: TriggerVocabulary::new(&settings.best_practice_phrases),
                window: settings.best_practice_window,
            },
            example: Rule {
                kind: EXAMPLE_TAG,
                titles: TriggerVocabulary::new(&settings.example_titles),
                phrases: TriggerVocabulary::new(&settings.example_phrases),
                window: settings.example_window,
            },
        }
    }

    /// Runs both rules over `raw_text` and its section tree.
    pub fn extract(&self, raw_text: &str, roots: &[Section]) -> Extracted {
        let index = SectionIndex::new(roots);
        let mut claims = Claims::default();
        let best_practices = self
            .best_practice
            .extract(raw_text, &index, roots, &mut claims);
        let examples = self.example.extract(raw_text, &index, roots, &mut claims);
        Extracted {
            best_practices,
            examples,
        }
    }

    /// Extracts best practices from `raw_text` and its section tree.
    pub fn best_practices(&self, raw_text: &str, roots: &[Section]) -> Vec<ExtractionItem> {
        self.extract(raw_text, roots).best_practices
    }

    /// Extracts examples that are not already best practices.
    pub fn examples(&self, raw_text: &str, roots: &[Section]) -> Vec<ExtractionItem> {
        self.extract(raw_text, roots).examples
    }
}

/// Output of [`ExtractionRules::extract`].
#[derive(Debug, Clone, Default)]
pub struct Extracted {
    /// Best-practice items.
    pub best_practices: Vec<ExtractionItem>,
    /// Example items.
    pub examples: Vec<ExtractionItem>,
}

/// Sections and lines already matched by an earlier rule.
#[derive(Default)]
struct Claims {
    /// Claimed section ids.
    sections: HashSet<SectionId>,
    /// Claimed 0-based raw-text line indexes.
    lines: HashSet<usize>,
}

impl Rule {
    /// Runs the section pass then the line pass, skipping and extending `claims`.
    fn extract(
        &self,
        raw_text: &str,
        index: &SectionIndex,
        roots: &[Section],
        claims: &mut Claims,
    ) -> Vec<ExtractionItem> {
        let mut items = Items::default();
        self.section_pass(roots, claims, &mut items);
        self.line_pass(raw_text, index, claims, &mut items);
        items.into_vec()
    }

    /// Emits one item per unclaimed section whose title matches.
    fn section_pass(&self, roots: &[Section], claims: &mut Claims, items: &mut Items) {
        if self.titles.is_empty() {
            return;
        }
        for section in flatten(roots) {
            if section.kind != SectionKind::Heading
                || claims.sections.contains(&section.id)
                || !self.titles.is_match(&section.title)
            {
                continue;
            }
            claims.sections.insert(section.id.clone());
            let body = section.body();
            let body = body.trim();
            if body.is_empty() {
                debug!(section = %section.id, kind = self.kind, "matching section has no body");
                continue;
            }
            items.push(ExtractionItem {
                text: body.to_string(),
                source_section_id: Some(section.id.clone()),
                tags: vec![self.kind.to_string(), SECTION_BASED_TAG.to_string()],
                confidence: Confidence::High,
            });
        }
    }

    /// Emits one item per unclaimed matching line, with its context window.
    fn line_pass(
        &self,
        raw_text: &str,
        index: &SectionIndex,
        claims: &mut Claims,
        items: &mut Items,
    ) {
        if self.phrases.is_empty() {
            return;
        }
        let lines: Vec<&str> = raw_text.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            let line_no = i + 1;
            if line.trim().is_empty()
                || index.is_heading(line_no)
                || claims.lines.contains(&i)
                || !self.phrases.is_match(line)
            {
                continue;
            }
            claims.lines.insert(i);
            let start = i.saturating_sub(self.window);
            let end = (i + self.window + 1).min(lines.len());
            let context = lines[start..end]
                .iter()
                .map(|l| l.trim())
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            if context.chars().count() > MAX_CONTEXT_CHARS {
                debug!(line = line_no, kind = self.kind, "skipping over-long match context");
                continue;
            }
            items.push(ExtractionItem {
                text: context,
                source_section_id: index.enclosing(line_no).cloned(),
                tags: vec![self.kind.to_string(), CONTENT_PATTERN_TAG.to_string()],
                confidence: Confidence::Medium,
            });
        }
    }
}

/// Items collected by one rule, without exact duplicates.
#[derive(Default)]
struct Items {
    /// Items in insertion order.
    items: Vec<ExtractionItem>,
    /// Text and section of every item already kept.
    seen: HashSet<(String, Option<SectionId>)>,
}

impl Items {
    /// Adds `item` unless an identical one was already kept.
    fn push(&mut self, item: ExtractionItem) {
        let key = (item.text.clone(), item.source_section_id.clone());
        if self.seen.insert(key) {
            self.items.push(item);
        } else {
            debug!(text = %item.text, "dropping duplicate extraction");
        }
    }

    /// Returns the kept items.
    fn into_vec(self) -> Vec<ExtractionItem> {
        self.items
    }
}

/// Maps raw-text line numbers to sections.
struct SectionIndex {
    /// `(line, id)` for every section, sorted by line.
    starts: Vec<(usize, SectionId)>,
    /// Lines holding a heading.
    headings: HashSet<usize>,
}

impl SectionIndex {
    /// Indexes every section in `roots`.
    fn new(roots: &[Section]) -> Self {
        let sections = flatten(roots);
        let mut starts: Vec<(usize, SectionId)> =
            sections.iter().map(|s| (s.line, s.id.clone())).collect();
        starts.sort_by_key(|(line, _)| *line);
        let headings = sections
            .iter()
            .filter(|s| s.kind == SectionKind::Heading)
            .map(|s| s.line)
            .collect();
        Self { starts, headings }
    }

    /// Returns true if `line` is a heading line.
    fn is_heading(&self, line: usize) -> bool {
        self.headings.contains(&line)
    }

    /// Returns the section that starts closest before or at `line`.
    fn enclosing(&self, line: usize) -> Option<&SectionId> {
        let after = self.starts.partition_point(|(start, _)| *start <= line);
        after.checked_sub(1).map(|i| &self.starts[i].1)
    }
}

#[cfg(test)]
mod tests {
    use strata_config::StructureSettings;
    use strata_document::structure;

    use super::*;

    const GUIDE: &str = "\
# Deployment Guide
Intro text.

## Best Practices
Pin every dependency.
Rotate credentials quarterly.

## Examples
Run the installer twice.

## Operations
Restarts are cheap.
You should drain nodes first.
Upgrades follow.
";

    fn rules() -> ExtractionRules {
        ExtractionRules::new(&ExtractionSettings::default())
    }

    fn sections(text: &str) -> Vec<Section> {
        structure(text, &StructureSettings::default(), true, "<test>").unwrap()
    }

    fn id(n: usize) -> Option<SectionId> {
        Some(SectionId::new(n))
    }

    #[test]
    fn test_section_titles_yield_high_confidence_bodies() {
        let roots = sections(GUIDE);
        let practices = rules().best_practices(GUIDE, &roots);

        let first = &practices[0];
        assert_eq!(first.text, "Pin every dependency.\nRotate credentials quarterly.");
        assert_eq!(first.source_section_id, id(1));
        assert_eq!(first.tags, ["best_practice", "section_based"]);
        assert_eq!(first.confidence, Confidence::High);

        let examples = rules().examples(GUIDE, &roots);
        assert_eq!(examples[0].text, "Run the installer twice.");
        assert_eq!(examples[0].source_section_id, id(2));
        assert_eq!(examples[0].tags, ["example", "section_based"]);
    }

    #[test]
    fn test_line_matches_carry_context_window() {
        let roots = sections(GUIDE);
        let practices = rules().best_practices(GUIDE, &roots);

        let line_item = practices
            .iter()
            .find(|item| item.tags[1] == CONTENT_PATTERN_TAG)
            .unwrap();
        assert_eq!(
            line_item.text,
            "## Operations\nRestarts are cheap.\nYou should drain nodes first.\nUpgrades follow."
        );
        assert_eq!(line_item.source_section_id, id(3));
        assert_eq!(line_item.confidence, Confidence::Medium);
    }

    #[test]
    fn test_window_size_is_respected() {
        let text = "a\nb\nc\nd\nwe must test\ne\nf\ng\nh";
        let roots = sections(text);
        let mut settings = ExtractionSettings::default();
        settings.best_practice_window = 1;
        let practices = ExtractionRules::new(&settings).best_practices(text, &roots);
        assert_eq!(practices.len(), 1);
        assert_eq!(practices[0].text, "d\nwe must test\ne");
        assert_eq!(practices[0].source_section_id, id(0));
    }

    #[test]
    fn test_window_is_clamped_at_text_edges() {
        let text = "Always test.\nsecond\nthird\nfourth\nfifth";
        let practices = rules().best_practices(text, &sections(text));
        assert_eq!(practices[0].text, "Always test.\nsecond\nthird");
    }

    #[test]
    fn test_heading_lines_are_not_line_matches() {
        let text = "# You Should Read This\nplain words\n";
        let practices = rules().best_practices(text, &sections(text));
        assert!(practices.is_empty());
    }

    #[test]
    fn test_empty_matching_section_is_skipped() {
        let text = "# Examples\n## Setup\nInstall it.\n";
        let examples = rules().examples(text, &sections(text));
        assert!(examples.iter().all(|item| item.tags[1] != SECTION_BASED_TAG));
    }

    #[test]
    fn test_no_matches_yields_nothing() {
        let text = "# Notes\nplain words only\n";
        let roots = sections(text);
        assert!(rules().best_practices(text, &roots).is_empty());
        assert!(rules().examples(text, &roots).is_empty());
    }

    #[test]
    fn test_empty_vocabularies_disable_rules() {
        let settings = ExtractionSettings {
            best_practice_titles: Vec::new(),
            example_titles: Vec::new(),
            best_practice_phrases: Vec::new(),
            example_phrases: Vec::new(),
            ..ExtractionSettings::default()
        };
        let roots = sections(GUIDE);
        let rules = ExtractionRules::new(&settings);
        assert!(rules.best_practices(GUIDE, &roots).is_empty());
        assert!(rules.examples(GUIDE, &roots).is_empty());
    }

    #[test]
    fn test_identical_items_are_deduplicated() {
        let text = "x\nAlways test.\nx\n\nx\nAlways test.\nx";
        let mut settings = ExtractionSettings::default();
        settings.best_practice_window = 1;
        let practices = ExtractionRules::new(&settings).best_practices(text, &sections(text));
        assert_eq!(practices.len(), 1);
    }

    #[test]
    fn test_best_practice_claims_exclude_examples() {
        let text = "# Guide\nYou should pin versions, for example with a lockfile.\n\n## Best Practice Examples\nUse a lockfile.\n";
        let extracted = rules().extract(text, &sections(text));

        let kinds: Vec<_> = extracted
            .best_practices
            .iter()
            .map(|item| item.tags[1].as_str())
            .collect();
        assert_eq!(kinds, [SECTION_BASED_TAG, CONTENT_PATTERN_TAG]);
        assert_eq!(extracted.best_practices[0].text, "Use a lockfile.");
        assert!(extracted.examples.is_empty());
        assert!(rules().examples(text, &sections(text)).is_empty());
    }

    #[test]
    fn test_unclaimed_example_lines_still_match() {
        let text = "# Guide\nYou should pin versions.\nplain\nplain\nplain\nFor example, a lockfile.\n";
        let extracted = rules().extract(text, &sections(text));

        assert_eq!(extracted.best_practices.len(), 1);
        assert_eq!(extracted.examples.len(), 1);
        assert!(extracted.examples[0].text.ends_with("For example, a lockfile."));
    }

    #[test]
    fn test_index_encloses_preamble_lines() {
        let text = "intro that should count\n# Next\nbody";
        let practices = rules().best_practices(text, &sections(text));
        assert_eq!(practices[0].source_section_id, id(0));
    }
}
