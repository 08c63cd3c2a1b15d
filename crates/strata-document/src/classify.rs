//! Heading classification.
//!
//! Decides, one trimmed line at a time, whether a line opens a section. Three forms are
//! tested in a fixed priority order and the first match wins:
//!
//! 1. Markup headings: `#`..`######` followed by whitespace and text
//! 2. Numbered headings: `<integer>. <text>` (subject to [`NumberedHeadings`])
//! 3. Shout-case headings: short all-caps lines not ending in a period

use std::sync::LazyLock;

use regex::Regex;
use strata_config::{NumberedHeadings, StructureSettings};

/// Deepest heading level; deeper markup is clamped to this.
pub const MAX_LEVEL: u8 = 6;

/// Shout-case lines must be shorter than this many characters.
const SHOUT_CASE_MAX_CHARS: usize = 100;

/// A run of `#` markers, whitespace, then the title.
static MARKUP_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#+)\s+(\S.*)$").expect("markup heading regex is valid"));

/// An integer, a period, whitespace, then text.
static NUMBERED_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+\S").expect("numbered heading regex is valid"));

/// Which rule recognised a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingForm {
    /// `#`-prefixed markup.
    Markup,
    /// Ordinal-prefixed line.
    Numbered,
    /// All-caps line.
    ShoutCase,
}

/// A recognised heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    /// Nesting level, 1 to [`MAX_LEVEL`].
    pub level: u8,
    /// Title with marker syntax removed.
    pub title: String,
    /// Rule that matched.
    pub form: HeadingForm,
}

/// Stateless heading classifier parameterised by structure settings.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    /// Numbered line policy.
    numbered: NumberedHeadings,
    /// Whether shout-case lines are headings.
    shout_case: bool,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::new(&StructureSettings::default())
    }
}

impl HeadingClassifier {
    /// Creates a classifier for the given settings.
    pub fn new(settings: &StructureSettings) -> Self {
        Self {
            numbered: settings.numbered_headings,
            shout_case: settings.shout_case_headings,
        }
    }

    /// Numbered line policy in effect.
    pub fn numbered_policy(&self) -> NumberedHeadings {
        self.numbered
    }

    /// Classifies a single already-trimmed line.
    ///
    /// Numbered lines are never shout-case headings: under `Never` they are content, under
    /// `Leading` and `Always` they are reported as [`HeadingForm::Numbered`] and the caller
    /// decides whether to accept them.
    pub fn classify(&self, line: &str) -> Option<HeadingMatch> {
        if line.is_empty() {
            return None;
        }

        if let Some(caps) = MARKUP_HEADING.captures(line) {
            let markers = caps[1].len();
            let level = u8::try_from(markers).unwrap_or(MAX_LEVEL).clamp(1, MAX_LEVEL);
            return Some(HeadingMatch {
                level,
                title: caps[2].trim().to_string(),
                form: HeadingForm::Markup,
            });
        }

        if NUMBERED_HEADING.is_match(line) {
            return match self.numbered {
                NumberedHeadings::Never => None,
                NumberedHeadings::Leading | NumberedHeadings::Always => Some(HeadingMatch {
                    level: 1,
                    title: line.to_string(),
                    form: HeadingForm::Numbered,
                }),
            };
        }

        if self.shout_case && is_shout_case(line) {
            return Some(HeadingMatch {
                level: 1,
                title: line.to_string(),
                form: HeadingForm::ShoutCase,
            });
        }

        None
    }
}

/// Short, has at least one uppercase letter, no lowercase letters, no trailing period.
fn is_shout_case(line: &str) -> bool {
    line.chars().count() < SHOUT_CASE_MAX_CHARS
        && !line.ends_with('.')
        && line.chars().any(char::is_uppercase)
        && !line.chars().any(char::is_lowercase)
}
