//! YAML frontmatter for Markdown sources.
//!
//! Frontmatter is optional metadata at the start of a Markdown file, delimited by `---`
//! lines. It feeds the document metadata and is removed from the text that gets structured:
//!
//! ```markdown
//! ---
//! title: Deployment Guide
//! tags: [ops, kubernetes]
//! ---
//!
//! # Content starts here
//! ```

use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Metadata read from a frontmatter block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Frontmatter {
    /// Document title.
    pub title: Option<String>,
    /// Tags, written either as a YAML list or a comma-separated string.
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

/// Either accepted spelling of `tags`.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagsField {
    /// `tags: [a, b]`
    List(Vec<String>),
    /// `tags: a, b`
    Inline(String),
}

/// Normalises both tag spellings into a trimmed, non-empty list.
fn deserialize_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let tags = match Option::<TagsField>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(TagsField::List(list)) => list,
        Some(TagsField::Inline(inline)) => inline.split(',').map(str::to_string).collect(),
    };
    Ok(tags
        .into_iter()
        .map(|t| t.trim().trim_start_matches('#').to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

/// Splits a frontmatter block off the start of Markdown content.
///
/// Returns the parsed frontmatter (if present and valid) and the remaining body. Without a
/// well-formed block the original content comes back untouched (minus a byte-order mark).
///
/// A block must start on the first line, be closed by a `---` line, and contain valid YAML.
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let content = content.trim_start_matches('\u{feff}');

    let mut lines = content.split_inclusive('\n');
    let Some(opening) = lines.next() else {
        return (None, content);
    };
    if opening.trim_end() != "---" {
        return (None, content);
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    let mut closing = None;
    for line in lines {
        if line.trim_end() == "---" {
            closing = Some((offset, offset + line.len()));
            break;
        }
        offset += line.len();
    }
    let Some((yaml_end, body_start)) = closing else {
        return (None, content);
    };

    let yaml = &content[yaml_start..yaml_end];
    let parsed = if yaml.trim().is_empty() {
        Ok(Frontmatter::default())
    } else {
        serde_yaml::from_str::<Frontmatter>(yaml)
    };

    match parsed {
        Ok(frontmatter) => (Some(frontmatter), &content[body_start..]),
        Err(e) => {
            debug!(error = %e, "ignoring malformed frontmatter");
            (None, content)
        }
    }
}
