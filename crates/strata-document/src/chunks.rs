//! Flat retrieval view of a structured document.
//!
//! Retrieval indexing does not need the hierarchy, only each section's text plus where it
//! sits. Every section with content becomes one chunk carrying a breadcrumb of titles.

use serde::Serialize;

use crate::{Section, SectionId, SectionKind};

/// Separator between breadcrumb entries.
const BREADCRUMB_SEPARATOR: &str = " › ";

/// One section's text, ready for an indexer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexChunk {
    /// Section the text belongs to.
    pub section_id: SectionId,
    /// Section title (document title for the preamble).
    pub title: String,
    /// Path of titles from the document down to this section: `> Doc › Parent › Section`.
    pub breadcrumb: String,
    /// Section content joined with newlines.
    pub text: String,
}

/// Builds chunks for every section with content, in pre-order.
pub fn index_chunks(roots: &[Section], doc_title: &str) -> Vec<IndexChunk> {
    let mut chunks = Vec::new();
    let mut trail = Vec::new();
    for root in roots {
        collect(root, doc_title, &mut trail, &mut chunks);
    }
    chunks
}

/// Walks one subtree, keeping the titles of open ancestors in `trail`.
fn collect<'a>(
    section: &'a Section,
    doc_title: &str,
    trail: &mut Vec<&'a str>,
    out: &mut Vec<IndexChunk>,
) {
    let crumb = breadcrumb_title(section, doc_title);
    if let Some(title) = crumb {
        trail.push(title);
    }

    if !section.content.is_empty() {
        let mut parts = vec![doc_title];
        parts.extend(trail.iter().copied());
        let title = match section.kind {
            SectionKind::Preamble => doc_title.to_string(),
            SectionKind::Heading => section.title.clone(),
        };
        out.push(IndexChunk {
            section_id: section.id.clone(),
            title,
            breadcrumb: format!("> {}", parts.join(BREADCRUMB_SEPARATOR)),
            text: section.body(),
        });
    }

    for child in &section.children {
        collect(child, doc_title, trail, out);
    }

    if crumb.is_some() {
        trail.pop();
    }
}

/// Title a section contributes to breadcrumbs, if any.
///
/// The preamble contributes nothing, and a top-level heading repeating the document title
/// is skipped to avoid `> Guide › Guide`.
fn breadcrumb_title<'a>(section: &'a Section, doc_title: &str) -> Option<&'a str> {
    match section.kind {
        SectionKind::Preamble => None,
        SectionKind::Heading if section.level == 1 && section.title == doc_title => None,
        SectionKind::Heading => Some(section.title.as_str()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HeadingClassifier, build};

    fn forest(lines: &[&str]) -> Vec<Section> {
        build(lines.iter().copied(), &HeadingClassifier::default())
    }

    #[test]
    fn test_breadcrumbs_follow_nesting() {
        let roots = forest(&["# Install", "a", "## Linux", "b", "### Debian", "c", "# Use", "d"]);

        let chunks = index_chunks(&roots, "Guide");
        let crumbs: Vec<_> = chunks.iter().map(|c| c.breadcrumb.as_str()).collect();

        assert_eq!(
            crumbs,
            vec![
                "> Guide › Install",
                "> Guide › Install › Linux",
                "> Guide › Install › Linux › Debian",
                "> Guide › Use",
            ]
        );
        assert_eq!(chunks[2].text, "c");
    }

    #[test]
    fn test_sections_without_content_are_skipped() {
        let roots = forest(&["# A", "## B", "text"]);

        let chunks = index_chunks(&roots, "Doc");

        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].title, "B");
        assert_eq!(chunks[0].section_id, SectionId::new(1));
    }

    #[test]
    fn test_preamble_uses_document_title() {
        let roots = forest(&["intro", "", "more", "# A", "x"]);

        let chunks = index_chunks(&roots, "Doc");

        assert_eq!(chunks[0].title, "Doc");
        assert_eq!(chunks[0].breadcrumb, "> Doc");
        assert_eq!(chunks[0].text, "intro\n\nmore");
        assert_eq!(chunks[1].breadcrumb, "> Doc › A");
    }

    #[test]
    fn test_h1_matching_doc_title_is_not_repeated() {
        let roots = forest(&["# Guide", "welcome", "## Setup", "steps"]);

        let chunks = index_chunks(&roots, "Guide");

        assert_eq!(chunks[0].breadcrumb, "> Guide");
        assert_eq!(chunks[1].breadcrumb, "> Guide › Setup");
    }
}
