//! Hierarchical section structures.
//!
//! A document is a forest of sections. Each section owns the content lines that belong
//! directly to it and its child sections in document order. Parent links are implicit in
//! the nesting; there are no back-references.

use std::{fmt, slice};

use serde::{Deserialize, Serialize};

use crate::Keyword;

/// Stable identifier of a section within its document: `section_<n>`.
///
/// Numbers are handed out in the order sections are first encountered scanning the text
/// top to bottom, starting at zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Creates the identifier for the `n`th discovered section.
    pub fn new(n: usize) -> Self {
        Self(format!("section_{n}"))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Distinguishes sections opened by a heading from the synthetic leading section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Opened by a heading line.
    Heading,
    /// Holds content that appeared before the first heading.
    Preamble,
}

/// A node in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Section {
    /// Identifier assigned at creation.
    pub id: SectionId,
    /// Heading text with marker syntax removed; empty for the preamble.
    pub title: String,
    /// Nesting depth, 1 for top level. Always greater than the parent's level.
    pub level: u8,
    /// Lines belonging directly to this section, blank-trimmed at both ends.
    pub content: Vec<String>,
    /// Immediate child sections in document order.
    pub children: Vec<Self>,
    /// Keywords scoped to this section, filled by annotation.
    #[serde(default)]
    pub keywords: Vec<Keyword>,
    /// 1-based line of the heading (or of the first content line for a preamble).
    pub line: usize,
    /// How the section was opened.
    pub kind: SectionKind,
}

impl Section {
    /// Creates a section opened by a heading.
    pub fn heading(id: SectionId, level: u8, title: impl Into<String>, line: usize) -> Self {
        Self {
            id,
            title: title.into(),
            level,
            content: Vec::new(),
            children: Vec::new(),
            keywords: Vec::new(),
            line,
            kind: SectionKind::Heading,
        }
    }

    /// Creates the synthetic section for content preceding the first heading.
    pub fn preamble(id: SectionId, line: usize) -> Self {
        Self {
            kind: SectionKind::Preamble,
            ..Self::heading(id, 1, String::new(), line)
        }
    }

    /// Returns an iterator over this section and all descendants in pre-order.
    pub fn iter_preorder(&self) -> PreorderIter<'_> {
        PreorderIter { stack: vec![self] }
    }

    /// Returns the total number of sections in this subtree (including self).
    pub fn section_count(&self) -> usize {
        1 + self.children.iter().map(Self::section_count).sum::<usize>()
    }

    /// Returns true if this section has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The content lines joined with newlines.
    pub fn body(&self) -> String {
        self.content.join("\n")
    }
}

/// Iterator for pre-order traversal of sections.
pub struct PreorderIter<'a> {
    /// Stack of sections to visit (rightmost children pushed first).
    stack: Vec<&'a Section>,
}

impl<'a> PreorderIter<'a> {
    /// Starts a traversal over a list of sibling roots.
    pub fn over(roots: &'a [Section]) -> Self {
        Self {
            stack: roots.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = &'a Section;

    fn next(&mut self) -> Option<Self::Item> {
        let section = self.stack.pop()?;
        // Push children in reverse order so leftmost child is processed first
        self.stack.extend(section.children.iter().rev());
        Some(section)
    }
}

/// Produces the flat pre-order view of a section forest.
///
/// Each entry is a reference into the tree, so its `children` remain attached. The first
/// entry is always the first root.
pub fn flatten(roots: &[Section]) -> Vec<&Section> {
    PreorderIter::over(roots).collect()
}

/// Visits every section in pre-order with mutable access.
pub fn visit_preorder_mut(roots: &mut [Section], mut visit: impl FnMut(&mut Section)) {
    let mut stack: Vec<slice::IterMut<'_, Section>> = vec![roots.iter_mut()];
    while let Some(siblings) = stack.last_mut() {
        match siblings.next() {
            Some(section) => {
                visit(section);
                stack.push(section.children.iter_mut());
            }
            None => {
                stack.pop();
            }
        }
    }
}

/// Finds a section anywhere in a forest by id.
pub fn find_section<'a>(roots: &'a [Section], id: &SectionId) -> Option<&'a Section> {
    PreorderIter::over(roots).find(|s| &s.id == id)
}

#[cfg(test)]
mod tests {
    use std::ptr;

    use super::*;

    /// `A(B(C), D)`, `E`
    fn sample_forest() -> Vec<Section> {
        let mut a = Section::heading(SectionId::new(0), 1, "A", 1);
        let mut b = Section::heading(SectionId::new(1), 2, "B", 2);
        b.children.push(Section::heading(SectionId::new(2), 3, "C", 3));
        a.children.push(b);
        a.children.push(Section::heading(SectionId::new(3), 2, "D", 4));
        vec![a, Section::heading(SectionId::new(4), 1, "E", 5)]
    }

    fn titles(sections: &[&Section]) -> Vec<String> {
        sections.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_section_id_format() {
        assert_eq!(SectionId::new(0).as_str(), "section_0");
        assert_eq!(SectionId::new(12).to_string(), "section_12");
    }

    #[test]
    fn test_flatten_preorder() {
        let forest = sample_forest();
        let flat = flatten(&forest);
        assert_eq!(titles(&flat), vec!["A", "B", "C", "D", "E"]);
    }

    #[test]
    fn test_flatten_keeps_children_attached() {
        let forest = sample_forest();
        let flat = flatten(&forest);
        assert_eq!(flat[0].children.len(), 2);
        assert_eq!(flat[1].children[0].title, "C");
        assert!(ptr::eq(flat[0], &forest[0]));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten(&[]).is_empty());
    }

    #[test]
    fn test_section_iter_preorder_is_subtree_only() {
        let forest = sample_forest();
        let order: Vec<_> = forest[0].iter_preorder().map(|s| s.title.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
        assert_eq!(forest[0].section_count(), 4);
    }

    #[test]
    fn test_visit_preorder_mut_order() {
        let mut forest = sample_forest();
        let mut seen = Vec::new();
        visit_preorder_mut(&mut forest, |s| {
            seen.push(s.title.clone());
            s.content.push(format!("visited {}", s.title));
        });
        assert_eq!(seen, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(forest[0].children[0].children[0].content, vec!["visited C"]);
    }

    #[test]
    fn test_find_section() {
        let forest = sample_forest();
        let found = find_section(&forest, &SectionId::new(3)).unwrap();
        assert_eq!(found.title, "D");
        assert!(find_section(&forest, &SectionId::new(99)).is_none());
    }

    #[test]
    fn test_preamble_shape() {
        let preamble = Section::preamble(SectionId::new(0), 3);
        assert_eq!(preamble.kind, SectionKind::Preamble);
        assert_eq!(preamble.level, 1);
        assert!(preamble.title.is_empty());
        assert_eq!(preamble.line, 3);
    }
}
