//! Serializable projections of a [`Document`].
//!
//! The document model keeps raw text and sections side by side; on the wire they are grouped
//! under `content`:
//!
//! ```text
//! metadata: {...}
//! content:
//!   raw_text: ...
//!   sections: [...]
//! analysis: {...}        # only once annotated
//! ```
//!
//! The legacy projection lists every section in pre-order at the top level of `sections`
//! and gives each one a `subsections` alias of `children`, the shape older consumers read.

use serde::{Serialize, Serializer, ser::SerializeStruct};
use strata_document::{Analysis, Document, Metadata, Section, flatten};

/// A document as it is written to disk.
#[derive(Debug, Serialize)]
pub struct DocumentView<'a> {
    /// Document metadata.
    pub metadata: &'a Metadata,
    /// Raw text and sections.
    pub content: ContentView<'a>,
    /// Annotations, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<&'a Analysis>,
}

/// The `content` block of a [`DocumentView`].
#[derive(Debug, Serialize)]
pub struct ContentView<'a> {
    /// Structured text.
    pub raw_text: &'a str,
    /// Section tree or its legacy flattening.
    pub sections: SectionsView<'a>,
}

/// Section layout on the wire.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum SectionsView<'a> {
    /// Root sections, nested through `children`.
    Nested(&'a [Section]),
    /// Every section in pre-order, each with `children` and `subsections`.
    Legacy(Vec<LegacySection<'a>>),
}

impl<'a> DocumentView<'a> {
    /// Nested projection of `document`.
    pub fn new(document: &'a Document) -> Self {
        Self::build(document, SectionsView::Nested(&document.sections))
    }

    /// Legacy projection of `document`.
    pub fn legacy(document: &'a Document) -> Self {
        let sections = flatten(&document.sections)
            .into_iter()
            .map(LegacySection)
            .collect();
        Self::build(document, SectionsView::Legacy(sections))
    }

    /// Picks the projection from a flag.
    pub fn with_layout(document: &'a Document, legacy: bool) -> Self {
        if legacy {
            Self::legacy(document)
        } else {
            Self::new(document)
        }
    }

    /// Shared constructor.
    fn build(document: &'a Document, sections: SectionsView<'a>) -> Self {
        Self {
            metadata: &document.metadata,
            content: ContentView {
                raw_text: &document.raw_text,
                sections,
            },
            analysis: document.analysis.as_ref(),
        }
    }
}

/// A section serialized with both `children` and the `subsections` alias.
#[derive(Debug, Clone, Copy)]
pub struct LegacySection<'a>(pub &'a Section);

/// Children of a legacy section, themselves in legacy shape.
struct LegacyChildren<'a>(&'a [Section]);

impl Serialize for LegacyChildren<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(LegacySection))
    }
}

impl Serialize for LegacySection<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let section = self.0;
        let mut state = serializer.serialize_struct("Section", 9)?;
        state.serialize_field("id", &section.id)?;
        state.serialize_field("title", &section.title)?;
        state.serialize_field("level", &section.level)?;
        state.serialize_field("content", &section.content)?;
        state.serialize_field("children", &LegacyChildren(&section.children))?;
        state.serialize_field("subsections", &LegacyChildren(&section.children))?;
        state.serialize_field("keywords", &section.keywords)?;
        state.serialize_field("line", &section.line)?;
        state.serialize_field("kind", &section.kind)?;
        state.end()
    }
}
