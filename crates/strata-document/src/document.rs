//! The document container and its metadata.

use std::path::Path;

use serde::{Deserialize, Serialize};
use strata_config::StructureSettings;
use tracing::debug;

use crate::{
    Analysis, DocumentError, Section, SectionId, SourceFormat,
    build::structure,
    chunks::{IndexChunk, index_chunks},
    extract::extract_text,
    frontmatter::parse_frontmatter,
    section::{PreorderIter, find_section, flatten},
};

/// Tool identifier recorded in every converted document.
pub const CONVERTED_BY: &str = concat!("strata ", env!("CARGO_PKG_VERSION"));

/// Version of the serialized document layout.
pub const FORMAT_VERSION: &str = "1.0";

/// Descriptive metadata for a converted document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Metadata {
    /// Frontmatter title, else the source file stem.
    pub title: String,
    /// Where the text came from (a path, or `<text>`).
    pub source: String,
    /// Format the text was extracted from.
    pub source_format: SourceFormat,
    /// Frontmatter tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Converting tool and version.
    pub converted_by: String,
    /// Serialized layout version.
    pub format_version: String,
}

impl Metadata {
    /// Creates metadata with the given title, source and format.
    pub fn new(
        title: impl Into<String>,
        source: impl Into<String>,
        source_format: SourceFormat,
    ) -> Self {
        Self {
            title: title.into(),
            source: source.into(),
            source_format,
            tags: Vec::new(),
            converted_by: CONVERTED_BY.to_string(),
            format_version: FORMAT_VERSION.to_string(),
        }
    }

    /// Creates metadata for a file, titled after its stem.
    pub fn for_path(path: &Path, source_format: SourceFormat) -> Self {
        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::new(title, path.display().to_string(), source_format)
    }
}

/// A structured document.
///
/// Built fresh for every input; nothing is cached or updated in place. Structuring the same
/// text twice yields identical sections.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Document {
    /// Descriptive metadata.
    pub metadata: Metadata,
    /// Text that was structured (frontmatter removed).
    pub raw_text: String,
    /// Root-level sections.
    pub sections: Vec<Section>,
    /// Annotations, once the annotation pass has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<Analysis>,
}

impl Document {
    /// Reads, extracts and structures a file.
    pub fn load(path: &Path, settings: &StructureSettings) -> Result<Self, DocumentError> {
        let format = SourceFormat::detect(path)?;
        let text = extract_text(path, format)?;
        Self::from_text(&text, Metadata::for_path(path, format), settings)
    }

    /// Structures already-extracted text.
    ///
    /// Markdown frontmatter is consumed into `metadata` (title, tags) and removed from
    /// `raw_text`. Empty or whitespace-only text is [`DocumentError::NoContent`].
    pub fn from_text(
        text: &str,
        mut metadata: Metadata,
        settings: &StructureSettings,
    ) -> Result<Self, DocumentError> {
        let mut body = text;
        if metadata.source_format == SourceFormat::Markdown {
            let (frontmatter, rest) = parse_frontmatter(text);
            if let Some(frontmatter) = frontmatter {
                if let Some(title) = frontmatter.title.filter(|t| !t.trim().is_empty()) {
                    metadata.title = title;
                }
                metadata.tags = frontmatter.tags;
            }
            body = rest;
        }

        let sections = structure(
            body,
            settings,
            metadata.source_format.is_markdown_like(),
            &metadata.source,
        )?;
        debug!(
            source = %metadata.source,
            roots = sections.len(),
            "structured document"
        );

        Ok(Self {
            metadata,
            raw_text: body.to_string(),
            sections,
            analysis: None,
        })
    }

    /// Flat pre-order view of all sections.
    pub fn flatten(&self) -> Vec<&Section> {
        flatten(&self.sections)
    }

    /// Pre-order iterator over all sections.
    pub fn iter_sections(&self) -> PreorderIter<'_> {
        PreorderIter::over(&self.sections)
    }

    /// Total number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(Section::section_count).sum()
    }

    /// Looks up a section by id.
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        find_section(&self.sections, id)
    }

    /// Per-section text chunks with breadcrumbs, for retrieval indexing.
    pub fn index_chunks(&self) -> Vec<IndexChunk> {
        index_chunks(&self.sections, &self.metadata.title)
    }
}
