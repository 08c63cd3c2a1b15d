//! Document structuring for strata.
//!
//! This crate turns extracted text into a hierarchical, addressable tree of sections:
//! - Format detection and text extraction (Markdown, text, PDF, DOCX, HTML)
//! - YAML frontmatter extraction (title, tags)
//! - Heading classification (markup, numbered, shout-case)
//! - Stack-based hierarchy construction with preamble retention
//! - Flat pre-order views and retrieval chunks with breadcrumbs
//!
//! Annotation records ([`Analysis`], [`Keyword`], [`ExtractionItem`]) are defined here so the
//! model is complete; the annotation pass itself lives in `strata-annotate`.

#![warn(missing_docs)]

mod analysis;
mod build;
mod chunks;
mod classify;
mod content;
mod document;
mod error;
mod extract;
mod format;
mod frontmatter;
mod markdown;
mod section;

pub use analysis::{Analysis, Confidence, ExtractionItem, Keyword};
pub use build::{HierarchyBuilder, TEXT_ORIGIN, build, structure};
pub use chunks::{IndexChunk, index_chunks};
pub use classify::{HeadingClassifier, HeadingForm, HeadingMatch, MAX_LEVEL};
pub use content::{ContentBuffer, attach};
pub use document::{CONVERTED_BY, Document, FORMAT_VERSION, Metadata};
pub use error::DocumentError;
pub use extract::{extract_bytes, extract_text};
pub use format::SourceFormat;
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use markdown::code_block_lines;
pub use section::{
    PreorderIter, Section, SectionId, SectionKind, find_section, flatten, visit_preorder_mut,
};
