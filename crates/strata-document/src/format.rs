//! Source format detection.

use std::{fmt, path::Path};

use serde::{Deserialize, Serialize};

use crate::DocumentError;

/// Formats a document can be converted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Portable Document Format.
    Pdf,
    /// Markdown with optional YAML frontmatter.
    Markdown,
    /// Plain UTF-8 text.
    Text,
    /// Office Open XML word processing document.
    Docx,
    /// HTML page.
    Html,
}

impl SourceFormat {
    /// Detects the format from a path's extension (case-insensitive).
    pub fn detect(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("pdf") => Ok(Self::Pdf),
            Some("md" | "markdown") => Ok(Self::Markdown),
            Some("txt") => Ok(Self::Text),
            Some("docx") => Ok(Self::Docx),
            Some("html" | "htm") => Ok(Self::Html),
            _ => Err(DocumentError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Whether `#` headings and fenced code are meaningful in the extracted text.
    pub fn is_markdown_like(&self) -> bool {
        matches!(self, Self::Markdown | Self::Html)
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pdf => "pdf",
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Docx => "docx",
            Self::Html => "html",
        };
        f.write_str(name)
    }
}
