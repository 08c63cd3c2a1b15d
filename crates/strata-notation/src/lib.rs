//! Serialization of strata documents.
//!
//! Three projections of the same [`DocumentView`]:
//!
//! - **YAML** (`serde_yaml`): the default, readable by people and most tooling
//! - **JSON** (`serde_json`, pretty printed)
//! - **TOON**: compact token-oriented notation for prompts and knowledge bases
//!
//! Each can use the nested section layout or the legacy flattened layout. [`size_report`]
//! compares the encoded sizes. [`file_to_toon`] re-encodes a document that was already
//! written as YAML or JSON.

#![warn(missing_docs)]

mod error;
mod reencode;
pub mod toon;
mod view;

pub use error::NotationError;
pub use reencode::{SourceNotation, file_to_toon, reencode_toon, toon_path};
use strata_config::OutputFormat;
use strata_document::Document;
pub use view::{ContentView, DocumentView, LegacySection, SectionsView};

/// How a document is laid out when encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Use the flattened legacy section layout.
    pub legacy_sections: bool,
}

/// Encodes `document` as YAML.
pub fn to_yaml(document: &Document, options: RenderOptions) -> Result<String, NotationError> {
    let view = DocumentView::with_layout(document, options.legacy_sections);
    Ok(serde_yaml::to_string(&view)?)
}

/// Encodes `document` as pretty-printed JSON.
pub fn to_json(document: &Document, options: RenderOptions) -> Result<String, NotationError> {
    let view = DocumentView::with_layout(document, options.legacy_sections);
    let mut json = serde_json::to_string_pretty(&view)?;
    json.push('\n');
    Ok(json)
}

/// Encodes `document` as TOON.
pub fn to_toon(document: &Document, options: RenderOptions) -> Result<String, NotationError> {
    let view = DocumentView::with_layout(document, options.legacy_sections);
    let value = serde_json::to_value(&view)?;
    let mut toon = toon::encode(&value);
    toon.push('\n');
    Ok(toon)
}

/// Encodes `document` in `format`.
pub fn render(
    document: &Document,
    format: OutputFormat,
    options: RenderOptions,
) -> Result<String, NotationError> {
    match format {
        OutputFormat::Yaml => to_yaml(document, options),
        OutputFormat::Json => to_json(document, options),
        OutputFormat::Toon => to_toon(document, options),
    }
}

/// Encoded size of a document in one format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeReport {
    /// Output format.
    pub format: OutputFormat,
    /// Encoded size in bytes.
    pub bytes: usize,
    /// Rough token count: characters divided by four, rounded up.
    pub approx_tokens: usize,
}

impl SizeReport {
    /// Measures an encoded string.
    pub fn measure(format: OutputFormat, encoded: &str) -> Self {
        Self {
            format,
            bytes: encoded.len(),
            approx_tokens: encoded.chars().count().div_ceil(4),
        }
    }
}

/// Encodes `document` in every format and reports the sizes.
pub fn size_report(
    document: &Document,
    options: RenderOptions,
) -> Result<Vec<SizeReport>, NotationError> {
    OutputFormat::ALL
        .iter()
        .map(|&format| Ok(SizeReport::measure(format, &render(document, format, options)?)))
        .collect()
}
