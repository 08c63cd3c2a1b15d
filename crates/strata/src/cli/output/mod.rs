//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use strata_document::{Analysis, Document, ExtractionItem, Keyword, Metadata, Section};
use strata_highlight::{confidence, dim};
use strata_notation::SizeReport;

/// Characters of extracted text shown in a table cell.
const PREVIEW_CHARS: usize = 72;

/// One row of a section outline.
#[derive(Debug, Serialize)]
pub struct OutlineRow {
    /// Section identifier.
    pub id: String,
    /// Section title (empty for a preamble).
    pub title: String,
    /// Heading level.
    pub level: u8,
    /// Nesting depth in the tree, 0 for roots.
    pub depth: usize,
    /// 1-based source line.
    pub line: usize,
    /// Number of content lines owned directly by the section.
    pub content_lines: usize,
    /// Keywords attached to the section.
    pub keywords: Vec<String>,
}

/// Builds the pre-order outline of a section forest.
pub fn outline(roots: &[Section]) -> Vec<OutlineRow> {
    let mut rows = Vec::new();
    push_outline(roots, 0, &mut rows);
    rows
}

/// Appends `sections` and their descendants at `depth`.
fn push_outline(sections: &[Section], depth: usize, rows: &mut Vec<OutlineRow>) {
    for section in sections {
        rows.push(OutlineRow {
            id: section.id.to_string(),
            title: section.title.clone(),
            level: section.level,
            depth,
            line: section.line,
            content_lines: section.content.len(),
            keywords: section.keywords.iter().map(|k| k.text.clone()).collect(),
        });
        push_outline(&section.children, depth + 1, rows);
    }
}

/// Encoded size row for JSON output.
#[derive(Debug, Serialize)]
pub struct SizeRow {
    /// Format name.
    pub format: String,
    /// Encoded bytes.
    pub bytes: usize,
    /// Approximate token count.
    pub approx_tokens: usize,
}

impl From<&SizeReport> for SizeRow {
    fn from(report: &SizeReport) -> Self {
        Self {
            format: report.format.to_string(),
            bytes: report.bytes,
            approx_tokens: report.approx_tokens,
        }
    }
}

/// JSON output for `strata inspect --json`.
#[derive(Debug, Serialize)]
pub struct InspectSummary<'a> {
    /// Document metadata.
    pub metadata: &'a Metadata,
    /// Total number of sections.
    pub section_count: usize,
    /// Sections in pre-order.
    pub outline: Vec<OutlineRow>,
    /// Annotations, when the document was annotated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<&'a Analysis>,
    /// Encoded sizes per format.
    pub sizes: Vec<SizeRow>,
}

impl<'a> InspectSummary<'a> {
    /// Summarizes a converted document.
    pub fn new(document: &'a Document, sizes: &[SizeReport]) -> Self {
        Self {
            metadata: &document.metadata,
            section_count: document.section_count(),
            outline: outline(&document.sections),
            analysis: document.analysis.as_ref(),
            sizes: sizes.iter().map(SizeRow::from).collect(),
        }
    }
}

/// Prints a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Formats one outline row as an indented line.
pub fn outline_line(row: &OutlineRow) -> String {
    let indent = "  ".repeat(row.depth + 1);
    let title = if row.title.is_empty() {
        dim("(preamble)")
    } else {
        row.title.clone()
    };
    let detail = format!(
        "h{} line {} {} lines",
        row.level, row.line, row.content_lines
    );
    format!("{indent}{} {title} {}", dim(&row.id), dim(&detail))
}

/// Builds a keyword table.
pub fn keyword_table(keywords: &[Keyword]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Keyword", "Confidence"]);
    for keyword in keywords {
        table.add_row(vec![
            Cell::new(&keyword.text),
            Cell::new(confidence(keyword.confidence.as_str())),
        ]);
    }
    table
}

/// Builds a table of best practices or examples.
pub fn extraction_table(items: &[ExtractionItem]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Section", "Tags", "Confidence", "Text"]);
    for item in items {
        let section = item
            .source_section_id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(section),
            Cell::new(item.tags.join(", ")),
            Cell::new(confidence(item.confidence.as_str())),
            Cell::new(preview(&item.text, PREVIEW_CHARS)),
        ]);
    }
    table
}

/// Builds the encoded-size table.
pub fn size_table(sizes: &[SizeReport]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Format", "Bytes", "~Tokens"]);
    for report in sizes {
        table.add_row(vec![
            Cell::new(report.format.to_string()),
            Cell::new(report.bytes.to_string()),
            Cell::new(report.approx_tokens.to_string()),
        ]);
    }
    table
}

/// First line of `text`, cut to `max_chars` characters.
pub fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    let more = text.lines().nth(1).is_some();
    match first_line.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &first_line[..cut]),
        None if more => format!("{first_line} ..."),
        None => first_line.to_string(),
    }
}
