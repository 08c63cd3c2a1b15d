//! Text extraction from source files.
//!
//! Each supported format is reduced to plain UTF-8 text with one logical line per
//! paragraph, ready for structuring. Binary formats go through their reader crates;
//! Markdown and plain text are read as-is.

use std::{
    fs,
    io::{Cursor, Read},
    path::Path,
};

use quick_xml::{Reader, events::Event};
use tracing::debug;

use crate::{DocumentError, SourceFormat};

/// Maximum decompressed bytes read from a single ZIP entry.
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Line width handed to the HTML renderer; wide enough that paragraphs are not wrapped.
const HTML_RENDER_WIDTH: usize = 10_000;

/// Reads a file and extracts its text according to `format`.
pub fn extract_text(path: &Path, format: SourceFormat) -> Result<String, DocumentError> {
    let bytes = fs::read(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %format, bytes = bytes.len(), "extracting text");
    extract_bytes(&bytes, format, path)
}

/// Extracts text from in-memory file contents. `path` is used for error reporting.
pub fn extract_bytes(
    bytes: &[u8],
    format: SourceFormat,
    path: &Path,
) -> Result<String, DocumentError> {
    let result = match format {
        SourceFormat::Markdown | SourceFormat::Text => {
            String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
        }
        SourceFormat::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string()),
        SourceFormat::Docx => extract_docx(bytes),
        SourceFormat::Html => {
            html2text::from_read(Cursor::new(bytes), HTML_RENDER_WIDTH).map_err(|e| e.to_string())
        }
    };

    result.map_err(|message| DocumentError::Extraction {
        path: path.to_path_buf(),
        format,
        message,
    })
}

/// Reads `word/document.xml` from a DOCX archive and flattens it to text.
fn extract_docx(bytes: &[u8]) -> Result<String, String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|e| format!("word/document.xml: {e}"))?;

    let mut xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut xml)
        .map_err(|e| e.to_string())?;
    if xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(format!(
            "word/document.xml exceeds size limit ({MAX_XML_ENTRY_BYTES} bytes)"
        ));
    }

    docx_paragraphs(&xml)
}

/// Collects `w:t` runs, one output line per `w:p` paragraph.
fn docx_paragraphs(xml: &[u8]) -> Result<String, String> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => in_text = true,
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                b"tab" => out.push('\t'),
                b"br" | b"p" => out.push('\n'),
                _ => {}
            },
            Ok(Event::Text(text)) if in_text => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                out.push_str(&text);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }
        buf.clear();
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::{ZipWriter, write::SimpleFileOptions};

    use super::*;

    fn docx_with(document_xml: &str) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    const DOCUMENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>INSTALLATION</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">You should </w:t></w:r><w:r><w:t>pin &amp; verify.</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>Col A</w:t><w:tab/><w:t>Col B</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    #[test]
    fn test_docx_paragraphs() {
        let bytes = docx_with(DOCUMENT_XML);
        let text = extract_bytes(&bytes, SourceFormat::Docx, Path::new("a.docx")).unwrap();
        assert_eq!(
            text,
            "INSTALLATION\nYou should pin & verify.\n\nCol A\tCol B\n"
        );
    }

    #[test]
    fn test_docx_missing_document_xml() {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("other.xml", SimpleFileOptions::default())
            .unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = extract_bytes(&bytes, SourceFormat::Docx, Path::new("a.docx")).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Extraction {
                format: SourceFormat::Docx,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_zip_is_extraction_error() {
        let err = extract_bytes(b"not a zip", SourceFormat::Docx, Path::new("a.docx")).unwrap_err();
        assert!(matches!(err, DocumentError::Extraction { .. }));
    }

    #[test]
    fn test_invalid_pdf_is_extraction_error() {
        let err = extract_bytes(b"not a pdf", SourceFormat::Pdf, Path::new("a.pdf")).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::Extraction {
                format: SourceFormat::Pdf,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_utf8_text() {
        let err = extract_bytes(&[0xff, 0xfe, 0x00], SourceFormat::Text, Path::new("a.txt"))
            .unwrap_err();
        assert!(matches!(err, DocumentError::Extraction { .. }));
    }

    #[test]
    fn test_html_renders_text() {
        let html = b"<html><body><h1>Guide</h1><p>Read this first.</p><h2>Setup</h2><p>Run it.</p></body></html>";
        let text = extract_bytes(html, SourceFormat::Html, Path::new("a.html")).unwrap();
        assert!(text.contains("Guide"));
        assert!(text.contains("Setup"));
        assert!(text.contains("Read this first."));
    }

    #[test]
    fn test_extract_text_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Notes\nbody\n").unwrap();

        assert_eq!(
            extract_text(&path, SourceFormat::Markdown).unwrap(),
            "# Notes\nbody\n"
        );
    }

    #[test]
    fn test_extract_text_missing_file() {
        let err = extract_text(Path::new("/nonexistent/file.md"), SourceFormat::Markdown)
            .unwrap_err();
        assert!(matches!(err, DocumentError::ReadFile { .. }));
    }
}
