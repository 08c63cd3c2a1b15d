//! The conversion pipeline: detect, extract, structure, annotate.
//!
//! Also resolves the inputs of a `strata convert` run (explicit files plus files found by
//! walking directories) and where each output file goes.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use strata_annotate::Annotator;
use strata_config::{Config, InputPatterns, OutputFormat};
use strata_document::{Document, DocumentError, Metadata};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Converts documents according to a configuration.
pub struct Pipeline<'c> {
    /// Effective configuration.
    config: &'c Config,
    /// Annotation pass; `None` to stop after structuring.
    annotator: Option<Annotator>,
}

impl<'c> Pipeline<'c> {
    /// Creates a pipeline that structures and annotates.
    pub fn new(config: &'c Config) -> Self {
        Self {
            config,
            annotator: Some(Annotator::from_config(config)),
        }
    }

    /// Creates a pipeline that only structures.
    pub fn without_annotation(config: &'c Config) -> Self {
        Self {
            config,
            annotator: None,
        }
    }

    /// Reads and converts one file.
    pub fn convert_file(&self, path: &Path) -> Result<Document, DocumentError> {
        let mut document = Document::load(path, &self.config.structure)?;
        self.annotate(&mut document);
        info!(
            path = %path.display(),
            sections = document.section_count(),
            "converted document"
        );
        Ok(document)
    }

    /// Converts already-extracted text.
    pub fn convert_text(&self, text: &str, metadata: Metadata) -> Result<Document, DocumentError> {
        let mut document = Document::from_text(text, metadata, &self.config.structure)?;
        self.annotate(&mut document);
        Ok(document)
    }

    /// Runs the annotation pass when enabled.
    fn annotate(&self, document: &mut Document) {
        if let Some(annotator) = &self.annotator {
            annotator.annotate_document(document);
        }
    }
}

/// Reads, structures and annotates a file.
pub fn convert_file(path: &Path, config: &Config) -> Result<Document, DocumentError> {
    Pipeline::new(config).convert_file(path)
}

/// Structures and annotates already-extracted text.
pub fn convert_text(
    text: &str,
    metadata: Metadata,
    config: &Config,
) -> Result<Document, DocumentError> {
    Pipeline::new(config).convert_text(text, metadata)
}

/// A file selected for conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertInput {
    /// Path to the source file.
    pub path: PathBuf,
    /// Directory of the file relative to the walked root; empty for explicit files.
    pub rel_dir: PathBuf,
}

impl ConvertInput {
    /// Where the `format` output for this input is written.
    ///
    /// Without an output directory the output sits next to the source. With one, files found
    /// by walking a directory keep their relative subdirectory.
    pub fn output_path(&self, format: OutputFormat, out_dir: Option<&Path>) -> PathBuf {
        let stem = self.path.file_stem().unwrap_or_else(|| OsStr::new("document"));
        let mut name = stem.to_os_string();
        name.push(".");
        name.push(format.extension());
        match out_dir {
            Some(dir) => dir.join(&self.rel_dir).join(name),
            None => self.path.with_file_name(name),
        }
    }
}

/// Expands `paths` into the files to convert.
///
/// Explicit files are always taken. Directories are walked (hidden entries and symlinks
/// skipped) and their files filtered by `patterns`, matched relative to the directory.
/// Missing paths are reported and skipped. Results are in a stable order.
pub fn collect_inputs(paths: &[PathBuf], patterns: &InputPatterns) -> Vec<ConvertInput> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_file() {
            inputs.push(ConvertInput {
                path: path.clone(),
                rel_dir: PathBuf::new(),
            });
        } else if path.is_dir() {
            walk_directory(path, patterns, &mut inputs);
        } else {
            warn!(path = %path.display(), "input not found");
        }
    }
    inputs
}

/// Adds matching files below `root` to `inputs`.
fn walk_directory(root: &Path, patterns: &InputPatterns, inputs: &mut Vec<ConvertInput>) {
    for entry in WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel_path) = entry.path().strip_prefix(root) else {
            continue;
        };
        if !patterns.matches(rel_path) {
            debug!(path = %rel_path.display(), "not selected by input patterns");
            continue;
        }
        inputs.push(ConvertInput {
            path: entry.path().to_path_buf(),
            rel_dir: rel_path.parent().map(Path::to_path_buf).unwrap_or_default(),
        });
    }
}

/// Checks if a filename represents a hidden file (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}
