//! Error types for document extraction and structuring.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::SourceFormat;

/// Errors that can occur when reading or structuring documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file extension does not map to a supported format.
    #[error("unsupported file type: {path}")]
    UnsupportedFormat {
        /// Path to the unsupported file.
        path: PathBuf,
    },

    /// A format reader failed to produce text.
    #[error("failed to extract {format} text from {path}: {message}")]
    Extraction {
        /// Path to the source file.
        path: PathBuf,
        /// Format that was being read.
        format: SourceFormat,
        /// Reader error message.
        message: String,
    },

    /// The input held no text to structure.
    #[error("no content produced from {origin}")]
    NoContent {
        /// Where the text came from (a path, or `<text>` for in-memory input).
        origin: String,
    },
}
