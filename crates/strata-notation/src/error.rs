//! Error types for serialization.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors that can occur while encoding a document or re-encoding a converted file.
#[derive(Debug, Error)]
pub enum NotationError {
    /// YAML encoding failed.
    #[error("failed to encode yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON encoding failed.
    #[error("failed to encode json: {0}")]
    Json(#[from] serde_json::Error),

    /// A converted YAML document could not be parsed.
    #[error("invalid yaml: {0}")]
    ParseYaml(serde_yaml::Error),

    /// A converted JSON document could not be parsed.
    #[error("invalid json: {0}")]
    ParseJson(serde_json::Error),

    /// The input parsed to nothing.
    #[error("input holds no document")]
    EmptyInput,

    /// The file extension names no notation that can be re-encoded.
    #[error("unsupported input {}: expected .yaml, .yml or .json", path.display())]
    UnsupportedInput {
        /// Offending path.
        path: PathBuf,
    },

    /// Reading an input file failed.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// An error attributed to a file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// File being processed.
        path: PathBuf,
        /// Underlying error.
        source: Box<Self>,
    },
}

impl NotationError {
    /// Attributes this error to `path`.
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        Self::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
