//! TOON re-encoding of documents that were already converted to YAML or JSON.
//!
//! The input is read as a generic value, so any YAML or JSON tree can be re-encoded, not
//! only strata output. Key order is kept.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::debug;

use crate::{NotationError, toon};

/// Notation of a previously converted file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceNotation {
    /// `.yaml` or `.yml`.
    Yaml,
    /// `.json`.
    Json,
}

impl SourceNotation {
    /// Detects the notation from a file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

impl fmt::Display for SourceNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => write!(f, "yaml"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Parses `input` in `notation` and encodes it as TOON, with a trailing newline.
pub fn reencode_toon(input: &str, notation: SourceNotation) -> Result<String, NotationError> {
    let value: Value = match notation {
        SourceNotation::Yaml => serde_yaml::from_str(input).map_err(NotationError::ParseYaml)?,
        SourceNotation::Json => serde_json::from_str(input).map_err(NotationError::ParseJson)?,
    };
    if value.is_null() {
        return Err(NotationError::EmptyInput);
    }
    let mut encoded = toon::encode(&value);
    encoded.push('\n');
    Ok(encoded)
}

/// Reads a `.yaml`, `.yml` or `.json` file and encodes it as TOON.
pub fn file_to_toon(path: &Path) -> Result<String, NotationError> {
    let notation =
        SourceNotation::from_path(path).ok_or_else(|| NotationError::UnsupportedInput {
            path: path.to_path_buf(),
        })?;
    let input = fs::read_to_string(path).map_err(|source| NotationError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), %notation, "re-encoding as toon");
    reencode_toon(&input, notation).map_err(|e| e.with_path(path))
}

/// Path of the TOON file written for `source`: same stem, `.toon` extension, placed in
/// `out_dir` when given and next to the source otherwise.
pub fn toon_path(source: &Path, out_dir: Option<&Path>) -> PathBuf {
    let name = source.with_extension("toon");
    match (out_dir, name.file_name()) {
        (Some(dir), Some(file_name)) => dir.join(file_name),
        _ => name,
    }
}
