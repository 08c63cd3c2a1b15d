//! Error types for strata configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// Failed to compile a glob pattern.
    #[error("invalid glob pattern '{pattern}': {source}")]
    InvalidPattern {
        /// The invalid pattern.
        pattern: String,
        /// Underlying glob error.
        source: globset::Error,
    },

    /// A named setting holds a value strata does not recognize.
    #[error("invalid {key} in {path}: {message}")]
    InvalidSetting {
        /// Config file that set the value.
        path: PathBuf,
        /// Dotted key, e.g. `keywords.algorithm`.
        key: &'static str,
        /// What was wrong and which values are accepted.
        message: String,
    },

    /// `[output] directory` is set but empty.
    #[error("output.directory in {path} is empty; remove the key to write next to each source")]
    EmptyOutputDirectory {
        /// Config file that set the value.
        path: PathBuf,
    },

    /// Failed to determine home directory.
    #[error("could not determine home directory")]
    NoHomeDirectory,
}
