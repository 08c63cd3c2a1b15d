//! Include/exclude pattern compilation and matching.
//!
//! Compiles the `[input]` glob patterns into matchers that decide which files a directory
//! conversion picks up.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::{ConfigError, InputSettings};

/// Compiled glob patterns for file selection.
#[derive(Debug)]
pub struct InputPatterns {
    /// Files must match at least one of these.
    include: GlobSet,
    /// Files matching any of these are skipped.
    exclude: GlobSet,
}

impl InputPatterns {
    /// Compiles include/exclude patterns into matchers.
    pub fn compile(settings: &InputSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(&settings.include, "include")?,
            exclude: build_set(&settings.exclude, "exclude")?,
        })
    }

    /// Checks whether a path is selected.
    ///
    /// A file matches if it matches at least one include pattern and no exclude pattern.
    /// The path should be relative to the directory being converted.
    pub fn matches(&self, path: &Path) -> bool {
        self.include.is_match(path) && !self.exclude.is_match(path)
    }
}

/// Builds a glob set from a list of patterns.
fn build_set(patterns: &[String], kind: &str) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(compile_glob(pattern)?);
    }
    builder.build().map_err(|e| ConfigError::InvalidPattern {
        pattern: format!("<combined {kind} patterns>"),
        source: e,
    })
}

/// Compiles a single glob pattern.
fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}
