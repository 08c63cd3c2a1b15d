//! Configuration file parsing.
//!
//! Parses individual `.strata.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.
//!
//! Named values (numbered heading policy, keyword algorithm, output formats) stay strings
//! here. They are parsed with the same `FromStr` rules as the CLI flags when merged, so a
//! config file accepts every spelling the command line does.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Heading detection section.
    pub structure: Option<RawStructureSettings>,
    /// Keyword extraction section.
    pub keywords: Option<RawKeywordSettings>,
    /// Best-practice and example extraction section.
    pub extraction: Option<RawExtractionSettings>,
    /// Directory conversion file selection.
    pub input: Option<RawInputSettings>,
    /// Serialization output section.
    pub output: Option<RawOutputSettings>,
}

/// Raw heading detection settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawStructureSettings {
    /// Policy for numbered lines: never, leading or always.
    pub numbered_headings: Option<String>,
    /// Whether all-caps lines are headings.
    pub shout_case_headings: Option<bool>,
}

/// Raw keyword settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawKeywordSettings {
    /// Extraction strategy name.
    pub algorithm: Option<String>,
    /// Document keyword cap.
    pub max_keywords: Option<usize>,
    /// Per-section keyword cap.
    pub max_section_keywords: Option<usize>,
    /// Minimum candidate length in characters.
    pub min_length: Option<usize>,
}

/// Raw extraction settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawExtractionSettings {
    /// Best-practice section title phrases.
    pub best_practice_titles: Option<Vec<String>>,
    /// Example section title phrases.
    pub example_titles: Option<Vec<String>>,
    /// Best-practice line phrases.
    pub best_practice_phrases: Option<Vec<String>>,
    /// Example line phrases.
    pub example_phrases: Option<Vec<String>>,
    /// Context lines around a best-practice match.
    pub best_practice_window: Option<usize>,
    /// Context lines around an example match.
    pub example_window: Option<usize>,
}

/// Raw input selection settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawInputSettings {
    /// Include glob pattern(s). Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub include: Option<Vec<String>>,
    /// Exclude glob pattern(s). Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
}

/// Raw output settings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOutputSettings {
    /// Output format name(s). Accepts a single string or an array.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub formats: Option<Vec<String>>,
    /// Emit the legacy flattened section shape.
    pub legacy_sections: Option<bool>,
    /// Output directory, absolute, `~`-prefixed, or relative to the config file.
    pub directory: Option<String>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
