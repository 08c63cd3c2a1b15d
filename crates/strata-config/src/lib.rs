//! Configuration system for strata.
//!
//! strata uses TOML configuration files named `.strata.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.strata.toml` files found, then loading `~/.strata.toml` as the global config with lowest
//! precedence.
//!
//! The settings here drive every stage of a conversion: which lines count as headings, how
//! keywords are extracted, which trigger phrases mark best practices and examples, which files
//! a directory conversion picks up, and which serialization formats are written.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawExtractionSettings, RawInputSettings, RawKeywordSettings, RawOutputSettings,
    RawStructureSettings, parse_config_file, parse_config_str,
};
pub use patterns::InputPatterns;
pub use resolve::resolve_output_dir;
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Title phrases that mark a section as a list of best practices.
pub const DEFAULT_BEST_PRACTICE_TITLES: &[&str] =
    &["best practice", "recommendation", "guideline", "dos and don'ts"];

/// Title phrases that mark a section as a list of examples.
pub const DEFAULT_EXAMPLE_TITLES: &[&str] = &["example", "sample", "demo", "usage"];

/// Advisory phrases that mark a line as a best practice.
pub const DEFAULT_BEST_PRACTICE_PHRASES: &[&str] = &[
    "recommend",
    "should",
    "must",
    "always",
    "never",
    "avoid",
    "best practice",
    "good practice",
    "do not",
    "don't",
];

/// Phrases that mark a line as introducing an example.
pub const DEFAULT_EXAMPLE_PHRASES: &[&str] = &[
    "for example",
    "e.g.",
    "such as",
    "like this",
    "sample",
    "here is",
    "consider",
    "imagine",
    "suppose",
];

/// Default cap on document-level keywords.
pub const DEFAULT_MAX_KEYWORDS: usize = 50;

/// Default cap on keywords per section.
pub const DEFAULT_MAX_SECTION_KEYWORDS: usize = 10;

/// Default include patterns for directory conversion.
pub const DEFAULT_INCLUDE_PATTERNS: &[&str] = &[
    "**/*.md",
    "**/*.markdown",
    "**/*.txt",
    "**/*.pdf",
    "**/*.docx",
    "**/*.html",
    "**/*.htm",
];

/// Top-level merged configuration for strata.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.strata.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Heading detection settings.
    pub structure: StructureSettings,
    /// Keyword extraction settings.
    pub keywords: KeywordSettings,
    /// Best-practice and example extraction settings.
    pub extraction: ExtractionSettings,
    /// File selection for directory conversion.
    pub input: InputSettings,
    /// Serialization output settings.
    pub output: OutputSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.strata.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.strata.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.strata.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        merge_configs(&parsed)
    }

    /// Compiles the `[input]` include/exclude patterns.
    pub fn compile_patterns(&self) -> Result<InputPatterns, ConfigError> {
        InputPatterns::compile(&self.input)
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.strata.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            structure: &self.structure,
            keywords: &self.keywords,
            extraction: &self.extraction,
            input: &self.input,
            output: &self.output,
        };
        toml::to_string_pretty(&serializable)
    }
}

/// How numbered lines such as `1. Introduction` are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberedHeadings {
    /// Numbered lines are always content.
    #[default]
    Never,
    /// Numbered lines open a level-1 section only before any markup heading has been seen,
    /// and only while no content is pending or the pending content belongs to a section a
    /// numbered heading opened.
    Leading,
    /// Every numbered line opens a level-1 section.
    Always,
}

impl fmt::Display for NumberedHeadings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Never => write!(f, "never"),
            Self::Leading => write!(f, "leading"),
            Self::Always => write!(f, "always"),
        }
    }
}

impl FromStr for NumberedHeadings {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "never" => Ok(Self::Never),
            "leading" => Ok(Self::Leading),
            "always" => Ok(Self::Always),
            _ => Err(format!(
                "unknown numbered heading policy '{s}', expected one of: never, leading, always"
            )),
        }
    }
}

/// Available keyword extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordAlgorithm {
    /// RAKE phrase co-occurrence analysis.
    #[default]
    Rake,
    /// TextRank graph-based ranking.
    #[serde(alias = "text-rank", alias = "text_rank")]
    TextRank,
    /// Regex heuristics only (capitalized spans, technical tokens).
    Heuristic,
}

impl KeywordAlgorithm {
    /// Returns a brief description of the algorithm.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Rake => "RAKE - key phrases based on word co-occurrence",
            Self::TextRank => "Graph-based ranking similar to PageRank",
            Self::Heuristic => "Capitalized spans and technical tokens",
        }
    }
}

impl fmt::Display for KeywordAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rake => write!(f, "rake"),
            Self::TextRank => write!(f, "textrank"),
            Self::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl FromStr for KeywordAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rake" => Ok(Self::Rake),
            "textrank" | "text-rank" | "text_rank" => Ok(Self::TextRank),
            "heuristic" | "regex" => Ok(Self::Heuristic),
            _ => Err(format!(
                "unknown algorithm '{s}', expected one of: rake, textrank, heuristic"
            )),
        }
    }
}

/// Serialization formats a document can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// YAML structured markup.
    Yaml,
    /// Pretty-printed JSON.
    Json,
    /// Compact token-oriented object notation.
    Toon,
}

impl OutputFormat {
    /// All formats, from most verbose to most compact.
    pub const ALL: [Self; 3] = [Self::Yaml, Self::Json, Self::Toon];

    /// File extension used when writing this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
            Self::Toon => "toon",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            "toon" => Ok(Self::Toon),
            _ => Err(format!(
                "unknown format '{s}', expected one of: yaml, json, toon"
            )),
        }
    }
}

/// Heading detection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StructureSettings {
    /// Policy for numbered lines.
    pub numbered_headings: NumberedHeadings,
    /// Whether short all-caps lines are headings.
    pub shout_case_headings: bool,
}

impl Default for StructureSettings {
    fn default() -> Self {
        Self {
            numbered_headings: NumberedHeadings::Never,
            shout_case_headings: true,
        }
    }
}

/// Keyword extraction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeywordSettings {
    /// Preferred extraction strategy.
    pub algorithm: KeywordAlgorithm,
    /// Maximum document-level keywords.
    pub max_keywords: usize,
    /// Maximum keywords attached to each section.
    pub max_section_keywords: usize,
    /// Ignore candidates shorter than this many characters.
    pub min_length: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self {
            algorithm: KeywordAlgorithm::Rake,
            max_keywords: DEFAULT_MAX_KEYWORDS,
            max_section_keywords: DEFAULT_MAX_SECTION_KEYWORDS,
            min_length: 4,
        }
    }
}

/// Best-practice and example extraction settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionSettings {
    /// Section title phrases that mark best-practice sections.
    pub best_practice_titles: Vec<String>,
    /// Section title phrases that mark example sections.
    pub example_titles: Vec<String>,
    /// Line phrases that mark best practices.
    pub best_practice_phrases: Vec<String>,
    /// Line phrases that mark examples.
    pub example_phrases: Vec<String>,
    /// Lines of context captured on each side of a best-practice match.
    pub best_practice_window: usize,
    /// Lines of context captured on each side of an example match.
    pub example_window: usize,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            best_practice_titles: to_strings(DEFAULT_BEST_PRACTICE_TITLES),
            example_titles: to_strings(DEFAULT_EXAMPLE_TITLES),
            best_practice_phrases: to_strings(DEFAULT_BEST_PRACTICE_PHRASES),
            example_phrases: to_strings(DEFAULT_EXAMPLE_PHRASES),
            best_practice_window: 2,
            example_window: 3,
        }
    }
}

/// File selection for directory conversion.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputSettings {
    /// Glob patterns a file must match (relative to the walked directory).
    pub include: Vec<String>,
    /// Glob patterns that exclude a file.
    pub exclude: Vec<String>,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            include: to_strings(DEFAULT_INCLUDE_PATTERNS),
            exclude: Vec::new(),
        }
    }
}

/// Serialization output settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Formats written by `strata convert`.
    pub formats: Vec<OutputFormat>,
    /// Emit the flattened legacy section shape with a `subsections` alias.
    pub legacy_sections: bool,
    /// Directory converted files are written to (next to the source when unset).
    pub directory: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::Yaml],
            legacy_sections: false,
            directory: None,
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Heading detection settings.
    structure: &'a StructureSettings,
    /// Keyword extraction settings.
    keywords: &'a KeywordSettings,
    /// Extraction settings.
    extraction: &'a ExtractionSettings,
    /// Input selection settings.
    input: &'a InputSettings,
    /// Output settings.
    output: &'a OutputSettings,
}

/// Converts a static phrase table into owned strings.
fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}
