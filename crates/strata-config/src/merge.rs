//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`,
//! applying precedence rules, parsing named values and resolving paths.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::{
    Config, ConfigError, ExtractionSettings, InputSettings, KeywordSettings, OutputFormat,
    OutputSettings, StructureSettings,
    parse::{
        RawConfig, RawExtractionSettings, RawInputSettings, RawKeywordSettings, RawOutputSettings,
        RawStructureSettings,
    },
    resolve::resolve_output_dir,
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

impl ParsedConfig {
    /// Directory containing the config file, used to resolve relative paths.
    fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Every field is merged independently and the first file that defines it wins. Lists
/// (vocabularies, patterns, formats) are replaced wholesale, never concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Result<Config, ConfigError> {
    if configs.is_empty() {
        return Ok(Config::default());
    }

    let mut structure = StructureSettings::default();
    let mut keywords = KeywordSettings::default();
    let mut extraction = ExtractionSettings::default();
    let mut input = InputSettings::default();
    let mut output = OutputSettings::default();

    // Lowest precedence first so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref s) = raw.structure {
            apply_structure(&mut structure, s, &parsed.path)?;
        }
        if let Some(ref k) = raw.keywords {
            apply_keywords(&mut keywords, k, &parsed.path)?;
        }
        if let Some(ref e) = raw.extraction {
            apply_extraction(&mut extraction, e);
        }
        if let Some(ref i) = raw.input {
            apply_input(&mut input, i);
        }
        if let Some(ref o) = raw.output {
            apply_output(&mut output, o, parsed)?;
        }
    }

    let config_root = configs.first().map(|c| c.dir().to_path_buf());

    Ok(Config {
        structure,
        keywords,
        extraction,
        input,
        output,
        config_root,
    })
}

/// Parses a named value, attributing a failure to `key` in the file at `path`.
fn named<T>(value: &str, key: &'static str, path: &Path) -> Result<T, ConfigError>
where
    T: FromStr<Err = String>,
{
    value.trim().parse().map_err(|message| ConfigError::InvalidSetting {
        path: path.to_path_buf(),
        key,
        message,
    })
}

/// Applies raw structure settings, overwriting any present values.
fn apply_structure(
    result: &mut StructureSettings,
    raw: &RawStructureSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.numbered_headings {
        result.numbered_headings = named(v, "structure.numbered_headings", path)?;
    }
    if let Some(v) = raw.shout_case_headings {
        result.shout_case_headings = v;
    }
    Ok(())
}

/// Applies raw keyword settings.
fn apply_keywords(
    result: &mut KeywordSettings,
    raw: &RawKeywordSettings,
    path: &Path,
) -> Result<(), ConfigError> {
    if let Some(ref v) = raw.algorithm {
        result.algorithm = named(v, "keywords.algorithm", path)?;
    }
    if let Some(v) = raw.max_keywords {
        result.max_keywords = v;
    }
    if let Some(v) = raw.max_section_keywords {
        result.max_section_keywords = v;
    }
    if let Some(v) = raw.min_length {
        result.min_length = v;
    }
    Ok(())
}

/// Applies raw extraction settings.
fn apply_extraction(result: &mut ExtractionSettings, raw: &RawExtractionSettings) {
    if let Some(ref v) = raw.best_practice_titles {
        result.best_practice_titles = v.clone();
    }
    if let Some(ref v) = raw.example_titles {
        result.example_titles = v.clone();
    }
    if let Some(ref v) = raw.best_practice_phrases {
        result.best_practice_phrases = v.clone();
    }
    if let Some(ref v) = raw.example_phrases {
        result.example_phrases = v.clone();
    }
    if let Some(v) = raw.best_practice_window {
        result.best_practice_window = v;
    }
    if let Some(v) = raw.example_window {
        result.example_window = v;
    }
}

/// Applies raw input settings.
fn apply_input(result: &mut InputSettings, raw: &RawInputSettings) {
    if let Some(ref v) = raw.include {
        result.include = v.clone();
    }
    if let Some(ref v) = raw.exclude {
        result.exclude = v.clone();
    }
}

/// Applies raw output settings, resolving the directory against the defining file.
///
/// Repeated formats are kept once, in first-seen order.
fn apply_output(
    result: &mut OutputSettings,
    raw: &RawOutputSettings,
    parsed: &ParsedConfig,
) -> Result<(), ConfigError> {
    if let Some(ref names) = raw.formats {
        let mut formats: Vec<OutputFormat> = Vec::with_capacity(names.len());
        for name in names {
            let format = named(name, "output.formats", &parsed.path)?;
            if !formats.contains(&format) {
                formats.push(format);
            }
        }
        result.formats = formats;
    }
    if let Some(v) = raw.legacy_sections {
        result.legacy_sections = v;
    }
    if let Some(ref v) = raw.directory {
        if v.trim().is_empty() {
            return Err(ConfigError::EmptyOutputDirectory {
                path: parsed.path.clone(),
            });
        }
        result.directory = Some(resolve_output_dir(v, parsed.dir())?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeywordAlgorithm, NumberedHeadings, OutputFormat, parse::parse_config_str};

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let config = merge_configs(&[]).unwrap();
        assert!(config.config_root.is_none());
        assert_eq!(config.keywords.max_keywords, 50);
    }

    #[test]
    fn test_merge_single_config() {
        let config = merge_configs(&[parsed(
            "/project/.strata.toml",
            r#"
[structure]
numbered_headings = "always"

[keywords]
algorithm = "heuristic"
"#,
        )])
        .unwrap();

        assert_eq!(config.structure.numbered_headings, NumberedHeadings::Always);
        assert!(config.structure.shout_case_headings);
        assert_eq!(config.keywords.algorithm, KeywordAlgorithm::Heuristic);
        assert_eq!(config.config_root, Some(PathBuf::from("/project")));
    }

    #[test]
    fn test_merge_scalar_override() {
        let high = parsed(
            "/project/sub/.strata.toml",
            "[keywords]\nmax_keywords = 5\n",
        );
        let low = parsed(
            "/project/.strata.toml",
            "[keywords]\nmax_keywords = 99\nmin_length = 2\n",
        );

        let config = merge_configs(&[high, low]).unwrap();

        assert_eq!(config.keywords.max_keywords, 5);
        assert_eq!(config.keywords.min_length, 2);
        assert_eq!(config.config_root, Some(PathBuf::from("/project/sub")));
    }

    #[test]
    fn test_merge_lists_replace_wholesale() {
        let high = parsed(
            "/project/sub/.strata.toml",
            "[extraction]\nexample_phrases = [\"for instance\"]\n",
        );
        let low = parsed(
            "/project/.strata.toml",
            "[extraction]\nexample_phrases = [\"e.g.\", \"such as\"]\n",
        );

        let config = merge_configs(&[high, low]).unwrap();

        assert_eq!(config.extraction.example_phrases, vec!["for instance"]);
        assert_eq!(
            config.extraction.best_practice_phrases,
            ExtractionSettings::default().best_practice_phrases
        );
    }

    #[test]
    fn test_merge_output_directory_relative_to_defining_file() {
        let high = parsed("/project/sub/.strata.toml", "[output]\nformats = \"toon\"\n");
        let low = parsed("/project/.strata.toml", "[output]\ndirectory = \"out\"\n");

        let config = merge_configs(&[high, low]).unwrap();

        assert_eq!(config.output.formats, vec![OutputFormat::Toon]);
        assert_eq!(config.output.directory, Some(PathBuf::from("/project/out")));
    }

    #[test]
    fn test_named_values_accept_cli_spellings() {
        let config = merge_configs(&[parsed(
            "/project/.strata.toml",
            "[structure]\nnumbered_headings = \"Leading\"\n\n[keywords]\nalgorithm = \"text-rank\"\n\n[output]\nformats = [\"TOON\", \"json\", \"toon\"]\n",
        )])
        .unwrap();

        assert_eq!(config.structure.numbered_headings, NumberedHeadings::Leading);
        assert_eq!(config.keywords.algorithm, KeywordAlgorithm::TextRank);
        assert_eq!(config.output.formats, vec![OutputFormat::Toon, OutputFormat::Json]);
    }

    #[test]
    fn test_unknown_algorithm_names_key_and_file() {
        let high = parsed("/project/sub/.strata.toml", "[keywords]\nmax_keywords = 5\n");
        let low = parsed("/project/.strata.toml", "[keywords]\nalgorithm = \"magic\"\n");

        let err = merge_configs(&[high, low]).unwrap_err();

        match &err {
            ConfigError::InvalidSetting { path, key, message } => {
                assert_eq!(path, &PathBuf::from("/project/.strata.toml"));
                assert_eq!(*key, "keywords.algorithm");
                assert!(message.contains("rake, textrank, heuristic"));
            }
            other => panic!("expected InvalidSetting, got {other:?}"),
        }
        assert!(err.to_string().starts_with("invalid keywords.algorithm in /project/.strata.toml"));
    }

    #[test]
    fn test_unknown_format_is_invalid_setting() {
        let err = merge_configs(&[parsed(
            "/project/.strata.toml",
            "[output]\nformats = [\"yaml\", \"xml\"]\n",
        )])
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidSetting { key: "output.formats", .. }
        ));
    }

    #[test]
    fn test_empty_output_directory_is_error() {
        let err = merge_configs(&[parsed(
            "/project/.strata.toml",
            "[output]\ndirectory = \"  \"\n",
        )])
        .unwrap_err();

        assert!(matches!(err, ConfigError::EmptyOutputDirectory { .. }));
    }
}
