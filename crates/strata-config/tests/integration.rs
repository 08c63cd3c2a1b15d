//! Integration tests for strata-config.
//!
//! Tests the full configuration loading pipeline: discovery -> parse -> merge -> resolve.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use strata_config::{
    Config, ConfigError, ConfigWarning, KeywordAlgorithm, NumberedHeadings, OutputFormat,
    local_template,
};

/// Test helper to create a temporary directory structure for tests.
struct TestEnv {
    root: tempfile::TempDir,
}

impl TestEnv {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    /// Creates a directory and returns its path.
    fn create_dir(&self, rel_path: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Creates a file with content and returns its path.
    fn create_file(&self, rel_path: &str, content: &str) -> PathBuf {
        let path = self.root.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }
}

#[test]
fn test_load_root_config_ignores_parents() {
    let env = TestEnv::new();
    env.create_file(".strata.toml", "[keywords]\nmax_keywords = 1\n");
    env.create_file(
        "project/.strata.toml",
        "root = true\n[structure]\nnumbered_headings = \"leading\"\n",
    );
    let cwd = env.create_dir("project/docs");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.structure.numbered_headings, NumberedHeadings::Leading);
    assert_eq!(config.keywords.max_keywords, 50);
    assert_eq!(config.config_root, Some(env.path().join("project")));
}

#[test]
fn test_load_nested_configs_closest_wins() {
    let env = TestEnv::new();
    env.create_file(
        ".strata.toml",
        r#"
root = true

[keywords]
algorithm = "textrank"
max_keywords = 20

[output]
formats = ["yaml", "json"]
"#,
    );
    env.create_file(
        "sub/.strata.toml",
        r#"
[keywords]
max_keywords = 7

[output]
formats = "toon"
"#,
    );
    let cwd = env.create_dir("sub/deeper");

    let config = Config::load(&cwd).unwrap();

    assert_eq!(config.keywords.algorithm, KeywordAlgorithm::TextRank);
    assert_eq!(config.keywords.max_keywords, 7);
    assert_eq!(config.output.formats, vec![OutputFormat::Toon]);
}

#[test]
fn test_load_output_directory_resolved() {
    let env = TestEnv::new();
    env.create_file(
        ".strata.toml",
        "root = true\n[output]\ndirectory = \"converted\"\n",
    );

    let config = Config::load(env.path()).unwrap();

    assert_eq!(
        config.output.directory,
        Some(env.path().join("converted"))
    );
}

#[test]
fn test_load_invalid_toml_reports_path() {
    let env = TestEnv::new();
    let path = env.create_file(".strata.toml", "root = true\n[keywords\n");

    let err = Config::load(env.path()).unwrap_err();

    match err {
        ConfigError::ParseToml { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected ParseToml, got {other:?}"),
    }
}

#[test]
fn test_load_invalid_setting_reports_key_and_path() {
    let env = TestEnv::new();
    let path = env.create_file(
        ".strata.toml",
        "root = true\n[structure]\nnumbered_headings = \"sometimes\"\n",
    );

    let err = Config::load(env.path()).unwrap_err();

    match err {
        ConfigError::InvalidSetting { path: p, key, .. } => {
            assert_eq!(p, path);
            assert_eq!(key, "structure.numbered_headings");
        }
        other => panic!("expected InvalidSetting, got {other:?}"),
    }
}

#[test]
fn test_load_from_files_empty_is_default() {
    let config = Config::load_from_files(&[]).unwrap();
    assert!(config.config_root.is_none());
    assert_eq!(config.output.formats, vec![OutputFormat::Yaml]);
}

#[test]
fn test_compile_patterns_from_loaded_config() {
    let env = TestEnv::new();
    env.create_file(
        ".strata.toml",
        "root = true\n[input]\ninclude = \"**/*.md\"\nexclude = \"archive/**\"\n",
    );

    let config = Config::load(env.path()).unwrap();
    let patterns = config.compile_patterns().unwrap();

    assert!(patterns.matches(Path::new("guide/intro.md")));
    assert!(!patterns.matches(Path::new("archive/old.md")));
    assert!(!patterns.matches(Path::new("guide/manual.pdf")));
}

#[test]
fn test_invalid_pattern_surfaces_on_compile() {
    let env = TestEnv::new();
    env.create_file(".strata.toml", "root = true\n[input]\ninclude = \"[oops\"\n");

    let config = Config::load(env.path()).unwrap();

    assert!(matches!(
        config.compile_patterns(),
        Err(ConfigError::InvalidPattern { .. })
    ));
}

#[test]
fn test_validate_loaded_config() {
    let env = TestEnv::new();
    env.create_file(
        ".strata.toml",
        "root = true\n[output]\nformats = []\n[extraction]\nbest_practice_window = 0\n",
    );

    let config = Config::load(env.path()).unwrap();
    let warnings = config.validate();

    assert!(warnings.contains(&ConfigWarning::NoOutputFormats));
    assert!(warnings.contains(&ConfigWarning::ZeroWindow {
        field: "best_practice_window"
    }));
}

#[test]
fn test_initialized_template_loads_as_defaults() {
    let env = TestEnv::new();
    env.create_file(".strata.toml", &format!("root = true\n{}", local_template()));

    let config = Config::load(env.path()).unwrap();

    assert_eq!(config.keywords.max_section_keywords, 10);
    assert!(config.validate().is_empty());
}

#[test]
fn test_settings_round_trip_through_toml() {
    let env = TestEnv::new();
    env.create_file(
        ".strata.toml",
        "root = true\n[structure]\nshout_case_headings = false\n[output]\nlegacy_sections = true\n",
    );
    let config = Config::load(env.path()).unwrap();

    let rendered = config.settings_to_toml().unwrap();
    env.create_file("copy/.strata.toml", &format!("root = true\n{rendered}"));
    let reloaded = Config::load(&env.path().join("copy")).unwrap();

    assert!(!reloaded.structure.shout_case_headings);
    assert!(reloaded.output.legacy_sections);
}
