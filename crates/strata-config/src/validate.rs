//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that are legal but
//! almost certainly not what the user meant.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A trigger vocabulary is empty, so that extraction rule never fires.
    EmptyVocabulary {
        /// Name of the `[extraction]` field.
        field: &'static str,
    },
    /// A context window of zero captures only the matched line.
    ZeroWindow {
        /// Name of the `[extraction]` field.
        field: &'static str,
    },
    /// A keyword cap of zero disables keyword output.
    ZeroKeywordCap {
        /// Name of the `[keywords]` field.
        field: &'static str,
    },
    /// `[output] formats` is empty, so `convert` writes nothing.
    NoOutputFormats,
    /// `[input] include` is empty, so directory conversion selects nothing.
    NoIncludePatterns,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyVocabulary { field } => {
                write!(f, "extraction.{field} is empty; that rule never matches")
            }
            Self::ZeroWindow { field } => {
                write!(f, "extraction.{field} is 0; only the matched line is captured")
            }
            Self::ZeroKeywordCap { field } => {
                write!(f, "keywords.{field} is 0; no keywords will be emitted")
            }
            Self::NoOutputFormats => write!(f, "output.formats is empty; nothing will be written"),
            Self::NoIncludePatterns => {
                write!(f, "input.include is empty; directories will yield no files")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    let extraction = &config.extraction;
    let vocabularies = [
        ("best_practice_titles", &extraction.best_practice_titles),
        ("example_titles", &extraction.example_titles),
        ("best_practice_phrases", &extraction.best_practice_phrases),
        ("example_phrases", &extraction.example_phrases),
    ];
    for (field, phrases) in vocabularies {
        if phrases.iter().all(|p| p.trim().is_empty()) {
            warnings.push(ConfigWarning::EmptyVocabulary { field });
        }
    }

    if extraction.best_practice_window == 0 {
        warnings.push(ConfigWarning::ZeroWindow {
            field: "best_practice_window",
        });
    }
    if extraction.example_window == 0 {
        warnings.push(ConfigWarning::ZeroWindow {
            field: "example_window",
        });
    }

    if config.keywords.max_keywords == 0 {
        warnings.push(ConfigWarning::ZeroKeywordCap {
            field: "max_keywords",
        });
    }
    if config.keywords.max_section_keywords == 0 {
        warnings.push(ConfigWarning::ZeroKeywordCap {
            field: "max_section_keywords",
        });
    }

    if config.output.formats.is_empty() {
        warnings.push(ConfigWarning::NoOutputFormats);
    }
    if config.input.include.is_empty() {
        warnings.push(ConfigWarning::NoIncludePatterns);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_empty_vocabulary() {
        let mut config = Config::default();
        config.extraction.example_phrases.clear();
        config.extraction.best_practice_titles = vec!["  ".to_string()];

        let warnings = validate_config(&config);

        assert!(warnings.contains(&ConfigWarning::EmptyVocabulary {
            field: "example_phrases"
        }));
        assert!(warnings.contains(&ConfigWarning::EmptyVocabulary {
            field: "best_practice_titles"
        }));
    }

    #[test]
    fn test_zero_window_and_caps() {
        let mut config = Config::default();
        config.extraction.example_window = 0;
        config.keywords.max_keywords = 0;

        let warnings = validate_config(&config);

        assert_eq!(
            warnings,
            vec![
                ConfigWarning::ZeroWindow {
                    field: "example_window"
                },
                ConfigWarning::ZeroKeywordCap {
                    field: "max_keywords"
                },
            ]
        );
    }

    #[test]
    fn test_no_formats_or_includes() {
        let mut config = Config::default();
        config.output.formats.clear();
        config.input.include.clear();

        let warnings = validate_config(&config);

        assert_eq!(
            warnings,
            vec![
                ConfigWarning::NoOutputFormats,
                ConfigWarning::NoIncludePatterns
            ]
        );
    }

    #[test]
    fn test_warning_display() {
        let warning = ConfigWarning::ZeroKeywordCap {
            field: "max_section_keywords",
        };
        assert_eq!(
            warning.to_string(),
            "keywords.max_section_keywords is 0; no keywords will be emitted"
        );
    }
}
