//! Shared helpers for command implementations.

use strata_config::Config;

use crate::{cli::args::AnnotateArgs, pipeline::Pipeline};

impl AnnotateArgs {
    /// Applies the keyword overrides on top of the loaded configuration.
    pub fn apply(&self, config: &Config) -> Config {
        let mut config = config.clone();
        if let Some(algorithm) = self.algorithm {
            config.keywords.algorithm = algorithm;
        }
        if let Some(max) = self.max_keywords {
            config.keywords.max_keywords = max;
        }
        if let Some(max) = self.max_section_keywords {
            config.keywords.max_section_keywords = max;
        }
        config
    }

    /// Builds the pipeline these flags ask for.
    pub fn pipeline<'c>(&self, config: &'c Config) -> Pipeline<'c> {
        if self.no_annotate {
            Pipeline::without_annotation(config)
        } else {
            Pipeline::new(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_config::KeywordAlgorithm;

    use super::*;

    #[test]
    fn test_apply_overrides_only_given_fields() {
        let args = AnnotateArgs {
            algorithm: Some(KeywordAlgorithm::TextRank),
            max_keywords: Some(5),
            ..AnnotateArgs::default()
        };
        let base = Config::default();
        let config = args.apply(&base);
        assert_eq!(config.keywords.algorithm, KeywordAlgorithm::TextRank);
        assert_eq!(config.keywords.max_keywords, 5);
        assert_eq!(
            config.keywords.max_section_keywords,
            base.keywords.max_section_keywords
        );
    }
}
