//! Encoding annotated documents.

use strata_annotate::Annotator;
use strata_config::{Config, KeywordAlgorithm, OutputFormat};
use strata_document::{Document, Metadata, SourceFormat};
use strata_notation::{RenderOptions, render, to_json, to_toon};

const GUIDE: &str = "\
# Release Process

## Best Practices
Tag every release in Git.
You should never force push to main.

## Examples
For example, run the Release Drafter action.
";

fn annotated() -> Document {
    let mut config = Config::default();
    config.keywords.algorithm = KeywordAlgorithm::Heuristic;
    let mut doc = Document::from_text(
        GUIDE,
        Metadata::new("release", "release.md", SourceFormat::Markdown),
        &config.structure,
    )
    .unwrap();
    Annotator::from_config(&config).annotate_document(&mut doc);
    doc
}

#[test]
fn toon_writes_keywords_as_a_table() {
    let toon = to_toon(&annotated(), RenderOptions::default()).unwrap();
    assert!(toon.contains("\nanalysis:\n  keywords["));
    assert!(toon.contains("]{text,confidence_level}:\n"));
    assert!(toon.contains("  best_practices["));
}

#[test]
fn json_exposes_analysis_items() {
    let json = to_json(&annotated(), RenderOptions::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let practices = value["analysis"]["best_practices"].as_array().unwrap();
    assert_eq!(practices[0]["confidence_level"], "high");
    assert_eq!(practices[0]["tags"][0], "best_practice");
    assert_eq!(practices[0]["source_section_id"], "section_1");

    let examples = value["analysis"]["examples"].as_array().unwrap();
    assert!(!examples.is_empty());
}

#[test]
fn every_format_encodes_annotated_legacy_layout() {
    let doc = annotated();
    let options = RenderOptions {
        legacy_sections: true,
    };
    for format in OutputFormat::ALL {
        let encoded = render(&doc, format, options).unwrap();
        assert!(encoded.contains("subsections"), "{format}");
    }
}
