//! Implementation of `strata inspect`.

use std::process::ExitCode;

use strata_document::ExtractionItem;
use strata_highlight::{dim, header, subheader};
use strata_notation::{RenderOptions, size_report};

use crate::cli::{
    args::InspectCommand,
    context::CommandContext,
    output::{
        InspectSummary, extraction_table, keyword_table, outline, outline_line, print_json,
        size_table,
    },
};

/// Shows how strata structures and annotates a file.
pub fn run(ctx: &CommandContext, cmd: &InspectCommand) -> ExitCode {
    let path = ctx.resolve(&cmd.file);
    if !path.exists() {
        eprintln!("error: file not found: {}", cmd.file.display());
        return ExitCode::FAILURE;
    }

    let config = cmd.annotate.apply(&ctx.config);
    let document = match cmd.annotate.pipeline(&config).convert_file(&path) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let options = RenderOptions {
        legacy_sections: config.output.legacy_sections,
    };
    let sizes = match size_report(&document, options) {
        Ok(sizes) => sizes,
        Err(e) => {
            eprintln!("error: failed to encode document: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cmd.json {
        return print_json(&InspectSummary::new(&document, &sizes));
    }

    let metadata = &document.metadata;
    println!(
        "--- {} ---",
        header(&format!(
            "{} ({})",
            cmd.file.display(),
            metadata.source_format
        ))
    );
    println!("title: {}", metadata.title);
    if !metadata.tags.is_empty() {
        println!("{}", dim(&format!("tags: {}", metadata.tags.join(", "))));
    }
    println!(
        "{}",
        dim(&format!(
            "{} sections, {} lines",
            document.section_count(),
            document.raw_text.lines().count()
        ))
    );
    println!();

    println!("{}", subheader("Sections:"));
    let rows = outline(&document.sections);
    for row in &rows {
        println!("{}", outline_line(row));
        if !row.keywords.is_empty() {
            let indent = "  ".repeat(row.depth + 2);
            println!("{indent}{}", dim(&row.keywords.join(", ")));
        }
    }
    println!();

    match &document.analysis {
        Some(analysis) => {
            let algorithm = config.keywords.algorithm;
            println!("{}", subheader(&format!("Keywords ({algorithm}):")));
            if analysis.keywords.is_empty() {
                println!("  {}", dim("(none)"));
            } else {
                println!("{}", keyword_table(&analysis.keywords));
            }
            println!();
            print_items("Best practices:", &analysis.best_practices);
            print_items("Examples:", &analysis.examples);
        }
        None => {
            println!("{}", dim("annotation skipped"));
            println!();
        }
    }

    println!("{}", subheader("Encoded size:"));
    println!("{}", size_table(&sizes));

    ExitCode::SUCCESS
}

/// Prints a titled table of extracted items.
fn print_items(title: &str, items: &[ExtractionItem]) {
    println!("{}", subheader(title));
    if items.is_empty() {
        println!("  {}", dim("(none)"));
    } else {
        println!("{}", extraction_table(items));
    }
    println!();
}

