//! Implementation of `strata convert`.

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use strata_config::OutputFormat;
use strata_document::Document;
use strata_notation::{RenderOptions, render};
use tracing::debug;

use crate::{
    cli::{args::ConvertCommand, context::CommandContext},
    pipeline::{ConvertInput, collect_inputs},
};

/// Converts the given files and directories.
///
/// Every input is attempted; the command fails if any input failed.
pub fn run(ctx: &CommandContext, cmd: &ConvertCommand) -> ExitCode {
    let config = cmd.annotate.apply(&ctx.config);

    let formats = if cmd.formats.is_empty() {
        config.output.formats.clone()
    } else {
        cmd.formats.clone()
    };
    if formats.is_empty() {
        eprintln!("error: no output formats selected");
        return ExitCode::FAILURE;
    }

    let options = RenderOptions {
        legacy_sections: cmd.legacy || config.output.legacy_sections,
    };
    let out_dir = cmd
        .output
        .as_deref()
        .map(|dir| ctx.resolve(dir))
        .or_else(|| config.output.directory.clone());

    let patterns = match config.compile_patterns() {
        Ok(patterns) => patterns,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let paths: Vec<PathBuf> = cmd.paths.iter().map(|p| ctx.resolve(p)).collect();
    let inputs = collect_inputs(&paths, &patterns);
    if inputs.is_empty() {
        eprintln!("error: no input files found");
        return ExitCode::FAILURE;
    }

    let pipeline = cmd.annotate.pipeline(&config);
    let mut failures = 0;
    for input in &inputs {
        let document = match pipeline.convert_file(&input.path) {
            Ok(document) => document,
            Err(e) => {
                eprintln!("error: {e}");
                failures += 1;
                continue;
            }
        };
        let target = Target {
            out_dir: out_dir.as_deref(),
            stdout: cmd.stdout,
        };
        if let Err(message) = emit(&document, input, &formats, options, &target) {
            eprintln!("error: {message}");
            failures += 1;
        }
    }

    if inputs.len() > 1 {
        let converted = inputs.len() - failures;
        let summary = format!("Converted {converted} of {} files", inputs.len());
        if cmd.stdout {
            eprintln!("{summary}");
        } else {
            println!("{summary}");
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Where rendered documents go.
struct Target<'a> {
    /// Output directory; `None` writes next to each source.
    out_dir: Option<&'a Path>,
    /// Print to stdout instead of writing files.
    stdout: bool,
}

/// Renders `document` in every format and writes or prints it.
fn emit(
    document: &Document,
    input: &ConvertInput,
    formats: &[OutputFormat],
    options: RenderOptions,
    target: &Target<'_>,
) -> Result<(), String> {
    for &format in formats {
        let encoded = render(document, format, options)
            .map_err(|e| format!("failed to encode {}: {e}", input.path.display()))?;

        if target.stdout {
            print!("{encoded}");
            continue;
        }

        let path = input.output_path(format, target.out_dir);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
        }
        fs::write(&path, &encoded)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        debug!(path = %path.display(), bytes = encoded.len(), "wrote output");
        println!("{} -> {}", input.path.display(), path.display());
    }
    Ok(())
}
