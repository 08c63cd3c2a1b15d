//! Implementation of `strata check`.

use std::process::ExitCode;

use strata_config::{Config, ConfigWarning, discover_config_files};

use crate::cli::context::CommandContext;

/// Exit codes for `strata check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration is valid with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Configuration has warnings but is usable.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// Configuration has errors and cannot be used.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and reports problems.
///
/// Runs from a context without configuration so that load errors are reported here
/// rather than before dispatch.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config_files = discover_config_files(&ctx.cwd);

    println!("Checking configuration...");
    println!();

    if config_files.is_empty() {
        println!("No configuration files found; using defaults.");
        println!();
        println!("Run 'strata init' to create a configuration file.");
        return exit_codes::OK;
    }

    println!("Config files:");
    for path in &config_files {
        println!("  {}", path.display());
    }
    println!();

    let config = match Config::load_from_files(&config_files) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return exit_codes::ERROR;
        }
    };

    if let Err(e) = config.compile_patterns() {
        eprintln!("error: {e}");
        return exit_codes::ERROR;
    }

    println!("Keywords: {}", config.keywords.algorithm.description());
    let formats: Vec<String> = config.output.formats.iter().map(ToString::to_string).collect();
    println!("Formats:  {}", formats.join(", "));
    if let Some(dir) = &config.output.directory {
        println!("Output:   {}", dir.display());
    }
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("Warnings ({}):", warnings.len());
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints: Vec<&str> = warnings
        .iter()
        .map(|warning| match warning {
            ConfigWarning::EmptyVocabulary { .. } => {
                "Add trigger phrases, or delete the key to restore the defaults."
            }
            ConfigWarning::ZeroWindow { .. } => {
                "Set the window to 1 or more to capture surrounding lines."
            }
            ConfigWarning::ZeroKeywordCap { .. } => {
                "Raise the keyword cap, or pass --no-annotate to skip annotation."
            }
            ConfigWarning::NoOutputFormats => "List at least one of yaml, json, toon.",
            ConfigWarning::NoIncludePatterns => {
                "Add include globs such as \"**/*.md\", or pass files explicitly."
            }
        })
        .collect();

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("Hints:");
        for hint in hints {
            println!("  - {hint}");
        }
    }
}
