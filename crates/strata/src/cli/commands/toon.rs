//! Implementation of `strata toon`.

use std::{fs, path::Path, process::ExitCode};

use strata_notation::{file_to_toon, toon_path};
use tracing::debug;

use crate::cli::{args::ToonCommand, context::CommandContext};

/// Re-encodes converted YAML or JSON files as TOON.
///
/// Every file is attempted; the command fails if any file failed.
pub fn run(ctx: &CommandContext, cmd: &ToonCommand) -> ExitCode {
    let out_dir = cmd
        .output
        .as_deref()
        .map(|dir| ctx.resolve(dir))
        .or_else(|| ctx.config.output.directory.clone());

    let mut failures = 0;
    for file in &cmd.files {
        let path = ctx.resolve(file);
        if let Err(message) = reencode(&path, out_dir.as_deref(), cmd.stdout) {
            eprintln!("error: {message}");
            failures += 1;
        }
    }

    if cmd.files.len() > 1 {
        let converted = cmd.files.len() - failures;
        let summary = format!("Re-encoded {converted} of {} files", cmd.files.len());
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

/// Re-encodes one file and writes or prints the result.
fn reencode(path: &Path, out_dir: Option<&Path>, stdout: bool) -> Result<(), String> {
    if !path.is_file() {
        return Err(format!("file not found: {}", path.display()));
    }
    let encoded = file_to_toon(path).map_err(|e| e.to_string())?;

    if stdout {
        print!("{encoded}");
        return Ok(());
    }

    let target = toon_path(path, out_dir);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }
    fs::write(&target, &encoded)
        .map_err(|e| format!("failed to write {}: {e}", target.display()))?;
    debug!(path = %target.display(), bytes = encoded.len(), "wrote output");
    println!("{} -> {}", path.display(), target.display());
    Ok(())
}
