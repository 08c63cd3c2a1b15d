//! Implementation of `strata config`.

use std::process::ExitCode;

use strata_highlight::Highlighter;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let settings = match ctx.config.settings_to_toml() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: failed to serialize settings: {e}");
            return ExitCode::FAILURE;
        }
    };
    let highlighter = Highlighter::new();
    print!("{}", highlighter.highlight_toml(&settings));
    ExitCode::SUCCESS
}
