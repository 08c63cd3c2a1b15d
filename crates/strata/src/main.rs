//! Command-line interface for strata.

use std::process::ExitCode;

use strata::{
    cli::{
        args::{Commands, parse_cli},
        commands,
        context::CommandContext,
    },
    logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    logging::init(cli.verbose);

    let ctx = match cli.command {
        Commands::Init(_) | Commands::Check => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
