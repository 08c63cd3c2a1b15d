//! Clap argument definitions for the `strata` CLI.

use std::{env, path::PathBuf, process::exit};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use strata_config::{KeywordAlgorithm, OutputFormat};

/// Parse an output format from a string.
fn parse_format(s: &str) -> Result<OutputFormat, String> {
    s.parse()
}

/// Parse a keyword extraction algorithm from a string.
fn parse_algorithm(s: &str) -> Result<KeywordAlgorithm, String> {
    s.parse()
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "strata", version)]
#[command(about = "Strata - Structure documents into annotated YAML, JSON and TOON")]
pub struct Cli {
    /// Log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG takes precedence
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Keyword overrides shared by commands that annotate.
#[derive(Args, Debug, Clone, Default)]
pub struct AnnotateArgs {
    /// Keyword extraction algorithm: rake (co-occurrence phrases), textrank (graph-based),
    /// heuristic (capitalized and technical terms) [default: rake]
    #[arg(short = 'a', long, value_parser = parse_algorithm)]
    pub algorithm: Option<KeywordAlgorithm>,

    /// Maximum document-level keywords [default: 50]
    #[arg(long)]
    pub max_keywords: Option<usize>,

    /// Maximum keywords per section [default: 10]
    #[arg(long)]
    pub max_section_keywords: Option<usize>,

    /// Skip keyword and best-practice/example extraction
    #[arg(long)]
    pub no_annotate: bool,
}

/// Arguments for `strata convert`.
#[derive(Args, Debug, Clone)]
pub struct ConvertCommand {
    /// Files or directories to convert
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format: yaml, json, toon (repeatable) [default: yaml]
    #[arg(short = 'f', long = "format", value_parser = parse_format)]
    pub formats: Vec<OutputFormat>,

    /// Directory to write converted files to [default: next to each source]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print converted documents to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,

    /// Emit the flattened section layout with a `subsections` alias
    #[arg(long)]
    pub legacy: bool,

    #[command(flatten)]
    /// Annotation overrides.
    pub annotate: AnnotateArgs,
}

/// Arguments for `strata inspect`.
#[derive(Args, Debug, Clone)]
pub struct InspectCommand {
    /// File to inspect
    pub file: PathBuf,

    /// Output a JSON summary
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    /// Annotation overrides.
    pub annotate: AnnotateArgs,
}

/// Arguments for `strata toon`.
#[derive(Args, Debug, Clone)]
pub struct ToonCommand {
    /// Converted .yaml, .yml or .json files to re-encode
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory to write .toon files to [default: next to each input]
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Print TOON to stdout instead of writing files
    #[arg(long)]
    pub stdout: bool,
}

/// Arguments for `strata init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.strata.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Supported `strata` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Convert documents to structured YAML, JSON or TOON
    Convert(ConvertCommand),

    /// Show how strata structures and annotates a file
    Inspect(InspectCommand),

    /// Re-encode converted YAML or JSON files as TOON
    Toon(ToonCommand),

    /// Initialize strata configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and report problems
    Check,
}

/// Parses CLI arguments, printing a command overview for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp {
                let args: Vec<_> = env::args().collect();
                if args.len() <= 2 {
                    print_overview_help();
                    exit(0);
                }
            }
            e.exit();
        }
    }
}

/// Prints top-level help: commands with their summaries, then global options.
fn print_overview_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: strata [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Increase log verbosity");
    println!("  -h, --help        Print help");
    println!("  -V, --version     Print version");
}

#[cfg(test)]
mod tests {
    use strata_config::{DEFAULT_MAX_KEYWORDS, DEFAULT_MAX_SECTION_KEYWORDS, KeywordSettings};

    use super::*;

    /// Gets help text for a subcommand's argument.
    fn get_arg_help(cmd: &clap::Command, subcmd: &str, arg: &str) -> String {
        cmd.get_subcommands()
            .find(|c| c.get_name() == subcmd)
            .and_then(|c| c.get_arguments().find(|a| a.get_id() == arg))
            .and_then(|a| a.get_help().map(|h| h.to_string()))
            .unwrap_or_default()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    /// Verifies that CLI help text contains the correct default values.
    ///
    /// This test catches drift between the defaults in strata-config and the help text
    /// strings in command definitions.
    #[test]
    fn cli_help_defaults_match_constants() {
        let cmd = Cli::command();

        for subcmd in ["convert", "inspect"] {
            let max_help = get_arg_help(&cmd, subcmd, "max_keywords");
            assert!(
                max_help.contains(&format!("[default: {DEFAULT_MAX_KEYWORDS}]")),
                "{subcmd} --max-keywords help should contain default: {max_help}"
            );

            let section_help = get_arg_help(&cmd, subcmd, "max_section_keywords");
            assert!(
                section_help.contains(&format!("[default: {DEFAULT_MAX_SECTION_KEYWORDS}]")),
                "{subcmd} --max-section-keywords help should contain default: {section_help}"
            );

            let algorithm_help = get_arg_help(&cmd, subcmd, "algorithm");
            let default_algorithm = KeywordSettings::default().algorithm;
            assert!(
                algorithm_help.contains(&format!("[default: {default_algorithm}]")),
                "{subcmd} --algorithm help should contain default: {algorithm_help}"
            );
        }
    }

    #[test]
    fn convert_collects_repeated_formats() {
        let cli = Cli::try_parse_from([
            "strata", "-vv", "convert", "guide.md", "-f", "json", "-f", "toon", "--legacy",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        let Commands::Convert(cmd) = cli.command else {
            panic!("expected convert");
        };
        assert_eq!(cmd.formats, vec![OutputFormat::Json, OutputFormat::Toon]);
        assert!(cmd.legacy);
        assert!(!cmd.stdout);
        assert_eq!(cmd.paths, vec![PathBuf::from("guide.md")]);
    }

    #[test]
    fn convert_rejects_unknown_format() {
        let result = Cli::try_parse_from(["strata", "convert", "guide.md", "-f", "xml"]);
        assert!(result.is_err());
    }

    #[test]
    fn toon_takes_files_and_output_dir() {
        let cli =
            Cli::try_parse_from(["strata", "toon", "a.yaml", "b.json", "-o", "dist"]).unwrap();
        let Commands::Toon(cmd) = cli.command else {
            panic!("expected toon");
        };
        assert_eq!(
            cmd.files,
            vec![PathBuf::from("a.yaml"), PathBuf::from("b.json")]
        );
        assert_eq!(cmd.output, Some(PathBuf::from("dist")));
        assert!(Cli::try_parse_from(["strata", "toon"]).is_err());
    }

    #[test]
    fn inspect_accepts_algorithm_override() {
        let cli =
            Cli::try_parse_from(["strata", "inspect", "notes.txt", "-a", "heuristic", "--json"])
                .unwrap();
        let Commands::Inspect(cmd) = cli.command else {
            panic!("expected inspect");
        };
        assert_eq!(cmd.annotate.algorithm, Some(KeywordAlgorithm::Heuristic));
        assert!(cmd.json);
    }
}
