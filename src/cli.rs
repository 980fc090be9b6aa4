//! Command-line interface definition.
//!
//! Lives in the library so `xtask` can render man pages from it.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::filter::{NameMode, DEFAULT_MAX_AGE, DEFAULT_MIN_AGE};
use crate::output::OutputFormat;
use crate::record::Gender;

/// Version with build metadata, e.g. `0.3.0 (a1b2c3d, built 2025-01-31)`.
pub fn long_version() -> &'static str {
    static VERSION: OnceLock<String> = OnceLock::new();
    VERSION.get_or_init(|| {
        let date = env!("FILTRAPX_BUILD_DATE");
        match option_env!("VERGEN_GIT_SHA") {
            Some(sha) if sha != "unknown" => {
                let short = sha.get(..7).unwrap_or(sha);
                format!("{} ({}, built {})", env!("CARGO_PKG_VERSION"), short, date)
            }
            _ => format!("{} (built {})", env!("CARGO_PKG_VERSION"), date),
        }
    })
}

fn parse_gender(value: &str) -> Result<Gender, String> {
    Gender::parse(value).ok_or_else(|| format!("invalid gender '{}': expected M or F", value))
}

#[derive(Debug, Parser)]
#[command(name = "filtrapx")]
#[command(author, version, long_version = long_version())]
#[command(about = "Extract and filter person records from messy text exports")]
#[command(
    long_about = "Reads text exports (lookup bot dumps, numbered result lists, free text), \
extracts name, tax id, birth date and gender for every person found, derives ages \
and keeps the records matching the given filters.\n\n\
The report is written to <output-dir>/resultados.<ext>."
)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Options of the default extraction run.
#[derive(Debug, Clone, Default, Args)]
pub struct RunArgs {
    /// Input file, directory of exports, or '-' for stdin
    #[arg(value_name = "INPUT", conflicts_with = "termux")]
    pub input: Option<String>,

    /// Use the most recent export in the configured download folder
    #[arg(short, long)]
    pub termux: bool,

    /// Name to search for
    #[arg(short, long, value_name = "PATTERN")]
    pub name: Option<String>,

    /// How the name is compared
    #[arg(short, long, value_enum, default_value_t = NameMode::Exact)]
    pub mode: NameMode,

    /// Keep only this gender (M or F)
    #[arg(short = 's', long, value_parser = parse_gender)]
    pub gender: Option<Gender>,

    /// Minimum age, inclusive
    #[arg(long, visible_alias = "imn", default_value_t = DEFAULT_MIN_AGE)]
    pub min_age: u32,

    /// Maximum age, inclusive
    #[arg(long, visible_alias = "imx", default_value_t = DEFAULT_MAX_AGE)]
    pub max_age: u32,

    /// Print the report to stdout as well
    #[arg(short, long)]
    pub print: bool,

    /// Report format [default: from config, else text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Directory the report is written to [default: from config, else out]
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Extra phrase marking a line or value as "no data" (repeatable)
    #[arg(long, value_name = "PHRASE")]
    pub noise: Vec<String>,

    /// Skip the spelling pass on bot exports
    #[arg(long)]
    pub no_spelling: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write the default configuration if no file exists
    Init,
}
