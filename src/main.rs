//! filtrapx binary entry point

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use filtrapx::cli::{Cli, Commands, ConfigCommands};

/// Environment variable holding a tracing filter (e.g. `filtrapx=debug`).
const LOG_ENV: &str = "FILTRAPX_LOG";

/// Log to stderr so reports on stdout stay clean.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Config(ConfigCommands::Show)) => commands::config::handle_show(),
        Some(Commands::Config(ConfigCommands::Path)) => commands::config::handle_path(),
        Some(Commands::Config(ConfigCommands::Init)) => commands::config::handle_init(),
        Some(Commands::Completions { shell }) => {
            commands::completions::handle(shell);
            Ok(())
        }
        None => commands::run::handle(&cli.run),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
