//! Takeoff CLI
//!
//! Installs take-off modules into the project they are required by.

mod cli;
mod commands;
mod error;
mod reporter;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, root, cli.config),
        None => {
            println!("{} take-off module installer", "takeoff".green().bold());
            println!();
            println!("Run {} for available commands.", "takeoff --help".cyan());
            Ok(())
        }
    }
}

fn execute_command(cmd: Commands, root: PathBuf, config: Option<PathBuf>) -> Result<()> {
    match cmd {
        Commands::Install => commands::run_install(&root, config.as_deref()),
        Commands::List => commands::run_list(&root, config.as_deref()),
    }
}

/// `-v` logs the takeoff crates at debug level; otherwise `RUST_LOG` applies,
/// falling back to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("takeoff=debug,takeoff_core=debug,takeoff_fs=debug,takeoff_patch=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("{} tracing subscriber already set", "warning:".yellow().bold());
    }
    tracing::debug!("Verbose mode enabled");
}
