//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Takeoff - Install take-off modules into a project
#[derive(Parser, Debug)]
#[command(name = "takeoff")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, env = "TAKEOFF_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file applied over the project's takeoff.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Install every take-off module the project depends on
    ///
    /// Registers each module's provider in the bootstrap file, merges its
    /// libraries into the manifest and runs or reports its setup command.
    #[command(visible_alias = "initialize", alias = "auto-install")]
    Install,

    /// List take-off modules and whether their provider is registered
    List,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_install_and_aliases() {
        for verb in ["install", "initialize", "auto-install"] {
            let cli = Cli::parse_from(["takeoff", verb]);
            assert_eq!(cli.command, Some(Commands::Install));
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["takeoff", "list", "--root", "/tmp/project", "-v"]);
        assert_eq!(cli.command, Some(Commands::List));
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/project")));
        assert!(cli.verbose);
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = Cli::parse_from(["takeoff"]);
        assert!(cli.command.is_none());
    }
}
