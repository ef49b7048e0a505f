//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// relaunch - launch history for package coordinates
///
/// Lists recently launched apps and answers whether a coordinate has a
/// fresh cached resolution.
#[derive(Parser, Debug)]
#[command(name = "relaunch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RELAUNCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the history file
    #[arg(long, global = true, env = "RELAUNCH_ROOT")]
    pub root: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show recently launched apps
    History(HistoryArgs),

    /// Remember a successful resolution
    Record(RecordArgs),

    /// Look up a fresh cached resolution
    Search(SearchArgs),

    /// Forget all launch history
    Clear(ClearArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Arguments for the history command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the record command
#[derive(Parser, Debug)]
pub struct RecordArgs {
    /// Coordinate group the entry is looked up by
    pub key: String,

    /// Fully resolved coordinate
    #[arg(short, long)]
    pub artifact: String,

    /// Resolved class path
    #[arg(long, default_value = "")]
    pub class_path: String,

    /// Display name (defaults to the key)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for the search command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Coordinate group to look up
    pub key: String,

    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the clear command
#[derive(Parser, Debug)]
pub struct ClearArgs {
    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for listings
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_record() {
        let cli = Cli::parse_from([
            "relaunch",
            "record",
            "com.github.spotbugs",
            "--artifact",
            "com.github.spotbugs:spotbugs:jar:1.2.3",
            "--class-path",
            "zzz.jar:xxx.jar",
        ]);
        match cli.command {
            Commands::Record(args) => {
                assert_eq!(args.key, "com.github.spotbugs");
                assert_eq!(args.class_path, "zzz.jar:xxx.jar");
                assert!(args.name.is_none());
                assert!(args.description.is_none());
            }
            _ => panic!("expected Record command"),
        }
    }

    #[test]
    fn cli_parses_history_format() {
        let cli = Cli::parse_from(["relaunch", "history", "--format", "json"]);
        match cli.command {
            Commands::History(args) => assert!(matches!(args.format, OutputFormat::Json)),
            _ => panic!("expected History command"),
        }
    }

    #[test]
    fn cli_parses_global_root() {
        let cli = Cli::parse_from(["relaunch", "clear", "--yes", "--root", "/tmp/relaunch"]);
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/relaunch")));
        assert!(matches!(cli.command, Commands::Clear(ClearArgs { yes: true })));
    }

    #[test]
    fn cli_requires_artifact() {
        assert!(Cli::try_parse_from(["relaunch", "record", "key"]).is_err());
    }
}
