//! Command line interface definition

use bitcheck_check::{RunMode, RunPhases};
use bitcheck_types::ColorChoice;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// bitcheck - Integrity verification for media collections
#[derive(Parser)]
#[command(name = "bitcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Integrity verification for media collections")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Global arguments available for all commands
#[derive(Parser)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Write debug logs to the log directory
    #[arg(long, global = true)]
    pub debug: bool,

    /// Color output control
    #[arg(long, global = true, value_enum)]
    pub color: Option<ColorChoice>,

    /// Use alternate config file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Use alternate library database
    #[arg(long, global = true, value_name = "PATH")]
    pub library: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Verify checksums and run integrity validators
    Check(CheckArgs),

    /// Register files or directories in the library
    Import {
        /// Files or directories to import
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List items in the library
    #[command(alias = "list")]
    Ls {
        /// Filter terms (`type:<media>` or path substrings)
        query: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Add checksums for items that have none
    #[arg(short, long, conflicts_with = "update")]
    pub add: bool,

    /// Recompute and store every checksum without asking
    #[arg(short, long)]
    pub force: bool,

    /// Recompute every checksum after confirmation
    #[arg(short, long)]
    pub update: bool,

    /// Only run integrity validators
    #[arg(short, long)]
    pub integrity: bool,

    /// Print stored checksums instead of checking
    #[arg(
        short,
        long,
        conflicts_with_all = ["add", "force", "update", "integrity", "list_tools"]
    )]
    pub export: bool,

    /// Show which validators are available
    #[arg(
        short = 'l',
        long,
        conflicts_with_all = ["add", "force", "update", "integrity"]
    )]
    pub list_tools: bool,

    /// Suppress progress and the summary line
    #[arg(short, long)]
    pub quiet: bool,

    /// Files checked concurrently (0 = number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Filter terms (`type:<media>` or path substrings)
    pub query: Vec<String>,
}

impl CheckArgs {
    pub fn run_mode(&self) -> RunMode {
        RunMode::from_flags(self.add, self.force, self.update)
    }

    pub fn phases(&self, integrity_enabled: bool) -> RunPhases {
        RunPhases::select(self.integrity, integrity_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("bitcheck").chain(args.iter().copied()))
    }

    fn check_args(args: &[&str]) -> CheckArgs {
        match parse(args).unwrap().command {
            Commands::Check(args) => args,
            _ => panic!("expected check command"),
        }
    }

    #[test]
    fn test_force_wins_over_update() {
        let args = check_args(&["check", "-f", "-u"]);
        assert_eq!(args.run_mode(), RunMode::Force);
    }

    #[test]
    fn test_query_and_jobs() {
        let args = check_args(&["check", "-j", "3", "type:mp3", "Beatles"]);
        assert_eq!(args.jobs, Some(3));
        assert_eq!(args.query, vec!["type:mp3", "Beatles"]);
        assert_eq!(args.phases(true), RunPhases::Both);
        assert_eq!(args.phases(false), RunPhases::ChecksumOnly);
    }

    #[test]
    fn test_conflicting_flags_rejected() {
        assert!(parse(&["check", "-a", "-u"]).is_err());
        assert!(parse(&["check", "-e", "-f"]).is_err());
        assert!(parse(&["check", "-l", "-i"]).is_err());
        assert!(parse(&["import"]).is_err());
    }

    #[test]
    fn test_global_flags_after_command() {
        let cli = parse(&["check", "--json", "--library", "/tmp/l.db"]).unwrap();
        assert!(cli.global.json);
        assert_eq!(cli.global.library, Some(PathBuf::from("/tmp/l.db")));
    }
}
