//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::board::{BoardArgs, SetStatusArgs};
use crate::cli::commands::check::CheckArgs;
use crate::cli::commands::completions::CompletionsArgs;
use crate::cli::commands::merge::{DiffArgs, MergeArgs};
use crate::cli::commands::normalize::NormalizeArgs;
use crate::cli::commands::show::ShowArgs;
use crate::cli::commands::sync::SyncArgs;

/// Track font families through the Google Fonts release pipeline
#[derive(Parser, Debug)]
#[command(name = "gfpush", version, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Config file (defaults to ~/.gf_push_config.yaml)
    #[arg(long, global = true, env = "GF_PUSH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Root of the google/fonts checkout (overrides repo_root in the config)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value_t = OutputFormat::Auto)]
    pub output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Table for listings, manifest text for registries
    #[default]
    Auto,
    Table,
    Json,
    Yaml,
    Csv,
    /// One canonical path per line
    Path,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the canonical push paths of raw repository paths
    Normalize(NormalizeArgs),

    /// List the items of a manifest
    Show(ShowArgs),

    /// Report manifest items whose files are missing from the checkout
    Check(CheckArgs),

    /// Union of two manifests
    Merge(MergeArgs),

    /// Items of the first manifest that are not in the second
    Diff(DiffArgs),

    /// Fetch the project board and write its items as a manifest
    Sync(SyncArgs),

    /// Move board items one step along to_sandbox → to_production
    Bump(BoardArgs),

    /// Move board items to the blocked list
    Block(BoardArgs),

    /// Set the Status field of board items
    SetStatus(SetStatusArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["gfpush", "show", "to_sandbox.txt", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.global.output, OutputFormat::Json);
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Show(_)));
    }
}
