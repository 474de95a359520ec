//! `gfpush sync` - fetch the project board and write it as a manifest

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::warn;

use crate::cli::commands::merge::emit;
use crate::cli::filters::ListFilter;
use crate::cli::helpers::{fonts_repo, load_config};
use crate::cli::GlobalOpts;
use crate::core::board::load_board;
use crate::core::github::GhBoardClient;

#[derive(Args, Debug)]
pub struct SyncArgs {
    /// Which board items to keep
    #[arg(long, short = 'f', value_enum, default_value_t = ListFilter::All)]
    pub filter: ListFilter,

    /// Write the manifest to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Keep the board category of items missing from the checkout
    #[arg(long)]
    pub keep_missing: bool,
}

pub fn run(args: SyncArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let repo = fonts_repo(global, &config);
    let client = GhBoardClient::new(config.board.clone()).with_verbose(global.verbose > 1);

    let board = load_board(&client, config.retry_delay()).into_diagnostic()?;
    let mut items = args.filter.apply(&board);

    if !args.keep_missing {
        let marked = items.mark_missing_deleted(&repo);
        if marked > 0 {
            warn!(count = marked, repo = %repo.root().display(), "items missing from checkout marked as deleted");
            eprintln!(
                "{} {} item(s) not found under {}, marked as deleted",
                style("!").yellow(),
                marked,
                repo.root().display()
            );
        }
    }

    emit(&items, args.out.as_deref(), global)
}
