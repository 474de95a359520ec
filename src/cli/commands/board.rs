//! `gfpush bump` / `block` / `set-status` - move board items
//!
//! Items are selected by canonical path from a fresh board fetch, so
//! `ofl/abel/METADATA.pb` selects the `ofl/abel` item.

use clap::Args;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::{bail, IntoDiagnostic, Result};

use crate::cli::filters::StatusArg;
use crate::cli::helpers::load_config;
use crate::cli::GlobalOpts;
use crate::core::board::load_board;
use crate::core::entity::{PushList, PushStatus};
use crate::core::github::GhBoardClient;
use crate::core::item::PushItem;
use crate::core::paths::{normalize, TrackedPath};
use crate::core::registry::PushItems;
use crate::core::workflow::{next_list, ListWorkflow, Transition};

#[derive(Args, Debug)]
pub struct BoardArgs {
    /// Paths of the items to move (any file inside an item selects it)
    #[arg(required = true)]
    pub paths: Vec<String>,

    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Debug)]
pub struct SetStatusArgs {
    /// New Status value
    #[arg(value_enum)]
    pub status: StatusArg,

    #[command(flatten)]
    pub target: BoardArgs,
}

/// Requested change, applied to every selected item
#[derive(Debug, Clone, Copy)]
enum Action {
    Bump,
    Block,
    SetStatus(PushStatus),
}

impl Action {
    /// One-line description of what applying the action to `item` does
    fn describe(&self, item: &PushItem) -> String {
        let list = |l: Option<PushList>| l.map(|l| l.to_string()).unwrap_or_else(|| "-".to_string());
        match self {
            Action::Bump => match next_list(item.push_list) {
                Some(next) if Some(next) == item.push_list => {
                    format!("already on {}, unchanged", next)
                }
                Some(next) => format!("list {} → {}", list(item.push_list), next),
                None => "blocked, cannot bump".to_string(),
            },
            Action::Block => format!("list {} → {}", list(item.push_list), PushList::Blocked),
            Action::SetStatus(status) => {
                let current = item.status.map(|s| s.to_string()).unwrap_or_else(|| "-".to_string());
                format!("status {} → {}", current, status)
            }
        }
    }
}

pub fn run_bump(args: BoardArgs, global: &GlobalOpts) -> Result<()> {
    run_action(Action::Bump, args, global)
}

pub fn run_block(args: BoardArgs, global: &GlobalOpts) -> Result<()> {
    run_action(Action::Block, args, global)
}

pub fn run_set_status(args: SetStatusArgs, global: &GlobalOpts) -> Result<()> {
    run_action(Action::SetStatus(args.status.into()), args.target, global)
}

/// Canonical paths of the requested items, in argument order without repeats
fn select(board: &PushItems, raw: &[String]) -> Result<Vec<TrackedPath>> {
    let mut selected = Vec::new();
    for raw_path in raw {
        let Some(path) = normalize(&TrackedPath::new(raw_path)) else {
            bail!("'{}' is not a release-tracked path", raw_path);
        };
        if board.get(&path).is_none() {
            bail!("'{}' is not on the board", path);
        }
        if !selected.contains(&path) {
            selected.push(path);
        }
    }
    Ok(selected)
}

fn run_action(action: Action, args: BoardArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let client = GhBoardClient::new(config.board.clone()).with_verbose(global.verbose > 1);
    let mut board = load_board(&client, config.retry_delay()).into_diagnostic()?;

    let selected = select(&board, &args.paths)?;

    println!("{}:", if args.dry_run { "Would apply" } else { "Will apply" });
    for path in &selected {
        if let Some(item) = board.get(path) {
            println!("  {} {}", style(path).cyan(), action.describe(item));
        }
    }

    if args.dry_run {
        println!("\nNo changes made (dry run).");
        return Ok(());
    }

    if !args.yes {
        let proceed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Proceed?")
            .default(false)
            .interact()
            .into_diagnostic()?;
        if !proceed {
            println!("Aborted.");
            return Ok(());
        }
    }

    let workflow = ListWorkflow::new(&client);
    for path in &selected {
        let Some(item) = board.get_mut(path) else {
            continue;
        };
        match action {
            Action::Bump => report(path, workflow.bump(item).into_diagnostic()?),
            Action::Block => report(path, workflow.block(item).into_diagnostic()?),
            Action::SetStatus(status) => {
                workflow.publish_status(item, status).into_diagnostic()?;
                println!("{} {} status set to {}", style("✓").green(), style(path).cyan(), status);
            }
        }
    }
    Ok(())
}

fn report(path: &TrackedPath, transition: Transition) {
    match transition {
        Transition::Moved { to, .. } => {
            println!("{} {} moved to {}", style("✓").green(), style(path).cyan(), to);
        }
        Transition::Unchanged(list) => {
            println!("{} {} already on {}", style("-").dim(), style(path).cyan(), list);
        }
    }
}
