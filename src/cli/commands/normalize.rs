//! `gfpush normalize` - canonical push paths of raw repository paths
//!
//! Paths are run through the same insertion rules as a registry, so nested
//! files collapse into their family and untracked paths are dropped.

use clap::Args;
use miette::{bail, Result};

use crate::cli::helpers::read_paths_from_stdin;
use crate::cli::output::print_items;
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::entity::PushCategory;
use crate::core::item::PushItem;
use crate::core::registry::PushItems;

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Repository paths (read from stdin when omitted)
    pub paths: Vec<String>,

    /// Category given to the items, by display name (e.g. "Upgrade")
    #[arg(long, default_value = "Other")]
    pub category: PushCategory,
}

pub fn run(args: NormalizeArgs, global: &GlobalOpts) -> Result<()> {
    let paths = if args.paths.is_empty() {
        match read_paths_from_stdin() {
            Some(paths) => paths,
            None => bail!("no paths given; pass them as arguments or on stdin"),
        }
    } else {
        args.paths
    };

    let items: PushItems = paths
        .iter()
        .map(|p| PushItem::new(p.as_str(), args.category, None, ""))
        .collect();

    let format = match global.output {
        OutputFormat::Auto => OutputFormat::Path,
        f => f,
    };
    print_items(&items, format, true)
}
