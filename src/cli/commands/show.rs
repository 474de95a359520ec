//! `gfpush show` - list the items of a manifest

use clap::Args;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

use crate::cli::filters::ListFilter;
use crate::cli::helpers::manifest_list;
use crate::cli::output::print_items;
use crate::cli::GlobalOpts;
use crate::core::manifest::read_manifest;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Manifest file (e.g. to_sandbox.txt)
    pub manifest: PathBuf,

    /// Only show items matching this filter
    #[arg(long, short = 'f', value_enum, default_value_t = ListFilter::All)]
    pub filter: ListFilter,
}

pub fn run(args: ShowArgs, global: &GlobalOpts) -> Result<()> {
    // to_sandbox.txt / to_production.txt tag their items with the matching list
    let items = read_manifest(&args.manifest, None, manifest_list(&args.manifest)).into_diagnostic()?;
    print_items(&args.filter.apply(&items), global.output, true)
}
