//! `gfpush merge` / `gfpush diff` - set operations on manifests

use clap::Args;
use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::output::print_items;
use crate::cli::GlobalOpts;
use crate::core::manifest::{read_manifest, write_manifest};
use crate::core::registry::PushItems;

#[derive(Args, Debug)]
pub struct MergeArgs {
    /// First manifest
    pub a: PathBuf,

    /// Second manifest; its items win over matching items of the first
    pub b: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Manifest to take items from
    pub a: PathBuf,

    /// Manifest whose items are removed
    pub b: PathBuf,

    /// Write the result to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn read_pair(a: &Path, b: &Path) -> Result<(PushItems, PushItems)> {
    let left = read_manifest(a, None, None).into_diagnostic()?;
    let right = read_manifest(b, None, None).into_diagnostic()?;
    Ok((left, right))
}

/// Write to `out` when given, otherwise print
pub fn emit(items: &PushItems, out: Option<&Path>, global: &GlobalOpts) -> Result<()> {
    match out {
        Some(path) => {
            write_manifest(path, items).into_diagnostic()?;
            println!(
                "{} Wrote {} item(s) to {}",
                style("✓").green(),
                items.len(),
                style(path.display()).cyan()
            );
            Ok(())
        }
        None => print_items(items, global.output, false),
    }
}

pub fn run_merge(args: MergeArgs, global: &GlobalOpts) -> Result<()> {
    let (a, b) = read_pair(&args.a, &args.b)?;
    emit(&a.union(&b), args.out.as_deref(), global)
}

pub fn run_diff(args: DiffArgs, global: &GlobalOpts) -> Result<()> {
    let (a, b) = read_pair(&args.a, &args.b)?;
    emit(&a.difference(&b), args.out.as_deref(), global)
}
