//! `gfpush check` - find manifest items missing from the checkout

use clap::Args;
use console::style;
use miette::{bail, IntoDiagnostic, Result};
use std::path::PathBuf;
use tracing::warn;

use crate::cli::helpers::{fonts_repo, load_config};
use crate::cli::GlobalOpts;
use crate::core::manifest::read_manifest;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Manifest file to check
    pub manifest: PathBuf,
}

pub fn run(args: CheckArgs, global: &GlobalOpts) -> Result<()> {
    let config = load_config(global)?;
    let repo = fonts_repo(global, &config);
    let items = read_manifest(&args.manifest, None, None).into_diagnostic()?;

    let missing = items.missing_paths(&repo);
    if missing.is_empty() {
        println!(
            "{} all {} item(s) in {} exist",
            style("✓").green(),
            items.len(),
            args.manifest.display()
        );
        return Ok(());
    }

    for path in &missing {
        warn!(path = %path.display(), "missing from checkout");
        println!("{} {}", style("✗").red(), path.display());
    }
    bail!(
        "{} of {} item(s) in {} are missing from {}",
        missing.len(),
        items.len(),
        args.manifest.display(),
        repo.root().display()
    )
}
