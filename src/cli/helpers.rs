//! Shared helper functions for CLI commands

use miette::{IntoDiagnostic, Result};
use std::io::{self, BufRead, IsTerminal};
use std::path::Path;

use crate::cli::GlobalOpts;
use crate::core::config::Config;
use crate::core::entity::PushList;
use crate::core::paths::FontsRepo;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Read paths from stdin when it is piped
///
/// Returns `None` if stdin is a terminal or nothing was piped. Lines are
/// trimmed and blank lines skipped, so this composes with e.g.
/// ```bash
/// git diff --name-only main | gfpush normalize
/// ```
pub fn read_paths_from_stdin() -> Option<Vec<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }

    let paths: Vec<String> = stdin
        .lock()
        .lines()
        .map_while(|line| line.ok())
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect();

    if paths.is_empty() {
        None
    } else {
        Some(paths)
    }
}

/// Load configuration honouring `--config`
pub fn load_config(global: &GlobalOpts) -> Result<Config> {
    Config::load(global.config.as_deref()).into_diagnostic()
}

/// The fonts checkout: `--repo`, else `repo_root` from the config, else the current directory
pub fn fonts_repo(global: &GlobalOpts, config: &Config) -> FontsRepo {
    global
        .repo
        .clone()
        .or_else(|| config.repo_root.clone())
        .map(FontsRepo::new)
        .unwrap_or_default()
}

/// The list a manifest file stands for, from its file name
pub fn manifest_list(path: &Path) -> Option<PushList> {
    match path.file_stem()?.to_str()? {
        "to_sandbox" => Some(PushList::ToSandbox),
        "to_production" => Some(PushList::ToProduction),
        _ => None,
    }
}
