//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use gfpush::core::{PushCategory, PushItem, PushItems};

/// Helper to get a gfpush command
pub fn gfpush() -> Command {
    Command::new(cargo::cargo_bin!("gfpush"))
}

/// Helper to get a gfpush command with an empty config, isolated from ~/.gf_push_config.yaml
pub fn gfpush_in(tmp: &TempDir) -> Command {
    let config = tmp.path().join("gf_push_config.yaml");
    if !config.exists() {
        std::fs::write(&config, "").unwrap();
    }
    let mut cmd = gfpush();
    cmd.current_dir(tmp.path()).arg("--config").arg(config);
    cmd
}

/// Write a manifest file into the temp directory
pub fn write_manifest(tmp: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = tmp.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Create files (and their parent directories) under `root`
pub fn touch(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, "").unwrap();
    }
}

pub fn item(path: &str, category: PushCategory, url: &str) -> PushItem {
    PushItem::new(path, category, None, url)
}

/// Paths of a registry in insertion order
pub fn paths(items: &PushItems) -> Vec<String> {
    items.iter().map(|i| i.path.to_string()).collect()
}
