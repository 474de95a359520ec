//! Manifest codec - the plain-text snapshot of a registry
//!
//! ```text
//! # New
//! ofl/newfamily # https://github.com/google/fonts/pull/46
//!
//! # Upgrade
//! ofl/mavenpro # https://github.com/google/fonts/pull/45
//!
//! # Deleted
//! # Deleted: ofl/oldfamily # https://github.com/google/fonts/pull/12
//! ```
//!
//! A manifest records path, category and url only. Status and list are not
//! recovered on decode; callers tag every decoded item with the status and
//! list they supply.

use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

use crate::core::entity::{PushCategory, PushList, PushStatus};
use crate::core::item::PushItem;
use crate::core::registry::PushItems;

const DELETED_PREFIX: &str = "# Deleted:";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Render a registry as manifest text
///
/// Groups follow category declaration order, members within a group are
/// sorted by path. Blocked members are never written.
pub fn encode(items: &PushItems) -> String {
    let mut groups: BTreeMap<PushCategory, Vec<&PushItem>> = BTreeMap::new();
    for item in items.iter().filter(|i| i.category != PushCategory::Blocked) {
        groups.entry(item.category).or_default().push(item);
    }

    let mut lines = Vec::new();
    for (category, mut members) in groups {
        members.sort_by(|a, b| a.path.as_str().cmp(b.path.as_str()));
        lines.push(format!("# {}", category.display_name()));
        for item in members {
            lines.push(encode_line(item));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

fn encode_line(item: &PushItem) -> String {
    let deleted = item.category == PushCategory::Deleted;
    match (deleted, item.url.is_empty()) {
        (true, false) => format!("{} {} # {}", DELETED_PREFIX, item.path, item.url),
        (true, true) => format!("{} {}", DELETED_PREFIX, item.path),
        (false, false) => format!("{} # {}", item.path, item.url),
        (false, true) => item.path.to_string(),
    }
}

/// Parse manifest text into a registry
///
/// Parsing is lenient: lines without a url are bare paths, `#` lines that do
/// not name a category are ignored, and lines before any header fall under
/// [`PushCategory::Other`].
pub fn decode(text: &str, status: Option<PushStatus>, push_list: Option<PushList>) -> PushItems {
    let mut results = PushItems::new();
    let mut category = PushCategory::Other;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    for raw in text.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let (data, deleted) = match line.strip_prefix(DELETED_PREFIX) {
            Some(rest) => (rest, true),
            None => {
                if let Some(header) = line.strip_prefix('#') {
                    match PushCategory::from_display_name(header.trim()) {
                        Some(c) => category = c,
                        None => debug!(line, "ignoring manifest comment"),
                    }
                    continue;
                }
                (line, false)
            }
        };

        let (path, url) = match data.split_once('#') {
            Some((path, url)) => (path.trim(), url.trim()),
            None => (data.trim(), ""),
        };
        let item_category = if deleted { PushCategory::Deleted } else { category };
        results.add(PushItem::new(path, item_category, status, url).with_list(push_list));
    }
    results
}

/// Read and decode a manifest file
pub fn read_manifest(
    path: &Path,
    status: Option<PushStatus>,
    push_list: Option<PushList>,
) -> Result<PushItems, ManifestError> {
    let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(decode(&text, status, push_list))
}

/// Encode and write a manifest file
pub fn write_manifest(path: &Path, items: &PushItems) -> Result<(), ManifestError> {
    std::fs::write(path, encode(items)).map_err(|source| ManifestError::Write {
        path: path.display().to_string(),
        source,
    })
}
