//! Project board sync
//!
//! The board tracks one item per pull request. Each item carries the
//! pull request's changed files, labels, url and merged flag plus the board's
//! own Status and List fields. Items are flattened into one [`BoardRecord`]
//! per changed file and fed through [`PushItems::add`], so files of the same
//! family collapse into one push item.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::entity::{PushCategory, PushList, PushStatus};
use crate::core::item::PushItem;
use crate::core::paths::TrackedPath;
use crate::core::registry::PushItems;

/// Errors from the board transport
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("board query failed: {0}")]
    Graphql(String),

    #[error("unexpected board response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board returned an empty page after {fetched} of {total} items")]
    EmptyPage { fetched: usize, total: usize },

    #[error(transparent)]
    Config(#[from] crate::core::config::ConfigError),
}

/// Single-field updates on a board item
pub trait BoardWriter {
    fn set_status(&self, id: &str, status: PushStatus) -> Result<(), BoardError>;
    fn set_list(&self, id: &str, list: PushList) -> Result<(), BoardError>;
}

/// Read and write access to the project board
pub trait BoardClient: BoardWriter {
    /// Fetch one page of items, starting after `cursor`
    fn fetch_page(&self, cursor: Option<&str>) -> Result<BoardPage, BoardError>;
}

/// One page of board items
#[derive(Debug, Clone, Default)]
pub struct BoardPage {
    pub nodes: Vec<BoardNode>,
    pub end_cursor: Option<String>,
    pub total_count: usize,
}

/// A single-select field value on a board item
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldValue {
    pub name: Option<String>,
}

/// One board item as returned by the project query
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BoardNode {
    pub id: String,
    #[serde(default)]
    pub status: Option<FieldValue>,
    #[serde(default)]
    pub list: Option<FieldValue>,
    #[serde(default)]
    pub content: Option<PullRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub merged: Option<bool>,
    #[serde(default)]
    pub files: Option<Connection<ChangedFile>>,
    #[serde(default)]
    pub labels: Option<Connection<Label>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<T>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangedFile {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Label {
    pub name: String,
}

/// One changed file of a board item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRecord {
    pub path: TrackedPath,
    pub category: PushCategory,
    pub status: Option<PushStatus>,
    pub push_list: Option<PushList>,
    pub url: String,
    pub merged: Option<bool>,
    pub external_id: String,
}

impl From<BoardRecord> for PushItem {
    fn from(record: BoardRecord) -> Self {
        PushItem::new(record.path, record.category, record.status, record.url)
            .with_list(record.push_list)
            .with_merged(record.merged)
            .with_external_id(record.external_id)
    }
}

/// Pull request labels checked in order; the first present label decides
const LABEL_CATEGORIES: [(&str, PushCategory); 9] = [
    ("--- blocked", PushCategory::Blocked),
    ("I Font Upgrade", PushCategory::Upgrade),
    ("I Small Fix", PushCategory::Upgrade),
    ("I New Font", PushCategory::New),
    ("I Description/Metadata/OFL", PushCategory::Metadata),
    ("I Designer profile", PushCategory::DesignerProfile),
    ("I Knowledge", PushCategory::Knowledge),
    ("I Axis Registry", PushCategory::AxisRegistry),
    ("I Lang", PushCategory::SampleTexts),
];

/// Category of a pull request from its labels
pub fn category_from_labels<S: AsRef<str>>(labels: &[S]) -> PushCategory {
    LABEL_CATEGORIES
        .iter()
        .find(|(label, _)| labels.iter().any(|l| l.as_ref() == *label))
        .map(|(_, category)| *category)
        .unwrap_or(PushCategory::Other)
}

fn field_label<T: std::str::FromStr>(field: &Option<FieldValue>, node_id: &str) -> Option<T> {
    let name = field.as_ref()?.name.as_deref()?;
    match name.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(node = node_id, label = name, "ignoring unknown board field value");
            None
        }
    }
}

/// Flatten board items into one record per changed file, ordered by pull request url
pub fn records_from_nodes(mut nodes: Vec<BoardNode>) -> Vec<BoardRecord> {
    nodes.sort_by(|a, b| {
        let url = |n: &BoardNode| n.content.as_ref().map(|c| c.url.clone()).unwrap_or_default();
        url(a).cmp(&url(b))
    });

    let mut records = Vec::new();
    for node in nodes {
        let status = field_label::<PushStatus>(&node.status, &node.id);
        let push_list = field_label::<PushList>(&node.list, &node.id);

        let Some(pr) = node.content else {
            warn!(node = %node.id, "board item has no pull request, skipping");
            continue;
        };
        let Some(labels) = pr.labels else {
            warn!(node = %node.id, url = %pr.url, "pull request missing labels, skipping");
            continue;
        };
        let labels: Vec<String> = labels.nodes.into_iter().map(|l| l.name).collect();
        let category = category_from_labels(&labels);

        for file in pr.files.unwrap_or_default().nodes {
            records.push(BoardRecord {
                path: TrackedPath::new(&file.path),
                category,
                status,
                push_list,
                url: pr.url.clone(),
                merged: pr.merged,
                external_id: node.id.clone(),
            });
        }
    }
    records
}

impl PushItems {
    /// Build a registry from flattened board records
    pub fn from_board_records(records: impl IntoIterator<Item = BoardRecord>) -> Self {
        records.into_iter().map(PushItem::from).collect()
    }
}

/// Fetch every board item
///
/// An error on the first page is returned. Later pages are retried until they
/// succeed, pausing `retry_delay` between attempts, so a board that stays down
/// mid-pagination blocks this call.
pub fn fetch_all<C: BoardClient + ?Sized>(
    client: &C,
    retry_delay: Duration,
) -> Result<Vec<BoardNode>, BoardError> {
    info!("getting push items from the board");
    let first = client.fetch_page(None)?;
    let total = first.total_count;
    let mut cursor = first.end_cursor;
    let mut nodes = first.nodes;

    while nodes.len() < total {
        let page = loop {
            match client.fetch_page(cursor.as_deref()) {
                Ok(page) => break page,
                Err(e) => {
                    warn!(error = %e, cursor = ?cursor, "board page fetch failed, retrying");
                    std::thread::sleep(retry_delay);
                }
            }
        };
        if page.nodes.is_empty() {
            return Err(BoardError::EmptyPage {
                fetched: nodes.len(),
                total,
            });
        }
        nodes.extend(page.nodes);
        cursor = page.end_cursor;
        info!(fetched = nodes.len(), total, cursor = ?cursor, "fetched board page");
    }
    Ok(nodes)
}

/// Fetch the board and build its registry
pub fn load_board<C: BoardClient + ?Sized>(
    client: &C,
    retry_delay: Duration,
) -> Result<PushItems, BoardError> {
    let nodes = fetch_all(client, retry_delay)?;
    Ok(PushItems::from_board_records(records_from_nodes(nodes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, url: &str, labels: &[&str], files: &[&str]) -> BoardNode {
        let json = serde_json::json!({
            "id": id,
            "status": { "name": "In Dev / PR Merged" },
            "list": { "name": "to_sandbox" },
            "content": {
                "url": url,
                "merged": true,
                "files": { "nodes": files.iter().map(|p| serde_json::json!({ "path": p })).collect::<Vec<_>>() },
                "labels": { "nodes": labels.iter().map(|l| serde_json::json!({ "name": l })).collect::<Vec<_>>() },
            }
        });
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_category_from_labels_precedence() {
        assert_eq!(
            category_from_labels(&["I New Font", "--- blocked"]),
            PushCategory::Blocked
        );
        assert_eq!(
            category_from_labels(&["I New Font", "I Small Fix"]),
            PushCategory::Upgrade
        );
        assert_eq!(category_from_labels(&["I Lang"]), PushCategory::SampleTexts);
        assert_eq!(category_from_labels::<&str>(&[]), PushCategory::Other);
    }

    #[test]
    fn test_records_from_nodes_flattens_files() {
        let nodes = vec![
            node("B", "https://github.com/google/fonts/pull/9", &["I New Font"], &["ofl/b/B.ttf"]),
            node(
                "A",
                "https://github.com/google/fonts/pull/10",
                &["I Font Upgrade"],
                &["ofl/a/A[wght].ttf", "ofl/a/METADATA.pb"],
            ),
        ];
        let records = records_from_nodes(nodes);
        assert_eq!(records.len(), 3);
        // sorted by url as text
        assert_eq!(records[0].external_id, "A");
        assert_eq!(records[0].category, PushCategory::Upgrade);
        assert_eq!(records[0].status, Some(PushStatus::InDev));
        assert_eq!(records[0].push_list, Some(PushList::ToSandbox));
        assert_eq!(records[2].path.as_str(), "ofl/b/B.ttf");

        let items = PushItems::from_board_records(records);
        assert_eq!(items.len(), 2);
        let a = items.get(&TrackedPath::new("ofl/a")).unwrap();
        assert_eq!(a.external_id.as_deref(), Some("A"));
        assert_eq!(a.merged, Some(true));
    }

    #[test]
    fn test_nodes_without_labels_are_skipped() {
        let mut draft = node("C", "u", &[], &["ofl/c/C.ttf"]);
        draft.content.as_mut().unwrap().labels = None;
        let issue = BoardNode {
            id: "D".to_string(),
            ..Default::default()
        };
        assert!(records_from_nodes(vec![draft, issue]).is_empty());
    }

    #[test]
    fn test_unknown_field_values_become_none() {
        let json = serde_json::json!({
            "id": "E",
            "status": { "name": "Somewhere else" },
            "list": {},
            "content": { "url": "u", "labels": { "nodes": [] }, "files": { "nodes": [{ "path": "ofl/e/E.ttf" }] } }
        });
        let records = records_from_nodes(vec![serde_json::from_value(json).unwrap()]);
        assert_eq!(records[0].status, None);
        assert_eq!(records[0].push_list, None);
        assert_eq!(records[0].category, PushCategory::Other);
    }
}
