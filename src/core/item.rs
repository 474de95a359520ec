//! Push item - one tracked unit of change in the release pipeline

use serde::Serialize;

use crate::core::entity::{PushCategory, PushList, PushStatus};
use crate::core::paths::{FontsRepo, TrackedPath};

/// A family directory, designer profile or data file moving through the pipeline
///
/// Identity is the path alone: two items with the same path are the same
/// item whatever their category, status or url.
#[derive(Debug, Clone)]
pub struct PushItem {
    pub path: TrackedPath,
    pub category: PushCategory,
    /// Pipeline position observed on the board, `None` when unknown
    pub status: Option<PushStatus>,
    /// Pull request url, may be empty
    pub url: String,
    pub push_list: Option<PushList>,
    pub merged: Option<bool>,
    /// Board item id, only used to address board writes
    pub external_id: Option<String>,
}

impl PushItem {
    pub fn new(
        path: impl Into<TrackedPath>,
        category: PushCategory,
        status: Option<PushStatus>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            category,
            status,
            url: url.into(),
            push_list: None,
            merged: None,
            external_id: None,
        }
    }

    pub fn with_list(mut self, push_list: Option<PushList>) -> Self {
        self.push_list = push_list;
        self
    }

    pub fn with_merged(mut self, merged: Option<bool>) -> Self {
        self.merged = merged;
        self
    }

    pub fn with_external_id(mut self, id: impl Into<String>) -> Self {
        self.external_id = Some(id.into());
        self
    }

    /// Whether the item's files are present in the checkout
    pub fn exists(&self, repo: &FontsRepo) -> bool {
        repo.exists(&self.path)
    }

    pub fn to_summary(&self) -> ItemSummary {
        ItemSummary {
            path: self.path.to_string(),
            category: Some(self.category),
            status: self.status,
            url: (!self.url.is_empty()).then(|| self.url.clone()),
        }
    }
}

impl PartialEq for PushItem {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for PushItem {}

impl std::hash::Hash for PushItem {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Stable record view used for board listings and JSON/YAML export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSummary {
    pub path: String,
    pub category: Option<PushCategory>,
    pub status: Option<PushStatus>,
    pub url: Option<String>,
}
