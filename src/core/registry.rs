//! Push item registry
//!
//! An ordered, path-keyed collection of [`PushItem`]s. Every insertion goes
//! through [`PushItems::add`], which normalizes the item's path and keeps the
//! invariant that no two members share a path and no member is an ancestor
//! directory of another.

use std::path::PathBuf;
use tracing::debug;

use crate::core::entity::{PushCategory, PushList, PushStatus};
use crate::core::item::PushItem;
use crate::core::paths::{normalize, FontsRepo, TrackedPath};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PushItems {
    items: Vec<PushItem>,
}

impl PushItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PushItem> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, PushItem> {
        self.items.iter_mut()
    }

    pub fn get(&self, path: &TrackedPath) -> Option<&PushItem> {
        self.items.iter().find(|i| &i.path == path)
    }

    pub fn get_mut(&mut self, path: &TrackedPath) -> Option<&mut PushItem> {
        self.items.iter_mut().find(|i| &i.path == path)
    }

    pub fn contains(&self, item: &PushItem) -> bool {
        self.items.contains(item)
    }

    /// Insert an item, replacing any member it supersedes
    ///
    /// The path is normalized first and the item is dropped if it is not a
    /// release-tracked unit. An existing member with the same path is replaced.
    /// If a member already tracks a descendant of the incoming path, the
    /// incoming item is dropped. Otherwise the first member that is an
    /// ancestor of the incoming path is evicted and the item is appended.
    pub fn add(&mut self, mut item: PushItem) {
        let Some(path) = normalize(&item.path) else {
            debug!(path = %item.path, "discarding untracked path");
            return;
        };
        item.path = path;

        if let Some(idx) = self.items.iter().position(|i| i.path == item.path) {
            self.items.remove(idx);
        }

        if let Some(child) = self.items.iter().find(|i| item.path.is_ancestor_of(&i.path)) {
            debug!(path = %item.path, child = %child.path, "already tracked through a descendant");
            return;
        }

        // First match only; the invariant allows at most one ancestor anyway
        if let Some(idx) = self.items.iter().position(|i| i.path.is_ancestor_of(&item.path)) {
            let evicted = self.items.remove(idx);
            debug!(path = %item.path, ancestor = %evicted.path, "evicting ancestor");
        }

        self.items.push(item);
    }

    /// Every member of `self` then every member of `other`, replayed through `add`
    pub fn union(&self, other: &PushItems) -> PushItems {
        let mut merged = self.clone();
        merged.extend(other.iter().cloned());
        merged
    }

    /// Members of `self` whose path does not appear in `other`
    pub fn difference(&self, other: &PushItems) -> PushItems {
        self.filtered(|i| !other.contains(i))
    }

    fn filtered(&self, predicate: impl Fn(&PushItem) -> bool) -> PushItems {
        PushItems {
            items: self.items.iter().filter(|&i| predicate(i)).cloned().collect(),
        }
    }

    pub fn to_sandbox(&self) -> PushItems {
        self.filtered(|i| i.push_list == Some(PushList::ToSandbox))
    }

    pub fn to_production(&self) -> PushItems {
        self.filtered(|i| i.push_list == Some(PushList::ToProduction))
    }

    pub fn in_dev(&self) -> PushItems {
        self.filtered(|i| i.status == Some(PushStatus::InDev))
    }

    pub fn in_sandbox(&self) -> PushItems {
        self.filtered(|i| i.status == Some(PushStatus::InSandbox))
    }

    pub fn live(&self) -> PushItems {
        self.filtered(|i| i.status == Some(PushStatus::Live))
    }

    /// Filesystem paths of non-deleted members that are absent from the checkout
    pub fn missing_paths(&self, repo: &FontsRepo) -> Vec<PathBuf> {
        self.items
            .iter()
            .filter(|i| i.category != PushCategory::Deleted)
            .map(|i| repo.repo_path(&i.path))
            .filter(|p| !p.exists())
            .collect()
    }

    /// Re-categorise members absent from the checkout as deleted
    ///
    /// Blocked members keep their category. Returns how many were changed.
    pub fn mark_missing_deleted(&mut self, repo: &FontsRepo) -> usize {
        let mut marked = 0;
        for item in self
            .items
            .iter_mut()
            .filter(|i| !matches!(i.category, PushCategory::Blocked | PushCategory::Deleted))
        {
            if !item.exists(repo) {
                debug!(path = %item.path, "marking missing item as deleted");
                item.category = PushCategory::Deleted;
                marked += 1;
            }
        }
        marked
    }
}

impl Extend<PushItem> for PushItems {
    fn extend<T: IntoIterator<Item = PushItem>>(&mut self, iter: T) {
        for item in iter {
            self.add(item);
        }
    }
}

impl FromIterator<PushItem> for PushItems {
    fn from_iter<T: IntoIterator<Item = PushItem>>(iter: T) -> Self {
        let mut items = PushItems::new();
        items.extend(iter);
        items
    }
}

impl IntoIterator for PushItems {
    type Item = PushItem;
    type IntoIter = std::vec::IntoIter<PushItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a PushItems {
    type Item = &'a PushItem;
    type IntoIter = std::slice::Iter<'a, PushItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
