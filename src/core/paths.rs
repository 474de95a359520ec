//! Canonical release-unit paths
//!
//! Raw changed-file paths coming from pull requests or manifest lines are
//! collapsed into the directory or data file that is actually released:
//!
//! - `ofl/mavenpro/MavenPro[wght].ttf` → `ofl/mavenpro`
//! - `ofl/notosans/article/index.html` → `ofl/notosans`
//! - `axisregistry/Lib/axisregistry/data/bounce.textproto` → `axisregistry/bounce.textproto`
//!
//! Data trees (`lang`, `axisregistry`) are tracked in a shortened layout that
//! [`FontsRepo`] maps back to the checkout on disk.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Segments naming auxiliary asset trees nested in a family directory
const AUXILIARY_DIRS: [&str; 2] = ["article", "static"];

/// Segments under which each child directory is one family or designer
const FAMILY_ROOTS: [&str; 4] = ["ofl", "ufl", "apache", "designers"];

/// File types that belong to a family or designer directory
pub const FAMILY_FILE_SUFFIXES: [&str; 7] = [".ttf", ".otf", ".html", ".pb", ".txt", ".yaml", ".png"];

/// Python package data trees, tracked only through their `.textproto` files
const DATA_TREES: [(&str, &str); 2] = [("lang", "gflanguages"), ("axisregistry", "axisregistry")];

const DATA_SUFFIX: &str = ".textproto";

/// A relative, forward-slash separated path used as a push item's identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackedPath(String);

impl TrackedPath {
    /// Build a path from raw text, accepting `\` separators and dropping
    /// empty, `.` and `..` segments
    pub fn new(raw: &str) -> Self {
        let normalized = raw.replace('\\', "/");
        let segments: Vec<&str> = normalized
            .split('/')
            .filter(|s| !matches!(*s, "" | "." | ".."))
            .collect();
        Self::from_segments(&segments)
    }

    fn from_segments(segments: &[&str]) -> Self {
        Self(segments.join("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Number of path segments
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Extension of the final segment including the dot, e.g. `.ttf`
    pub fn suffix(&self) -> Option<&str> {
        let name = self.file_name()?;
        match name.rfind('.') {
            Some(idx) if idx > 0 && idx < name.len() - 1 => Some(&name[idx..]),
            _ => None,
        }
    }

    pub fn parent(&self) -> Option<TrackedPath> {
        let segments: Vec<&str> = self.segments().collect();
        if segments.len() < 2 {
            return None;
        }
        Some(Self::from_segments(&segments[..segments.len() - 1]))
    }

    /// True when `self` is a strict ancestor directory of `other`
    pub fn is_ancestor_of(&self, other: &TrackedPath) -> bool {
        if self.is_empty() {
            return !other.is_empty();
        }
        other
            .as_str()
            .strip_prefix(self.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    fn contains_segment(&self, names: &[&str]) -> bool {
        self.segments().any(|s| names.contains(&s))
    }

    fn position_of(&self, names: &[&str]) -> Option<usize> {
        self.segments().position(|s| names.contains(&s))
    }

    pub fn to_path_buf(&self) -> PathBuf {
        self.segments().collect()
    }
}

impl std::fmt::Display for TrackedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackedPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for TrackedPath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&Path> for TrackedPath {
    fn from(path: &Path) -> Self {
        let segments: Vec<String> = path
            .components()
            .filter_map(|c| match c {
                std::path::Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();
        Self(segments.join("/"))
    }
}

fn data_tree_names() -> [&'static str; 2] {
    DATA_TREES.map(|(tree, _)| tree)
}

/// Map the canonical path of a raw changed file
///
/// Returns `None` when the path is not a release-tracked unit. Rules are
/// checked in order and the first match wins; a single-segment result (a
/// category root such as `ofl`) is always discarded.
pub fn normalize(path: &TrackedPath) -> Option<TrackedPath> {
    let segments: Vec<&str> = path.segments().collect();
    let suffix = path.suffix();
    let data_trees = data_tree_names();

    let canonical = if let Some(idx) = path.position_of(&AUXILIARY_DIRS) {
        // Everything from the asset tree down belongs to its family
        TrackedPath::from_segments(&segments[..idx])
    } else if let Some(root) = path
        .position_of(&FAMILY_ROOTS)
        .filter(|_| suffix.is_some_and(|s| FAMILY_FILE_SUFFIXES.contains(&s)))
    {
        let parent_len = segments.len() - 1;
        TrackedPath::from_segments(&segments[..parent_len.min(root + 2)])
    } else if path.contains_segment(&data_trees) {
        if suffix != Some(DATA_SUFFIX) {
            return None;
        }
        to_tracked_layout(path)
    } else {
        path.clone()
    };

    if canonical.depth() < 2 {
        return None;
    }
    // A collapsed path must map to itself, so `ofl/a.txt/b.ttf` is not tracked as `ofl/a.txt`
    if canonical != *path && normalize(&canonical).as_ref() != Some(&canonical) {
        return None;
    }
    Some(canonical)
}

/// `lang/Lib/gflanguages/data/languages/aa_Latn.textproto` → `lang/languages/aa_Latn.textproto`
pub fn to_tracked_layout(path: &TrackedPath) -> TrackedPath {
    let segments: Vec<&str> = path.segments().collect();
    let Some(pos) = path.position_of(&data_tree_names()) else {
        return path.clone();
    };
    let is_package_layout = segments.get(pos + 1) == Some(&"Lib")
        && segments.get(pos + 2).is_some()
        && segments.get(pos + 3) == Some(&"data");
    if !is_package_layout {
        return path.clone();
    }
    let mut kept = segments[..=pos].to_vec();
    kept.extend_from_slice(&segments[pos + 4..]);
    TrackedPath::from_segments(&kept)
}

/// Inverse of [`to_tracked_layout`]
pub fn to_repo_layout(path: &TrackedPath) -> TrackedPath {
    let segments: Vec<&str> = path.segments().collect();
    let Some(pos) = path.position_of(&data_tree_names()) else {
        return path.clone();
    };
    if segments.get(pos + 1) == Some(&"Lib") {
        return path.clone();
    }
    let package = DATA_TREES
        .iter()
        .find(|(tree, _)| *tree == segments[pos])
        .map(|(_, package)| *package)
        .unwrap_or(segments[pos]);

    let mut expanded = segments[..=pos].to_vec();
    expanded.extend_from_slice(&["Lib", package, "data"]);
    expanded.extend_from_slice(&segments[pos + 1..]);
    TrackedPath::from_segments(&expanded)
}

/// A checkout of the fonts repository on disk
#[derive(Debug, Clone)]
pub struct FontsRepo {
    root: PathBuf,
}

impl FontsRepo {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a tracked path
    ///
    /// Data-tree paths resolve to the package layout, unless only the
    /// literal path exists on disk.
    pub fn repo_path(&self, path: &TrackedPath) -> PathBuf {
        let expanded = self.root.join(to_repo_layout(path).to_path_buf());
        if expanded.exists() {
            return expanded;
        }
        let literal = self.root.join(path.to_path_buf());
        if literal.exists() {
            literal
        } else {
            expanded
        }
    }

    pub fn exists(&self, path: &TrackedPath) -> bool {
        self.repo_path(path).exists()
    }
}

impl Default for FontsRepo {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn norm(raw: &str) -> Option<String> {
        normalize(&TrackedPath::new(raw)).map(|p| p.to_string())
    }

    #[test]
    fn test_tracked_path_cleans_separators() {
        assert_eq!(TrackedPath::new("./ofl//mavenpro/").as_str(), "ofl/mavenpro");
        assert_eq!(TrackedPath::new("ofl\\mavenpro").as_str(), "ofl/mavenpro");
    }

    #[test]
    fn test_tracked_path_drops_parent_segments() {
        assert_eq!(TrackedPath::new("../secret/x/y.md").as_str(), "secret/x/y.md");
        assert_eq!(
            TrackedPath::new("ofl/../abel"),
            TrackedPath::from(Path::new("ofl/../abel"))
        );
    }

    #[test]
    fn test_suffix() {
        assert_eq!(TrackedPath::new("ofl/a/MavenPro[wght].ttf").suffix(), Some(".ttf"));
        assert_eq!(TrackedPath::new("ofl/a/.hidden").suffix(), None);
        assert_eq!(TrackedPath::new("ofl/a").suffix(), None);
    }

    #[test]
    fn test_is_ancestor_of() {
        let parent = TrackedPath::new("ofl/noto");
        assert!(parent.is_ancestor_of(&TrackedPath::new("ofl/noto/article")));
        assert!(!parent.is_ancestor_of(&TrackedPath::new("ofl/notosans")));
        assert!(!parent.is_ancestor_of(&parent));
    }

    #[test]
    fn test_font_files_collapse_to_family() {
        assert_eq!(norm("ofl/mavenpro/MavenPro[wght].ttf").as_deref(), Some("ofl/mavenpro"));
        assert_eq!(norm("ofl/notosans/upstream.yaml").as_deref(), Some("ofl/notosans"));
        assert_eq!(
            norm("catalog/designers/colophonfoundry/info.pb").as_deref(),
            Some("catalog/designers/colophonfoundry")
        );
    }

    #[test]
    fn test_nested_family_file_collapses_to_child_of_root() {
        assert_eq!(norm("ofl/foo/images/specimen.png").as_deref(), Some("ofl/foo"));
    }

    #[test]
    fn test_auxiliary_trees_collapse_to_family() {
        assert_eq!(norm("ofl/notosans/article/index.html").as_deref(), Some("ofl/notosans"));
        assert_eq!(norm("ofl/notosans/article").as_deref(), Some("ofl/notosans"));
        assert_eq!(norm("ofl/lobster/static/Lobster-Regular.ttf").as_deref(), Some("ofl/lobster"));
    }

    #[test]
    fn test_data_trees() {
        assert_eq!(
            norm("axisregistry/Lib/axisregistry/data/bounce.textproto").as_deref(),
            Some("axisregistry/bounce.textproto")
        );
        assert_eq!(
            norm("lang/Lib/gflanguages/data/languages/aa_Latn.textproto").as_deref(),
            Some("lang/languages/aa_Latn.textproto")
        );
        assert_eq!(norm("axisregistry/Lib/axisregistry/data/bounce.pb"), None);
        assert_eq!(norm("lang/authors.txt"), None);
    }

    #[test]
    fn test_roots_are_discarded() {
        assert_eq!(norm("ofl"), None);
        assert_eq!(norm("apache"), None);
        assert_eq!(norm("ofl/OFL.txt"), None);
        assert_eq!(norm(""), None);
    }

    #[test]
    fn test_other_paths_unchanged() {
        assert_eq!(norm("cc-by-sa/knowledge/modules/a.mdx").as_deref(), Some("cc-by-sa/knowledge/modules/a.mdx"));
        assert_eq!(norm("ofl/mavenpro").as_deref(), Some("ofl/mavenpro"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in [
            "ofl/mavenpro/MavenPro[wght].ttf",
            "axisregistry/Lib/axisregistry/data/bounce.textproto",
            "lang/Lib/gflanguages/data/languages/aa_Latn.textproto",
            "catalog/designers/colophonfoundry/bio.html",
        ] {
            let once = normalize(&TrackedPath::new(raw)).unwrap();
            assert_eq!(normalize(&once), Some(once.clone()));
        }
    }

    #[test]
    fn test_family_dir_with_file_suffix_is_not_tracked() {
        assert_eq!(norm("ofl/a.txt/b.ttf"), None);
        assert_eq!(norm("ofl/a.txt/article/index.html"), None);
    }

    #[test]
    fn test_layout_mapping_is_invertible() {
        let tracked = TrackedPath::new("lang/languages/aa_Latn.textproto");
        let repo = to_repo_layout(&tracked);
        assert_eq!(repo.as_str(), "lang/Lib/gflanguages/data/languages/aa_Latn.textproto");
        assert_eq!(to_tracked_layout(&repo), tracked);

        let axis = TrackedPath::new("axisregistry/bounce.textproto");
        assert_eq!(
            to_repo_layout(&axis).as_str(),
            "axisregistry/Lib/axisregistry/data/bounce.textproto"
        );
        assert_eq!(to_repo_layout(&TrackedPath::new("ofl/abc")).as_str(), "ofl/abc");
    }

    #[test]
    fn test_fonts_repo_exists_uses_repo_layout() {
        let tmp = tempdir().unwrap();
        let data = tmp.path().join("axisregistry/Lib/axisregistry/data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("bounce.textproto"), "tag: \"BNCE\"").unwrap();

        let repo = FontsRepo::new(tmp.path());
        assert!(repo.exists(&TrackedPath::new("axisregistry/bounce.textproto")));
        assert!(!repo.exists(&TrackedPath::new("axisregistry/morph.textproto")));
    }

    #[test]
    fn test_fonts_repo_literal_data_tree_file() {
        let tmp = tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("lang")).unwrap();
        std::fs::write(tmp.path().join("lang/foo.textproto"), "").unwrap();

        let repo = FontsRepo::new(tmp.path());
        let tracked = TrackedPath::new("lang/foo.textproto");
        assert_eq!(normalize(&tracked), Some(tracked.clone()));
        assert!(repo.exists(&tracked));
        assert_eq!(repo.repo_path(&tracked), tmp.path().join("lang/foo.textproto"));
        assert_eq!(
            repo.repo_path(&TrackedPath::new("lang/bar.textproto")),
            tmp.path().join("lang/Lib/gflanguages/data/bar.textproto")
        );
    }
}
