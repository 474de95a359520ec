//! Category loaders - locate the source files behind a push item
//!
//! Each category that maps to a catalogue entity gets one loader, chosen
//! once through [`LoaderTable`]. Loaders only find files; reading metadata
//! protobufs or font binaries is left to external readers.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::entity::PushCategory;
use crate::core::item::PushItem;
use crate::core::paths::FontsRepo;

const FONT_SUFFIXES: [&str; 2] = ["ttf", "otf"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{path} does not exist")]
    NotFound { path: String },

    #[error("{path} is missing {file}")]
    MissingFile { path: String, file: &'static str },

    #[error("no loader registered for {kind:?}")]
    NoLoader { kind: ItemKind },
}

/// Catalogue entity behind a push item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Family,
    Designer,
    FamilyMeta,
    Axis,
}

impl PushCategory {
    /// Entity kind this category's items are loaded as
    pub fn item_kind(&self) -> Option<ItemKind> {
        match self {
            PushCategory::New | PushCategory::Upgrade => Some(ItemKind::Family),
            PushCategory::DesignerProfile => Some(ItemKind::Designer),
            PushCategory::Metadata => Some(ItemKind::FamilyMeta),
            PushCategory::AxisRegistry => Some(ItemKind::Axis),
            _ => None,
        }
    }
}

/// Source files located for a push item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedItem {
    pub kind: ItemKind,
    pub root: PathBuf,
    pub files: Vec<PathBuf>,
}

pub trait ItemLoader {
    fn load(&self, path: &Path) -> Result<LoadedItem, LoadError>;
}

fn ensure_exists(path: &Path) -> Result<(), LoadError> {
    if path.exists() {
        Ok(())
    } else {
        Err(LoadError::NotFound {
            path: path.display().to_string(),
        })
    }
}

fn require_file(dir: &Path, file: &'static str) -> Result<PathBuf, LoadError> {
    let path = dir.join(file);
    if path.is_file() {
        Ok(path)
    } else {
        Err(LoadError::MissingFile {
            path: dir.display().to_string(),
            file,
        })
    }
}

/// Family directory: `METADATA.pb` plus its font binaries
pub struct FamilyLoader;

impl ItemLoader for FamilyLoader {
    fn load(&self, path: &Path) -> Result<LoadedItem, LoadError> {
        ensure_exists(path)?;
        let mut files = vec![require_file(path, "METADATA.pb")?];
        let mut fonts: Vec<PathBuf> = WalkDir::new(path)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| FONT_SUFFIXES.contains(&e))
            })
            .collect();
        fonts.sort();
        files.extend(fonts);
        Ok(LoadedItem {
            kind: ItemKind::Family,
            root: path.to_path_buf(),
            files,
        })
    }
}

/// Family metadata only: `METADATA.pb`
pub struct FamilyMetaLoader;

impl ItemLoader for FamilyMetaLoader {
    fn load(&self, path: &Path) -> Result<LoadedItem, LoadError> {
        ensure_exists(path)?;
        Ok(LoadedItem {
            kind: ItemKind::FamilyMeta,
            root: path.to_path_buf(),
            files: vec![require_file(path, "METADATA.pb")?],
        })
    }
}

/// Designer directory: `info.pb`
pub struct DesignerLoader;

impl ItemLoader for DesignerLoader {
    fn load(&self, path: &Path) -> Result<LoadedItem, LoadError> {
        ensure_exists(path)?;
        Ok(LoadedItem {
            kind: ItemKind::Designer,
            root: path.to_path_buf(),
            files: vec![require_file(path, "info.pb")?],
        })
    }
}

/// Axis registry entry: a single textproto
pub struct AxisLoader;

impl ItemLoader for AxisLoader {
    fn load(&self, path: &Path) -> Result<LoadedItem, LoadError> {
        ensure_exists(path)?;
        Ok(LoadedItem {
            kind: ItemKind::Axis,
            root: path.to_path_buf(),
            files: vec![path.to_path_buf()],
        })
    }
}

/// Kind → loader mapping
pub struct LoaderTable {
    loaders: HashMap<ItemKind, Box<dyn ItemLoader>>,
}

impl LoaderTable {
    pub fn empty() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Table with the file-locating loaders for every kind
    pub fn new() -> Self {
        Self::empty()
            .with(ItemKind::Family, FamilyLoader)
            .with(ItemKind::Designer, DesignerLoader)
            .with(ItemKind::FamilyMeta, FamilyMetaLoader)
            .with(ItemKind::Axis, AxisLoader)
    }

    pub fn with(mut self, kind: ItemKind, loader: impl ItemLoader + 'static) -> Self {
        self.loaders.insert(kind, Box::new(loader));
        self
    }

    /// Load an item; `Ok(None)` for categories with no catalogue entity
    pub fn load(&self, item: &PushItem, repo: &FontsRepo) -> Result<Option<LoadedItem>, LoadError> {
        let Some(kind) = item.category.item_kind() else {
            return Ok(None);
        };
        let loader = self.loaders.get(&kind).ok_or(LoadError::NoLoader { kind })?;
        loader.load(&repo.repo_path(&item.path)).map(Some)
    }
}

impl Default for LoaderTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn family_repo() -> (tempfile::TempDir, FontsRepo) {
        let tmp = tempdir().unwrap();
        let family = tmp.path().join("ofl/abel");
        std::fs::create_dir_all(&family).unwrap();
        std::fs::write(family.join("METADATA.pb"), "name: \"Abel\"").unwrap();
        std::fs::write(family.join("Abel-Regular.ttf"), b"\0\x01\0\0").unwrap();
        std::fs::write(family.join("OFL.txt"), "license").unwrap();
        let repo = FontsRepo::new(tmp.path());
        (tmp, repo)
    }

    #[test]
    fn test_category_kinds() {
        assert_eq!(PushCategory::Upgrade.item_kind(), Some(ItemKind::Family));
        assert_eq!(PushCategory::DesignerProfile.item_kind(), Some(ItemKind::Designer));
        assert_eq!(PushCategory::Knowledge.item_kind(), None);
    }

    #[test]
    fn test_load_family() {
        let (tmp, repo) = family_repo();
        let item = PushItem::new("ofl/abel", PushCategory::New, None, "");
        let loaded = LoaderTable::new().load(&item, &repo).unwrap().unwrap();
        assert_eq!(loaded.kind, ItemKind::Family);
        assert_eq!(
            loaded.files,
            vec![
                tmp.path().join("ofl/abel/METADATA.pb"),
                tmp.path().join("ofl/abel/Abel-Regular.ttf"),
            ]
        );
    }

    #[test]
    fn test_designer_missing_info() {
        let (_tmp, repo) = family_repo();
        let item = PushItem::new("ofl/abel", PushCategory::DesignerProfile, None, "");
        let err = LoaderTable::new().load(&item, &repo).unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { file: "info.pb", .. }));
    }

    #[test]
    fn test_unmapped_category_loads_nothing() {
        let (_tmp, repo) = family_repo();
        let item = PushItem::new("ofl/abel", PushCategory::Other, None, "");
        assert!(LoaderTable::new().load(&item, &repo).unwrap().is_none());
    }

    #[test]
    fn test_empty_table_reports_missing_loader() {
        let (_tmp, repo) = family_repo();
        let item = PushItem::new("ofl/abel", PushCategory::New, None, "");
        let err = LoaderTable::empty().load(&item, &repo).unwrap_err();
        assert!(matches!(err, LoadError::NoLoader { kind: ItemKind::Family }));
    }

    #[test]
    fn test_axis_uses_repo_layout() {
        let tmp = tempdir().unwrap();
        let data = tmp.path().join("axisregistry/Lib/axisregistry/data");
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("bounce.textproto"), "tag: \"BNCE\"").unwrap();
        let repo = FontsRepo::new(tmp.path());

        let item = PushItem::new("axisregistry/bounce.textproto", PushCategory::AxisRegistry, None, "");
        let loaded = LoaderTable::new().load(&item, &repo).unwrap().unwrap();
        assert_eq!(loaded.files, vec![data.join("bounce.textproto")]);
    }
}
