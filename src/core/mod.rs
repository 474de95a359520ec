//! Core module - push items, manifests and the project board

pub mod board;
pub mod config;
pub mod entity;
pub mod github;
pub mod item;
pub mod loader;
pub mod manifest;
pub mod paths;
pub mod registry;
pub mod workflow;

pub use board::{fetch_all, load_board, BoardClient, BoardError, BoardNode, BoardRecord, BoardWriter};
pub use config::{BoardConfig, Config, ConfigError};
pub use entity::{ParseLabelError, PushCategory, PushList, PushStatus};
pub use github::GhBoardClient;
pub use item::{ItemSummary, PushItem};
pub use loader::{ItemKind, ItemLoader, LoadError, LoadedItem, LoaderTable};
pub use manifest::{decode, encode, read_manifest, write_manifest, ManifestError};
pub use paths::{normalize, FontsRepo, TrackedPath};
pub use registry::PushItems;
pub use workflow::{ListWorkflow, Transition, WorkflowError};
