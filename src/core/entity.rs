//! Label enums shared by push items, the manifest and the board

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a board or manifest label has no matching variant
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} label: '{label}'")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub label: String,
}

impl ParseLabelError {
    fn new(kind: &'static str, label: &str) -> Self {
        Self {
            kind,
            label: label.to_string(),
        }
    }
}

/// Kind of change a push item carries
///
/// Declaration order is the manifest group order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PushCategory {
    #[serde(rename = "New")]
    New,
    #[serde(rename = "Upgrade")]
    Upgrade,
    #[serde(rename = "Other")]
    Other,
    #[serde(rename = "Designer profile")]
    DesignerProfile,
    #[serde(rename = "Axis Registry")]
    AxisRegistry,
    #[serde(rename = "Knowledge")]
    Knowledge,
    #[serde(rename = "Metadata / Description / License")]
    Metadata,
    #[serde(rename = "Sample texts")]
    SampleTexts,
    #[serde(rename = "Blocked")]
    Blocked,
    #[serde(rename = "Deleted")]
    Deleted,
}

impl PushCategory {
    /// All categories in declaration order
    pub fn all() -> &'static [PushCategory] {
        &[
            PushCategory::New,
            PushCategory::Upgrade,
            PushCategory::Other,
            PushCategory::DesignerProfile,
            PushCategory::AxisRegistry,
            PushCategory::Knowledge,
            PushCategory::Metadata,
            PushCategory::SampleTexts,
            PushCategory::Blocked,
            PushCategory::Deleted,
        ]
    }

    /// Name used for manifest group headers
    pub fn display_name(&self) -> &'static str {
        match self {
            PushCategory::New => "New",
            PushCategory::Upgrade => "Upgrade",
            PushCategory::Other => "Other",
            PushCategory::DesignerProfile => "Designer profile",
            PushCategory::AxisRegistry => "Axis Registry",
            PushCategory::Knowledge => "Knowledge",
            PushCategory::Metadata => "Metadata / Description / License",
            PushCategory::SampleTexts => "Sample texts",
            PushCategory::Blocked => "Blocked",
            PushCategory::Deleted => "Deleted",
        }
    }

    /// Look up a category by its display name
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.display_name() == name)
    }
}

impl std::fmt::Display for PushCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::str::FromStr for PushCategory {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_name(s).ok_or_else(|| ParseLabelError::new("category", s))
    }
}

/// Where the board reports an item to be in the release pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PushStatus {
    #[serde(rename = "PR GF")]
    PrOpen,
    #[serde(rename = "In Dev / PR Merged")]
    InDev,
    #[serde(rename = "In Sandbox")]
    InSandbox,
    #[serde(rename = "Live")]
    Live,
}

impl PushStatus {
    pub fn all() -> &'static [PushStatus] {
        &[
            PushStatus::PrOpen,
            PushStatus::InDev,
            PushStatus::InSandbox,
            PushStatus::Live,
        ]
    }

    /// Label shown on the board's Status field
    pub fn label(&self) -> &'static str {
        match self {
            PushStatus::PrOpen => "PR GF",
            PushStatus::InDev => "In Dev / PR Merged",
            PushStatus::InSandbox => "In Sandbox",
            PushStatus::Live => "Live",
        }
    }
}

impl std::fmt::Display for PushStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PushStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|status| status.label() == s)
            .ok_or_else(|| ParseLabelError::new("status", s))
    }
}

/// An explicit decision to move an item, published to the board's List field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PushList {
    ToSandbox,
    ToProduction,
    Blocked,
}

impl PushList {
    pub fn all() -> &'static [PushList] {
        &[PushList::ToSandbox, PushList::ToProduction, PushList::Blocked]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PushList::ToSandbox => "to_sandbox",
            PushList::ToProduction => "to_production",
            PushList::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for PushList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PushList {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|list| list.label() == s)
            .ok_or_else(|| ParseLabelError::new("list", s))
    }
}
