//! Filter and value enums for CLI commands

use clap::ValueEnum;

use crate::core::entity::PushStatus;
use crate::core::registry::PushItems;

/// Board selection for listing commands
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ListFilter {
    /// Items on the to_sandbox list
    ToSandbox,
    /// Items on the to_production list
    ToProduction,
    /// Merged items not yet in the sandbox
    InDev,
    /// Items currently on the sandbox server
    InSandbox,
    /// Items live in production
    Live,
    /// Every item
    #[default]
    All,
}

impl ListFilter {
    pub fn apply(&self, items: &PushItems) -> PushItems {
        match self {
            ListFilter::ToSandbox => items.to_sandbox(),
            ListFilter::ToProduction => items.to_production(),
            ListFilter::InDev => items.in_dev(),
            ListFilter::InSandbox => items.in_sandbox(),
            ListFilter::Live => items.live(),
            ListFilter::All => items.clone(),
        }
    }
}

impl std::fmt::Display for ListFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListFilter::ToSandbox => write!(f, "to-sandbox"),
            ListFilter::ToProduction => write!(f, "to-production"),
            ListFilter::InDev => write!(f, "in-dev"),
            ListFilter::InSandbox => write!(f, "in-sandbox"),
            ListFilter::Live => write!(f, "live"),
            ListFilter::All => write!(f, "all"),
        }
    }
}

/// Board Status values in command-line spelling
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StatusArg {
    /// "PR GF"
    PrGf,
    /// "In Dev / PR Merged"
    InDev,
    /// "In Sandbox"
    InSandbox,
    /// "Live"
    Live,
}

impl From<StatusArg> for PushStatus {
    fn from(arg: StatusArg) -> Self {
        match arg {
            StatusArg::PrGf => PushStatus::PrOpen,
            StatusArg::InDev => PushStatus::InDev,
            StatusArg::InSandbox => PushStatus::InSandbox,
            StatusArg::Live => PushStatus::Live,
        }
    }
}
