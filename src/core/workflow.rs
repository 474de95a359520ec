//! List progression for push items
//!
//! The board's List field is a command: `None → to_sandbox → to_production`.
//! `blocked` sits outside that chain and is only entered through an explicit
//! block. Each state change is one board write, and the item is only updated
//! after the write succeeds.

use thiserror::Error;
use tracing::info;

use crate::core::board::{BoardError, BoardWriter};
use crate::core::entity::{PushList, PushStatus};
use crate::core::item::PushItem;

/// Errors that can occur while moving an item along the pipeline
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{path} has no board item id; only items fetched from the board can be moved")]
    MissingExternalId { path: String },

    #[error("{path} is blocked; the list cannot be advanced past blocked")]
    Blocked { path: String },

    #[error("board update for {path} failed: {source}")]
    Board {
        path: String,
        #[source]
        source: BoardError,
    },
}

/// Outcome of a list change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The board was updated
    Moved {
        from: Option<PushList>,
        to: PushList,
    },
    /// Already at the requested or terminal list; nothing was written
    Unchanged(PushList),
}

/// The list an item moves to on bump, or `None` when it cannot be bumped
pub fn next_list(current: Option<PushList>) -> Option<PushList> {
    match current {
        None => Some(PushList::ToSandbox),
        Some(PushList::ToSandbox) => Some(PushList::ToProduction),
        Some(PushList::ToProduction) => Some(PushList::ToProduction),
        Some(PushList::Blocked) => None,
    }
}

/// Lists reachable from the current one, including the block side-channel
pub fn allowed_transitions(current: Option<PushList>) -> Vec<PushList> {
    match current {
        None => vec![PushList::ToSandbox, PushList::Blocked],
        Some(PushList::ToSandbox) => vec![PushList::ToProduction, PushList::Blocked],
        Some(PushList::ToProduction) => vec![PushList::Blocked],
        Some(PushList::Blocked) => vec![PushList::Blocked],
    }
}

/// Applies list and status changes to items, publishing each to the board
pub struct ListWorkflow<'a, B: BoardWriter + ?Sized> {
    board: &'a B,
}

impl<'a, B: BoardWriter + ?Sized> ListWorkflow<'a, B> {
    pub fn new(board: &'a B) -> Self {
        Self { board }
    }

    /// Advance the item one step along the list chain
    pub fn bump(&self, item: &mut PushItem) -> Result<Transition, WorkflowError> {
        let current = item.push_list;
        let Some(next) = next_list(current) else {
            return Err(WorkflowError::Blocked {
                path: item.path.to_string(),
            });
        };
        if current == Some(next) {
            info!(path = %item.path, list = %next, "no list beyond to_production, keeping item");
            return Ok(Transition::Unchanged(next));
        }
        self.set_list(item, next)
    }

    /// Move the item to the blocked list regardless of where it is
    pub fn block(&self, item: &mut PushItem) -> Result<Transition, WorkflowError> {
        self.set_list(item, PushList::Blocked)
    }

    fn set_list(&self, item: &mut PushItem, list: PushList) -> Result<Transition, WorkflowError> {
        let id = external_id(item)?;
        self.board
            .set_list(id, list)
            .map_err(|source| WorkflowError::Board {
                path: item.path.to_string(),
                source,
            })?;

        let from = item.push_list.replace(list);
        info!(path = %item.path, from = ?from, to = %list, "list updated");
        Ok(Transition::Moved { from, to: list })
    }

    /// Publish a pipeline status for the item
    pub fn publish_status(
        &self,
        item: &mut PushItem,
        status: PushStatus,
    ) -> Result<(), WorkflowError> {
        let id = external_id(item)?;
        self.board
            .set_status(id, status)
            .map_err(|source| WorkflowError::Board {
                path: item.path.to_string(),
                source,
            })?;
        item.status = Some(status);
        info!(path = %item.path, %status, "status updated");
        Ok(())
    }
}

fn external_id(item: &PushItem) -> Result<&str, WorkflowError> {
    item.external_id
        .as_deref()
        .ok_or_else(|| WorkflowError::MissingExternalId {
            path: item.path.to_string(),
        })
}
