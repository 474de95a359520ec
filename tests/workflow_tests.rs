//! Board sync and list progression tests against an in-memory board

use gfpush::core::board::{fetch_all, load_board, BoardPage};
use gfpush::core::{
    BoardClient, BoardError, BoardNode, BoardWriter, ListWorkflow, PushCategory, PushList,
    PushStatus, TrackedPath, Transition, WorkflowError,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::time::Duration;

/// Board that serves queued pages and records every write
#[derive(Default)]
struct MockBoard {
    pages: RefCell<VecDeque<Result<BoardPage, BoardError>>>,
    cursors: RefCell<Vec<Option<String>>>,
    writes: RefCell<Vec<String>>,
}

impl MockBoard {
    fn with_pages(pages: Vec<Result<BoardPage, BoardError>>) -> Self {
        Self {
            pages: RefCell::new(pages.into()),
            ..Default::default()
        }
    }
}

impl BoardWriter for MockBoard {
    fn set_status(&self, id: &str, status: PushStatus) -> Result<(), BoardError> {
        self.writes.borrow_mut().push(format!("{} status={}", id, status));
        Ok(())
    }

    fn set_list(&self, id: &str, list: PushList) -> Result<(), BoardError> {
        self.writes.borrow_mut().push(format!("{} list={}", id, list));
        Ok(())
    }
}

impl BoardClient for MockBoard {
    fn fetch_page(&self, cursor: Option<&str>) -> Result<BoardPage, BoardError> {
        self.cursors.borrow_mut().push(cursor.map(str::to_string));
        self.pages
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(BoardError::Graphql("no more pages".to_string())))
    }
}

fn node(id: &str, pr: u32, labels: &[&str], files: &[&str]) -> BoardNode {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "status": { "name": "In Dev / PR Merged" },
        "list": null,
        "content": {
            "url": format!("https://github.com/google/fonts/pull/{}", pr),
            "merged": true,
            "files": { "nodes": files.iter().map(|p| serde_json::json!({ "path": p })).collect::<Vec<_>>() },
            "labels": { "nodes": labels.iter().map(|l| serde_json::json!({ "name": l })).collect::<Vec<_>>() },
        }
    }))
    .unwrap()
}

fn page(nodes: Vec<BoardNode>, cursor: &str, total: usize) -> BoardPage {
    BoardPage {
        nodes,
        end_cursor: Some(cursor.to_string()),
        total_count: total,
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_fetch_all_retries_later_pages() {
    let board = MockBoard::with_pages(vec![
        Ok(page(vec![node("A", 1, &["I New Font"], &["ofl/a/A.ttf"])], "c1", 2)),
        Err(BoardError::Graphql("timeout".to_string())),
        Err(BoardError::Graphql("timeout".to_string())),
        Ok(page(vec![node("B", 2, &["I Font Upgrade"], &["ofl/b/B.ttf"])], "c2", 2)),
    ]);

    let nodes = fetch_all(&board, Duration::ZERO).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(
        *board.cursors.borrow(),
        vec![None, Some("c1".to_string()), Some("c1".to_string()), Some("c1".to_string())]
    );
}

#[test]
fn test_fetch_all_first_page_error_propagates() {
    let board = MockBoard::with_pages(vec![Err(BoardError::Graphql("bad credentials".to_string()))]);
    let err = fetch_all(&board, Duration::ZERO).unwrap_err();
    assert!(err.to_string().contains("bad credentials"));
    assert_eq!(board.cursors.borrow().len(), 1);
}

#[test]
fn test_fetch_all_empty_page() {
    let board = MockBoard::with_pages(vec![
        Ok(page(vec![node("A", 1, &["I New Font"], &["ofl/a/A.ttf"])], "c1", 3)),
        Ok(page(vec![], "c2", 3)),
    ]);
    let err = fetch_all(&board, Duration::ZERO).unwrap_err();
    assert!(matches!(err, BoardError::EmptyPage { fetched: 1, total: 3 }));
}

#[test]
fn test_load_board_builds_registry() {
    let board = MockBoard::with_pages(vec![Ok(page(
        vec![
            node("B", 20, &["I Designer profile"], &["designers/abel/info.pb", "designers/abel/abel.png"]),
            node("A", 10, &["I Font Upgrade", "--- blocked"], &["ofl/a/A.ttf"]),
        ],
        "c1",
        2,
    ))]);

    let items = load_board(&board, Duration::ZERO).unwrap();
    assert_eq!(items.len(), 2);

    let abel = items.get(&TrackedPath::new("designers/abel")).unwrap();
    assert_eq!(abel.category, PushCategory::DesignerProfile);
    assert_eq!(abel.status, Some(PushStatus::InDev));
    assert_eq!(abel.external_id.as_deref(), Some("B"));

    let a = items.get(&TrackedPath::new("ofl/a")).unwrap();
    assert_eq!(a.category, PushCategory::Blocked);
}

// ============================================================================
// List progression
// ============================================================================

#[test]
fn test_bump_to_terminal_list() {
    let board = MockBoard::with_pages(vec![Ok(page(
        vec![node("A", 1, &["I New Font"], &["ofl/a/A.ttf"])],
        "c1",
        1,
    ))]);
    let mut items = load_board(&board, Duration::ZERO).unwrap();
    let item = items.get_mut(&TrackedPath::new("ofl/a")).unwrap();
    let workflow = ListWorkflow::new(&board);

    assert_eq!(
        workflow.bump(item).unwrap(),
        Transition::Moved { from: None, to: PushList::ToSandbox }
    );
    assert_eq!(board.writes.borrow().len(), 1);

    workflow.bump(item).unwrap();
    assert_eq!(item.push_list, Some(PushList::ToProduction));
    assert_eq!(board.writes.borrow().len(), 2);

    assert_eq!(workflow.bump(item).unwrap(), Transition::Unchanged(PushList::ToProduction));
    assert_eq!(
        *board.writes.borrow(),
        vec!["A list=to_sandbox", "A list=to_production"]
    );
}

#[test]
fn test_blocked_item_cannot_bump() {
    let board = MockBoard::default();
    let workflow = ListWorkflow::new(&board);
    let mut item = gfpush::core::PushItem::new("ofl/a", PushCategory::New, None, "")
        .with_external_id("A");

    workflow.block(&mut item).unwrap();
    assert!(matches!(workflow.bump(&mut item), Err(WorkflowError::Blocked { .. })));
    assert_eq!(*board.writes.borrow(), vec!["A list=blocked"]);
}

#[test]
fn test_publish_status() {
    let board = MockBoard::default();
    let workflow = ListWorkflow::new(&board);
    let mut item = gfpush::core::PushItem::new("ofl/a", PushCategory::New, Some(PushStatus::InDev), "")
        .with_external_id("A");

    workflow.publish_status(&mut item, PushStatus::Live).unwrap();
    assert_eq!(item.status, Some(PushStatus::Live));
    assert_eq!(*board.writes.borrow(), vec!["A status=Live"]);
}
