//! Boundary tests for the projector — one trait handoff at a time.
//!
//! Each test follows MOCK → FUNCTION → OUTPUT:
//! set up the mock store, call `project` once (or twice), assert the state.

use std::sync::Arc;

use crate::projector::Projector;
use crate::testing::*;

use guestlist_common::AppendedRange;

fn hackathon() -> guestlist_common::EventSubmission {
    submission("Hackathon", "2024-03-01", &["Alice", "Bob", "Cara"])
}

// ---------------------------------------------------------------------------
// Fresh spreadsheet — tab creation path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_event_creates_tab_writes_header_then_appends() {
    let store = Arc::new(MockSheetStore::new());
    let projector = Projector::new(store.clone());

    let reply = projector.project(&hackathon()).await.unwrap();

    assert!(reply.contains("Hackathon"));
    assert_eq!(store.create_calls(), 1, "exactly one create-tab call");
    assert_eq!(store.header_calls(), 1, "exactly one header write");
    assert_eq!(store.tab_titles(), vec!["Hackathon"]);
    assert_eq!(
        store.ops(),
        vec!["list", "create:Hackathon", "header:Hackathon", "append:Hackathon", "style:100"],
        "create and header must precede the append"
    );
}

#[tokio::test]
async fn appended_block_has_name_and_date_on_first_row_only() {
    let store = Arc::new(MockSheetStore::new());
    let projector = Projector::new(store.clone());

    projector.project(&hackathon()).await.unwrap();

    assert_eq!(
        store.rows_in("Hackathon"),
        vec![
            vec!["Hackathon".to_string(), "2024-03-01".to_string(), "Alice".to_string()],
            vec![String::new(), String::new(), "Bob".to_string()],
            vec![String::new(), String::new(), "Cara".to_string()],
        ]
    );
}

#[tokio::test]
async fn new_tab_styling_targets_created_tab_and_appended_rows() {
    let store = Arc::new(MockSheetStore::new());
    let projector = Projector::new(store.clone());

    projector.project(&hackathon()).await.unwrap();

    let sheet_id = store.sheet_id_of("Hackathon").unwrap();
    // Header occupies row 0; the three-participant block lands on rows 1..4.
    assert_eq!(
        store.styled_targets(),
        vec![(sheet_id, AppendedRange { start_row: 1, end_row: 4 })]
    );
}

// ---------------------------------------------------------------------------
// Existing tab path
// ---------------------------------------------------------------------------

#[tokio::test]
async fn existing_tab_skips_create_and_header() {
    let store = Arc::new(MockSheetStore::new().with_tab("Hackathon"));
    let projector = Projector::new(store.clone());

    projector.project(&hackathon()).await.unwrap();

    assert_eq!(store.create_calls(), 0);
    assert_eq!(store.header_calls(), 0);
    assert_eq!(store.append_calls(), 1);
}

#[tokio::test]
async fn existing_tab_styling_targets_resolved_sheet_id() {
    // The id must come from the metadata listing even when nothing was
    // created, so the styling batch never references a missing grid.
    let store = Arc::new(MockSheetStore::new().with_tab("Hackathon"));
    let projector = Projector::new(store.clone());

    projector.project(&hackathon()).await.unwrap();

    let existing_id = store.sheet_id_of("Hackathon").unwrap();
    let styled = store.styled_targets();
    assert_eq!(styled.len(), 1);
    assert_eq!(styled[0].0, existing_id);
}

#[tokio::test]
async fn same_submission_twice_appends_two_separate_blocks() {
    // Re-submitting is expected to duplicate, not merge.
    let store = Arc::new(MockSheetStore::new());
    let projector = Projector::new(store.clone());

    projector.project(&hackathon()).await.unwrap();
    projector.project(&hackathon()).await.unwrap();

    assert_eq!(store.create_calls(), 1, "second run found the tab");
    assert_eq!(store.header_calls(), 1);
    assert_eq!(store.append_calls(), 2);
    assert_eq!(store.rows_in("Hackathon").len(), 6);

    let styled = store.styled_targets();
    assert_eq!(styled[0].1, AppendedRange { start_row: 1, end_row: 4 });
    assert_eq!(styled[1].1, AppendedRange { start_row: 4, end_row: 7 });
}

// ---------------------------------------------------------------------------
// Edge cases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_participant_list_ensures_tab_but_appends_nothing() {
    let store = Arc::new(MockSheetStore::new());
    let projector = Projector::new(store.clone());

    let reply = projector
        .project(&submission("Party", "2024-01-01", &[]))
        .await
        .unwrap();

    assert!(reply.contains("Party"));
    assert_eq!(store.create_calls(), 1);
    assert_eq!(store.header_calls(), 1);
    assert_eq!(store.append_calls(), 0);
    assert!(store.styled_targets().is_empty());
}

#[tokio::test]
async fn styling_failure_leaves_appended_rows_behind() {
    // No rollback: the block stays even when the formatting step errors.
    let store = Arc::new(MockSheetStore::new().failing_style());
    let projector = Projector::new(store.clone());

    let result = projector.project(&hackathon()).await;

    assert!(result.is_err());
    assert_eq!(store.rows_in("Hackathon").len(), 3);
}
