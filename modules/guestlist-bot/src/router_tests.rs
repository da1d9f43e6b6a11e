//! Boundary tests for the router: addressing, commands, and the reply
//! surface. The projector runs against the in-memory mock store.

use std::sync::Arc;

use crate::projector::Projector;
use crate::router::{ChatKind, IncomingMessage, Router};
use crate::testing::*;

const HANDLE: &str = "@events_attendings_bot";

fn router_with(store: Arc<MockSheetStore>) -> Router {
    Router::new(Projector::new(store), HANDLE)
}

fn direct(text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id: 7,
        kind: ChatKind::Direct,
        text: text.to_string(),
    }
}

fn group(text: &str) -> IncomingMessage {
    IncomingMessage {
        chat_id: -100,
        kind: ChatKind::Group,
        text: text.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unaddressed_group_text_is_silently_ignored() {
    let store = Arc::new(MockSheetStore::new());
    let router = router_with(store.clone());

    let reply = router.handle(&group("lunch anyone?")).await;

    assert!(reply.is_none());
    assert!(store.ops().is_empty(), "no remote calls for ignored chatter");
}

#[tokio::test]
async fn group_submission_with_mention_is_projected() {
    let store = Arc::new(MockSheetStore::new());
    let router = router_with(store.clone());

    let reply = router
        .handle(&group(&format!("{HANDLE} Hackathon$2024-03-01$Alice, Bob")))
        .await
        .unwrap();

    assert!(reply.contains("Hackathon"));
    // The handle is stripped before parsing, so the tab title is clean.
    assert_eq!(store.tab_titles(), vec!["Hackathon"]);
}

#[tokio::test]
async fn mention_detection_is_case_insensitive() {
    let store = Arc::new(MockSheetStore::new());
    let router = router_with(store.clone());

    let reply = router
        .handle(&group("@Events_Attendings_Bot Demo$2024-05-05$Dana"))
        .await;

    assert!(reply.is_some());
    assert_eq!(store.tab_titles(), vec!["Demo"]);
}

// ---------------------------------------------------------------------------
// Commands and canned replies
// ---------------------------------------------------------------------------

#[tokio::test]
async fn start_command_returns_greeting() {
    let router = router_with(Arc::new(MockSheetStore::new()));

    let reply = router.handle(&direct("/start")).await.unwrap();

    assert!(reply.starts_with("Hello!"));
}

#[tokio::test]
async fn help_command_describes_the_submission_format() {
    let router = router_with(Arc::new(MockSheetStore::new()));

    let reply = router.handle(&direct("/help")).await.unwrap();

    assert!(reply.contains("EventName$28/02/2024$John, Jane Doe, Well S"));
}

#[tokio::test]
async fn suffixed_command_for_this_bot_is_answered() {
    let router = router_with(Arc::new(MockSheetStore::new()));

    let reply = router.handle(&group("/help@events_attendings_bot")).await;

    assert!(reply.unwrap().contains("/start"));
}

#[tokio::test]
async fn command_aimed_at_another_bot_is_ignored() {
    let router = router_with(Arc::new(MockSheetStore::new()));

    let reply = router.handle(&group("/help@some_other_bot")).await;

    assert!(reply.is_none());
}

#[tokio::test]
async fn greeting_gets_usage_instructions() {
    let router = router_with(Arc::new(MockSheetStore::new()));

    let reply = router.handle(&direct("hello there")).await.unwrap();

    assert!(reply.contains("$ sign"));
}

// ---------------------------------------------------------------------------
// Parse failures and remote failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_submission_gets_format_help_and_no_remote_calls() {
    let store = Arc::new(MockSheetStore::new());
    let router = router_with(store.clone());

    let reply = router.handle(&direct("BadFormat")).await.unwrap();

    assert!(reply.starts_with("Incorrect format"));
    assert!(store.ops().is_empty(), "parse failure must not touch the sheet");
}

#[tokio::test]
async fn remote_failure_collapses_to_generic_message() {
    let store = Arc::new(MockSheetStore::new().failing_append());
    let router = router_with(store.clone());

    let reply = router
        .handle(&direct("Hackathon$2024-03-01$Alice"))
        .await
        .unwrap();

    assert_eq!(reply, "Failed to log the event.");
}
