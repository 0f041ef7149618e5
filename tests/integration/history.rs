use super::{connected_session, echo_backend, test_services, Arc};
use chat_assistant::models::internal::{ConversationSummary, SessionStatus};
use chat_assistant::services::{HistoryService, MockLatency};
use chat_assistant::session::HistoryBrowser;
use chrono::{Duration, Utc};

fn summary(id: &str, title: &str, last: &str, age: Duration) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        title: title.to_string(),
        last_message: last.to_string(),
        timestamp: Utc::now() - age,
        message_count: 2,
        status: SessionStatus::Archived,
    }
}

#[tokio::test]
async fn test_refresh_lists_most_recent_first() {
    let mut browser = HistoryBrowser::new(test_services().history.clone());

    let ids: Vec<&str> = browser
        .refresh()
        .await
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec!["session-1", "session-2", "session-3"]);
}

#[tokio::test]
async fn test_blank_search_falls_back_to_full_list() {
    let mut browser = HistoryBrowser::new(test_services().history.clone());

    assert_eq!(browser.search("onboarding").await.len(), 1);
    assert_eq!(browser.search("  onboarding  ").await.len(), 1);
    assert_eq!(browser.search("   ").await.len(), 3);
    assert_eq!(browser.query(), "   ");
}

#[tokio::test]
async fn test_search_matches_title_or_last_message() {
    let service = Arc::new(HistoryService::with_sessions(
        vec![
            summary("a", "VPN setup", "Works now", Duration::hours(1)),
            summary("b", "Expenses", "Use the VPN form", Duration::hours(2)),
            summary("c", "Leave", "Thanks", Duration::hours(3)),
        ],
        MockLatency::none(),
    ));
    let mut browser = HistoryBrowser::new(service);

    let mut ids: Vec<&str> = browser
        .search("vpn")
        .await
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "b"]);
    assert!(browser.search("payroll").await.is_empty());
}

#[tokio::test]
async fn test_delete_removes_entry_and_ignores_unknown() {
    let service = test_services().history.clone();
    let mut browser = HistoryBrowser::new(service.clone());
    browser.refresh().await;

    browser.delete("session-2").await;
    browser.delete("session-404").await;

    assert_eq!(browser.entries().len(), 2);
    assert!(browser.entries().iter().all(|s| s.id != "session-2"));
    assert_eq!(service.get_conversation_history().await.len(), 2);
}

#[tokio::test]
async fn test_cleared_session_shows_up_in_browser() {
    let mut session = connected_session(echo_backend()).await;
    session
        .send_message("Hướng dẫn cài đặt VPN cho máy mới")
        .await
        .unwrap();
    let old_id = session.id().to_string();
    session.clear_session().await;

    let mut browser = HistoryBrowser::new(session.services().history.clone());
    let hits: Vec<String> = browser
        .search("vpn")
        .await
        .iter()
        .map(|s| s.id.clone())
        .collect();
    assert_eq!(hits, vec![old_id]);
}
