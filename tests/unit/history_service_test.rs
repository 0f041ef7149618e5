use chat_assistant::models::internal::{ConversationSummary, SessionStatus};
use chat_assistant::services::{HistoryService, MockLatency};
use chrono::{Duration, Utc};

fn summary(id: &str, title: &str, age: Duration) -> ConversationSummary {
    ConversationSummary {
        id: id.to_string(),
        title: title.to_string(),
        last_message: "Thanks!".to_string(),
        timestamp: Utc::now() - age,
        message_count: 4,
        status: SessionStatus::Archived,
    }
}

#[tokio::test]
async fn test_seeded_history() {
    let service = HistoryService::new(MockLatency::none());
    let history = service.get_conversation_history().await;

    assert_eq!(history.len(), 3);
    assert_eq!(history[0].title, "Hỏi về chính sách nghỉ phép");
    assert!(history.iter().all(|s| s.status == SessionStatus::Archived));
    assert!(history.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let service = HistoryService::new(MockLatency::none());

    let hits = service.search_conversations("ONBOARDING").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "session-2");

    // Matches on the last message too
    let hits = service.search_conversations("clear").await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, "session-3");
}

#[tokio::test]
async fn test_delete_conversation() {
    let service = HistoryService::new(MockLatency::none());

    service.delete_conversation("session-1").await;
    service.delete_conversation("session-1").await;

    let ids: Vec<String> = service
        .get_conversation_history()
        .await
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec!["session-2", "session-3"]);
}

#[tokio::test]
async fn test_record_replaces_same_id() {
    let service = HistoryService::with_sessions(
        vec![summary("a", "First", Duration::days(2))],
        MockLatency::none(),
    );

    service
        .record_conversation(summary("a", "First (updated)", Duration::zero()))
        .await;
    service
        .record_conversation(summary("b", "Second", Duration::hours(1)))
        .await;

    let history = service.get_conversation_history().await;
    let titles: Vec<&str> = history.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["First (updated)", "Second"]);
}
