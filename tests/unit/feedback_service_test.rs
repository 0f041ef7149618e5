use chat_assistant::models::internal::{FeedbackKind, FeedbackRecord, FeedbackStats};
use chat_assistant::services::{FeedbackService, MockLatency, ServiceError};
use chrono::Utc;

fn record(message_id: &str, kind: FeedbackKind) -> FeedbackRecord {
    FeedbackRecord {
        message_id: message_id.to_string(),
        kind,
        comment: None,
        timestamp: Utc::now(),
    }
}

#[tokio::test]
async fn test_submit_and_find() {
    let service = FeedbackService::new(MockLatency::none());
    assert!(service.is_empty().await);

    let mut with_comment = record("m1", FeedbackKind::ThumbsDown);
    with_comment.comment = Some("outdated document".to_string());
    service.submit_feedback(with_comment).await.unwrap();

    let found = service.find("m1").await.unwrap();
    assert_eq!(found.kind, FeedbackKind::ThumbsDown);
    assert_eq!(found.comment.as_deref(), Some("outdated document"));
    assert!(service.find("m2").await.is_none());
}

#[tokio::test]
async fn test_duplicate_rejected() {
    let service = FeedbackService::new(MockLatency::none());
    service
        .submit_feedback(record("m1", FeedbackKind::ThumbsUp))
        .await
        .unwrap();

    let err = service
        .submit_feedback(record("m1", FeedbackKind::ThumbsDown))
        .await
        .unwrap_err();

    assert_eq!(err, ServiceError::DuplicateFeedback("m1".to_string()));
    assert_eq!(service.len().await, 1);
    assert_eq!(service.find("m1").await.unwrap().kind, FeedbackKind::ThumbsUp);
}

#[tokio::test]
async fn test_stats_only_count_requested_messages() {
    let service = FeedbackService::new(MockLatency::none());
    for (id, kind) in [
        ("m1", FeedbackKind::ThumbsUp),
        ("m2", FeedbackKind::ThumbsDown),
        ("m3", FeedbackKind::ThumbsUp),
        ("other", FeedbackKind::ThumbsDown),
    ] {
        service.submit_feedback(record(id, kind)).await.unwrap();
    }

    let stats = service.get_feedback_stats(["m1", "m2", "m3", "m4"]).await;
    assert_eq!(
        stats,
        FeedbackStats {
            positive: 2,
            negative: 1
        }
    );

    let none = service.get_feedback_stats(Vec::<String>::new()).await;
    assert_eq!(none, FeedbackStats::default());
}
