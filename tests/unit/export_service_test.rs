use chat_assistant::models::internal::{
    DateRange, ExportFormat, ExportRequest, Message, Role, SourceCitation,
};
use chat_assistant::services::export_service::{decode_payload, select_messages};
use chat_assistant::services::{ExportService, MockLatency, ServiceError};
use chrono::{Duration, Utc};

fn request(format: ExportFormat) -> ExportRequest {
    ExportRequest {
        format,
        session_id: "0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b".to_string(),
        date_range: None,
        include_system_messages: false,
        include_attachments: true,
    }
}

fn thread() -> Vec<Message> {
    let mut system = Message::assistant("sys-1", "Context loaded", Utc::now(), Vec::new());
    system.role = Role::System;

    let mut old = Message::user("Last month's question");
    old.timestamp = Utc::now() - Duration::days(40);

    vec![
        Message::welcome("Hello!"),
        old,
        system,
        Message::user("What is the leave policy?"),
        Message::assistant(
            "a-1",
            "12 days.",
            Utc::now(),
            vec![SourceCitation {
                filename: "handbook.pdf".to_string(),
                relevance_score: 0.9,
            }],
        ),
    ]
}

#[test]
fn test_system_messages_excluded_by_default() {
    let messages = thread();
    let selected = select_messages(&request(ExportFormat::Txt), &messages);
    assert_eq!(selected.len(), 4);
    assert!(selected.iter().all(|m| m.role != Role::System));

    let mut with_system = request(ExportFormat::Txt);
    with_system.include_system_messages = true;
    assert_eq!(select_messages(&with_system, &messages).len(), 5);
}

#[test]
fn test_date_range_is_inclusive() {
    let messages = thread();
    let edge = messages[1].timestamp;

    let mut req = request(ExportFormat::Json);
    req.date_range = Some(DateRange {
        start: edge,
        end: edge,
    });

    let selected = select_messages(&req, &messages);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].content, "Last month's question");
}

#[tokio::test]
async fn test_export_builds_data_url() {
    let service = ExportService::new(MockLatency::none());
    let messages = thread();

    let result = service
        .export_conversation(&request(ExportFormat::Html), &messages)
        .await
        .unwrap();

    assert!(result.filename.starts_with("conversation-0190a1b2-"));
    assert!(result.filename.ends_with(".html"));
    assert!(result.download_url.starts_with("data:text/plain;charset=utf-8,"));

    let payload = decode_payload(&result.download_url).unwrap();
    assert!(payload.contains("Mock export file for session 0190a1b2-c3d4-7e5f-8a9b-0c1d2e3f4a5b"));
    assert!(payload.contains("Format: html"));
    assert!(payload.contains("Messages: 4"));
}

#[tokio::test]
async fn test_export_of_empty_selection_fails() {
    let service = ExportService::new(MockLatency::none());

    let result = service
        .export_conversation(&request(ExportFormat::Pdf), &[])
        .await;
    assert_eq!(result.unwrap_err(), ServiceError::EmptyExport);
}
