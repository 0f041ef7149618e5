use chat_assistant::i18n::Language;
use chat_assistant::models::internal::Category;
use chat_assistant::services::{MockLatency, QuickActionService, ServiceError};
use std::collections::HashMap;

#[tokio::test]
async fn test_catalog_labels() {
    let service = QuickActionService::new(MockLatency::none());
    let actions = service.get_quick_actions(Language::En).await;

    assert_eq!(actions.len(), 3);
    assert_eq!(actions[0].label(Language::En), "Find Policy");
    assert_eq!(actions[0].label(Language::Vi), "Tìm Chính sách");
    assert_eq!(actions[2].category, Category::TechnicalGuide);
}

#[tokio::test]
async fn test_execute_fills_placeholders() {
    let service = QuickActionService::new(MockLatency::none());
    let params = HashMap::from([("topic".to_string(), "nghỉ phép".to_string())]);

    let query = service
        .execute_quick_action("find-policy", &params)
        .await
        .unwrap();
    assert_eq!(query, "Cho tôi biết các chính sách về nghỉ phép");
}

#[tokio::test]
async fn test_execute_never_leaves_placeholders() {
    let service = QuickActionService::new(MockLatency::none());

    for id in ["find-policy", "find-procedure", "tech-guide"] {
        let query = service
            .execute_quick_action(id, &HashMap::new())
            .await
            .unwrap();
        assert!(!query.contains("{{"), "{} rendered {}", id, query);
        assert!(!query.contains("}}"), "{} rendered {}", id, query);
    }
}

#[tokio::test]
async fn test_execute_rejects_placeholder_values() {
    let service = QuickActionService::new(MockLatency::none());
    let params = HashMap::from([
        ("topic".to_string(), "{{topic}}".to_string()),
        ("process".to_string(), "a }} b".to_string()),
    ]);

    let policy = service
        .execute_quick_action("find-policy", &params)
        .await
        .unwrap();
    assert_eq!(policy, "Cho tôi biết các chính sách về general");

    let procedure = service
        .execute_quick_action("find-procedure", &params)
        .await
        .unwrap();
    assert_eq!(procedure, "Quy trình standard được thực hiện như thế nào?");
}

#[tokio::test]
async fn test_execute_unknown_action() {
    let service = QuickActionService::new(MockLatency::none());
    let err = service
        .execute_quick_action("missing", &HashMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
}
