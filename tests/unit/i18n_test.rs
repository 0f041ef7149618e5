use chat_assistant::i18n::{translate, Language, Localizer};

const SHARED_KEYS: [&str; 8] = [
    "chat.title",
    "chat.placeholder",
    "chat.connected",
    "feedback.thankYou",
    "export.noMessages",
    "history.today",
    "quickActions.findPolicy",
    "common.error",
];

#[test]
fn test_shared_keys_translated_in_both_languages() {
    for key in SHARED_KEYS {
        for language in Language::ALL {
            assert_ne!(translate(language, key), key, "{} missing for {}", key, language);
        }
        assert_ne!(translate(Language::Vi, key), "");
    }
}

#[test]
fn test_language_metadata() {
    assert_eq!(Language::default(), Language::Vi);
    assert_eq!(Language::Vi.display_name(), "Tiếng Việt");
    assert_eq!(Language::En.display_name(), "English");
    assert_eq!(Language::En.to_string(), "en");
}

#[test]
fn test_language_serde() {
    assert_eq!(serde_json::to_string(&Language::Vi).unwrap(), "\"vi\"");
    let parsed: Language = serde_json::from_str("\"en\"").unwrap();
    assert_eq!(parsed, Language::En);
}

#[test]
fn test_welcome_text_per_language() {
    assert_eq!(
        Localizer::new(Language::Vi).t("chat.welcome"),
        "Xin chào! Tôi là trợ lý RAG của bạn. Hãy tải lên tài liệu và đặt câu hỏi!"
    );
    assert!(Localizer::new(Language::En).t("chat.welcome").starts_with("Hello!"));
}
