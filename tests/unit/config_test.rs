use chat_assistant::config::Config;
use chat_assistant::i18n::Language;
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("chat-assistant")
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.backend_url, "http://localhost:8000");
    assert!(!config.offline);
    assert_eq!(config.default_language, Language::Vi);
    assert_eq!(config.request_timeout(), Duration::from_secs(30));
    assert_eq!(config.suggestion_restore_delay(), Duration::from_secs(1));
    assert_eq!(config.log_level, "info");
    assert_eq!(config.max_suggestions, 5);
}

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load_from(&dir.path().join("absent")).unwrap();

    assert_eq!(config.backend_url, Config::default().backend_url);
    assert_eq!(config.default_language, Language::Vi);
}

#[test]
fn test_file_overrides_defaults() {
    let file = write_config(
        r#"
backend_url = "http://chat.internal:9000"
default_language = "en"
suggestion_restore_delay_ms = 250
mock_latency_scale = 0.0
max_suggestions = 3
"#,
    );

    let config = Config::load_from(file.path()).unwrap();

    assert_eq!(config.backend_url, "http://chat.internal:9000");
    assert_eq!(config.default_language, Language::En);
    assert_eq!(config.suggestion_restore_delay(), Duration::from_millis(250));
    assert_eq!(config.max_suggestions, 3);
    assert_eq!(config.mock_latency().export, Duration::ZERO);
    // Untouched keys keep their defaults
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_invalid_timeout_rejected() {
    let file = write_config("request_timeout_secs = 0\n");
    assert!(Config::load_from(file.path()).is_err());
}

#[test]
fn test_invalid_url_rejected() {
    let file = write_config("backend_url = \"not a url\"\n");
    assert!(Config::load_from(file.path()).is_err());
}

#[test]
fn test_unknown_language_rejected() {
    let file = write_config("default_language = \"fr\"\n");
    assert!(Config::load_from(file.path()).is_err());
}

#[test]
fn test_latency_scale() {
    let mut config = Config::default();
    config.mock_latency_scale = 0.5;
    assert_eq!(config.mock_latency().export, Duration::from_millis(750));
}
