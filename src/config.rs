use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use validator::Validate;

use crate::i18n::Language;
use crate::services::MockLatency;

/// Main configuration for the chat assistant
#[derive(Debug, Deserialize, Validate, Clone)]
pub struct Config {
    /// Base URL of the chat backend
    #[validate(url)]
    pub backend_url: String,

    /// Answer from the built-in canned backend instead of `backend_url`
    pub offline: bool,

    /// Language of new sessions
    pub default_language: Language,

    /// HTTP request timeout for backend calls
    #[validate(range(min = 1, max = 300))]
    pub request_timeout_secs: u64,

    /// How long suggestions stay hidden after a successful reply
    #[validate(range(max = 60000))]
    pub suggestion_restore_delay_ms: u64,

    /// Multiplier for the mock services' artificial delays (0 disables them)
    #[validate(range(min = 0.0, max = 10.0))]
    pub mock_latency_scale: f64,

    /// Log level (e.g., info, debug, trace)
    pub log_level: String,

    /// Maximum number of suggestions shown at once
    #[validate(range(min = 1, max = 20))]
    pub max_suggestions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            offline: false,
            default_language: Language::Vi,
            request_timeout_secs: 30,
            suggestion_restore_delay_ms: 1000,
            mock_latency_scale: 1.0,
            log_level: "info".to_string(),
            max_suggestions: 5,
        }
    }
}

impl Config {
    /// Defaults, then `~/.chat-assistant/config.*`, then `CHAT_ASSISTANT__*` env vars.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(&default_config_path())
    }

    /// Same as [`Config::load`] but reads the optional file at `path`
    /// (extension may be omitted).
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        let defaults = Config::default();
        let settings = config::Config::builder()
            .set_default("backend_url", defaults.backend_url)?
            .set_default("offline", defaults.offline)?
            .set_default("default_language", defaults.default_language.code())?
            .set_default("request_timeout_secs", defaults.request_timeout_secs)?
            .set_default(
                "suggestion_restore_delay_ms",
                defaults.suggestion_restore_delay_ms,
            )?
            .set_default("mock_latency_scale", defaults.mock_latency_scale)?
            .set_default("log_level", defaults.log_level)?
            .set_default("max_suggestions", defaults.max_suggestions as u64)?
            .add_source(config::File::with_name(&path.to_string_lossy()).required(false))
            // Environment overrides: CHAT_ASSISTANT__BACKEND_URL, CHAT_ASSISTANT__OFFLINE, etc.
            .add_source(config::Environment::with_prefix("CHAT_ASSISTANT").separator("__"))
            .build()?;

        let cfg: Config = settings.try_deserialize()?;
        cfg.validate()
            .map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Ok(cfg)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn suggestion_restore_delay(&self) -> Duration {
        Duration::from_millis(self.suggestion_restore_delay_ms)
    }

    pub fn mock_latency(&self) -> MockLatency {
        MockLatency::scaled(self.mock_latency_scale)
    }
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".chat-assistant")
        .join("config")
}
