//! In-memory stand-ins for the assistant's auxiliary services, plus the
//! chat backend clients.

pub mod backend_client;
pub mod export_service;
pub mod feedback_service;
pub mod history_service;
pub mod mock_backend;
pub mod quick_action_service;
pub mod suggestion_service;

use std::sync::Arc;
use std::time::Duration;

// Re-export for convenience
pub use backend_client::{BackendError, ChatBackend, HttpChatBackend};
pub use export_service::ExportService;
pub use feedback_service::FeedbackService;
pub use history_service::HistoryService;
pub use mock_backend::CannedChatBackend;
pub use quick_action_service::{render_template, QuickActionService};
pub use suggestion_service::SuggestionService;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Feedback already submitted for message {0}")]
    DuplicateFeedback(String),
    #[error("Nothing to export")]
    EmptyExport,
}

/// Artificial delays applied by the mock services.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockLatency {
    pub suggestions: Duration,
    pub contextual_suggestions: Duration,
    pub track_usage: Duration,
    pub submit_feedback: Duration,
    pub feedback_stats: Duration,
    pub export: Duration,
    pub quick_actions: Duration,
    pub execute_quick_action: Duration,
    pub history: Duration,
    pub search: Duration,
    pub delete: Duration,
    pub chat_response: Duration,
}

impl Default for MockLatency {
    fn default() -> Self {
        Self {
            suggestions: Duration::from_millis(300),
            contextual_suggestions: Duration::from_millis(400),
            track_usage: Duration::from_millis(100),
            submit_feedback: Duration::from_millis(200),
            feedback_stats: Duration::from_millis(150),
            export: Duration::from_millis(1500),
            quick_actions: Duration::from_millis(200),
            execute_quick_action: Duration::from_millis(100),
            history: Duration::from_millis(300),
            search: Duration::from_millis(500),
            delete: Duration::from_millis(200),
            chat_response: Duration::from_millis(800),
        }
    }
}

impl MockLatency {
    pub fn none() -> Self {
        Self::scaled(0.0)
    }

    /// Default delays multiplied by `factor`. Negative factors count as zero.
    pub fn scaled(factor: f64) -> Self {
        let d = Self::default();
        let f = factor.max(0.0);
        let s = |v: Duration| v.mul_f64(f);
        Self {
            suggestions: s(d.suggestions),
            contextual_suggestions: s(d.contextual_suggestions),
            track_usage: s(d.track_usage),
            submit_feedback: s(d.submit_feedback),
            feedback_stats: s(d.feedback_stats),
            export: s(d.export),
            quick_actions: s(d.quick_actions),
            execute_quick_action: s(d.execute_quick_action),
            history: s(d.history),
            search: s(d.search),
            delete: s(d.delete),
            chat_response: s(d.chat_response),
        }
    }
}

pub(crate) async fn simulate_latency(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// The mock service instances one front-end works against.
#[derive(Clone)]
pub struct MockServices {
    pub suggestions: Arc<SuggestionService>,
    pub feedback: Arc<FeedbackService>,
    pub quick_actions: Arc<QuickActionService>,
    pub export: Arc<ExportService>,
    pub history: Arc<HistoryService>,
}

impl MockServices {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            suggestions: Arc::new(SuggestionService::new(latency)),
            feedback: Arc::new(FeedbackService::new(latency)),
            quick_actions: Arc::new(QuickActionService::new(latency)),
            export: Arc::new(ExportService::new(latency)),
            history: Arc::new(HistoryService::new(latency)),
        }
    }
}

impl Default for MockServices {
    fn default() -> Self {
        Self::new(MockLatency::default())
    }
}
