//! Conversation session state and the user intents that mutate it.
//!
//! A [`ChatSession`] owns one message thread. Every operation that talks to
//! the backend or a mock service takes `&mut self`, so sends are serialized:
//! a second send cannot start before the first has appended its reply.

pub mod history;
pub mod state;

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::api::dto::{ChatResponse, SendMessageRequest};
use crate::config::Config;
use crate::i18n::{Language, Localizer};
use crate::models::internal::{
    ConversationSummary, DateRange, ExportFormat, ExportRequest, ExportResult, FeedbackKind,
    FeedbackRecord, FeedbackStats, Message, QuickAction, Role, SessionStatus, SourceCitation,
    Suggestion,
};
use crate::services::export_service::select_messages;
use crate::services::{ChatBackend, MockServices, ServiceError};

pub use history::{HistoryBrowser, RelativeDay};
pub use state::{Connectivity, SendOutcome, SessionSnapshot, SuggestionVisibility};

const TITLE_MAX_CHARS: usize = 60;
const PREVIEW_MAX_CHARS: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Message is empty")]
    EmptyMessage,
    #[error("Backend is not connected")]
    NotConnected,
    #[error("No messages to export")]
    NothingToExport,
    #[error("No failed message to retry")]
    NothingToRetry,
    #[error("Unknown message: {0}")]
    UnknownMessage(String),
    #[error("Feedback is not accepted for message {0}")]
    FeedbackNotAllowed(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub language: Language,
    pub suggestion_restore_delay: Duration,
    pub max_suggestions: usize,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            language: Language::Vi,
            suggestion_restore_delay: Duration::from_secs(1),
            max_suggestions: 5,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(cfg: &Config) -> Self {
        Self {
            language: cfg.default_language,
            suggestion_restore_delay: cfg.suggestion_restore_delay(),
            max_suggestions: cfg.max_suggestions,
        }
    }
}

/// What to put in an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub include_system_messages: bool,
    pub include_attachments: bool,
    pub date_range: Option<DateRange>,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            include_system_messages: false,
            include_attachments: true,
            date_range: None,
        }
    }
}

pub struct ChatSession {
    id: String,
    created_at: DateTime<Utc>,
    messages: Vec<Message>,
    localizer: Localizer,
    loading: bool,
    connectivity: Connectivity,
    suggestions: SuggestionVisibility,
    last_failed: Option<String>,
    options: SessionOptions,
    backend: Arc<dyn ChatBackend>,
    services: MockServices,
    updates: watch::Sender<SessionSnapshot>,
}

fn new_session_id() -> String {
    Uuid::now_v7().to_string()
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max).collect();
        out.push('…');
        out
    }
}

impl ChatSession {
    /// A fresh session holding only the welcome message. Connectivity starts
    /// as `Checking` until [`ChatSession::check_connection`] runs.
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        services: MockServices,
        options: SessionOptions,
    ) -> Self {
        let localizer = Localizer::new(options.language);
        let id = new_session_id();
        let created_at = Utc::now();
        let messages = vec![Message::welcome(localizer.t("chat.welcome"))];

        let snapshot = SessionSnapshot {
            session_id: id.clone(),
            created_at,
            messages: messages.clone(),
            language: localizer.language(),
            loading: false,
            connectivity: Connectivity::Checking,
            suggestions: SuggestionVisibility::Visible,
        };
        let (updates, _) = watch::channel(snapshot);

        info!("💬 Session {} started", id);

        Self {
            id,
            created_at,
            messages,
            localizer,
            loading: false,
            connectivity: Connectivity::Checking,
            suggestions: SuggestionVisibility::Visible,
            last_failed: None,
            options,
            backend,
            services,
            updates,
        }
    }

    /// [`ChatSession::new`] followed by an initial health probe.
    pub async fn start(
        backend: Arc<dyn ChatBackend>,
        services: MockServices,
        options: SessionOptions,
    ) -> Self {
        let mut session = Self::new(backend, services, options);
        session.check_connection().await;
        session
    }

    // ==================== ACCESSORS ====================

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn language(&self) -> Language {
        self.localizer.language()
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn can_send(&self) -> bool {
        !self.loading && self.connectivity.is_connected()
    }

    pub fn suggestion_visibility(&self) -> SuggestionVisibility {
        self.suggestions
    }

    pub fn suggestions_visible(&self) -> bool {
        self.suggestions.is_visible()
    }

    pub fn services(&self) -> &MockServices {
        &self.services
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id.clone(),
            created_at: self.created_at,
            messages: self.messages.clone(),
            language: self.localizer.language(),
            loading: self.loading,
            connectivity: self.connectivity,
            suggestions: self.suggestions,
        }
    }

    /// Receives a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.updates.subscribe()
    }

    fn publish(&self) {
        self.updates.send_replace(self.snapshot());
    }

    // ==================== CONNECTIVITY ====================

    pub async fn check_connection(&mut self) -> Connectivity {
        self.connectivity = Connectivity::Checking;
        self.publish();

        self.connectivity = match self.backend.health_check().await {
            Ok(true) => {
                info!("✅ Backend connected");
                Connectivity::Connected
            }
            Ok(false) => {
                warn!("⚠️ Backend health check returned a failure status");
                Connectivity::Disconnected
            }
            Err(e) => {
                error!("❌ Backend connection failed: {}", e);
                Connectivity::Disconnected
            }
        };
        self.publish();
        self.connectivity
    }

    // ==================== MESSAGING ====================

    /// Sends `text` to the backend.
    ///
    /// Input errors return `Err` without touching the thread. Once the user
    /// message is appended the call always returns `Ok`, with the backend
    /// failure (if any) reported in [`SendOutcome::Failed`] and in the thread.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, SessionError> {
        let content = text.trim();
        if content.is_empty() {
            return Err(SessionError::EmptyMessage);
        }
        if !self.can_send() {
            return Err(SessionError::NotConnected);
        }

        self.messages.push(Message::user(content));
        self.loading = true;
        self.suggestions = SuggestionVisibility::Hidden;
        self.publish();

        let request = SendMessageRequest {
            message: content.to_string(),
            conversation_id: Some(self.id.clone()),
        };
        debug!("Sending message in session {}", self.id);

        let outcome = match self.backend.send_message(request).await {
            Ok(reply) => {
                let message = self.reply_message(reply);
                let message_id = message.id.clone();
                self.messages.push(message);
                self.suggestions = SuggestionVisibility::RestoreAt(
                    Instant::now() + self.options.suggestion_restore_delay,
                );
                self.last_failed = None;
                SendOutcome::Replied { message_id }
            }
            Err(e) => {
                error!("Chat error: {}", e);
                let error = e.to_string();
                let content = self
                    .localizer
                    .t_with("chat.sendFailed", &[("error", error.as_str())]);
                let message =
                    Message::assistant(Uuid::new_v4().to_string(), content, Utc::now(), Vec::new());
                let message_id = message.id.clone();
                self.messages.push(message);
                self.suggestions = SuggestionVisibility::Visible;
                self.connectivity = Connectivity::Disconnected;
                self.last_failed = Some(text.trim().to_string());
                SendOutcome::Failed { message_id, error }
            }
        };

        self.loading = false;
        self.publish();
        Ok(outcome)
    }

    fn reply_message(&self, reply: ChatResponse) -> Message {
        let mut id = reply.id;
        if self.messages.iter().any(|m| m.id == id) {
            warn!("Backend reused message id {}; assigning a new one", id);
            id = Uuid::new_v4().to_string();
        }
        let sources: Vec<SourceCitation> = reply.sources.into_iter().map(Into::into).collect();
        Message::assistant(id, reply.content, reply.timestamp, sources)
    }

    /// Re-sends the text of the last failed send, probing the backend
    /// first when it is marked disconnected.
    pub async fn retry_last_send(&mut self) -> Result<SendOutcome, SessionError> {
        let text = self.last_failed.clone().ok_or(SessionError::NothingToRetry)?;
        if !self.connectivity.is_connected() {
            self.check_connection().await;
        }
        self.send_message(&text).await
    }

    pub fn last_failed(&self) -> Option<&str> {
        self.last_failed.as_deref()
    }

    /// Starts over with a new id and only the welcome message. A thread with
    /// user messages is archived into history first.
    pub async fn clear_session(&mut self) {
        if let Some(summary) = self.summary(SessionStatus::Archived) {
            self.services.history.record_conversation(summary).await;
        }

        let mut id = new_session_id();
        while id == self.id {
            id = new_session_id();
        }
        info!("🧹 Session {} cleared, new session {}", self.id, id);

        self.id = id;
        self.created_at = Utc::now();
        self.messages = vec![Message::welcome(self.localizer.t("chat.welcome"))];
        self.suggestions = SuggestionVisibility::Visible;
        self.last_failed = None;
        self.publish();
    }

    /// History entry for this thread, or `None` before the first user message.
    pub fn summary(&self, status: SessionStatus) -> Option<ConversationSummary> {
        let first_user = self.messages.iter().find(|m| m.role == Role::User)?;
        let last = self.messages.last()?;
        Some(ConversationSummary {
            id: self.id.clone(),
            title: truncate_chars(&first_user.content, TITLE_MAX_CHARS),
            last_message: truncate_chars(&last.content, PREVIEW_MAX_CHARS),
            timestamp: last.timestamp,
            message_count: u32::try_from(self.messages.len()).unwrap_or(u32::MAX),
            status,
        })
    }

    pub fn set_language(&mut self, language: Language) {
        if self.localizer.language() != language {
            info!("🌍 Language switched to {}", language);
            self.localizer.set_language(language);
            self.publish();
        }
    }

    // ==================== SUGGESTIONS ====================

    /// Contextual suggestions for the current thread. Empty while hidden or
    /// before the conversation has started.
    pub async fn load_suggestions(&self) -> Vec<Suggestion> {
        if !self.suggestions_visible() || self.messages.len() <= 1 {
            return Vec::new();
        }

        let history: Vec<String> = self.messages.iter().map(|m| m.content.clone()).collect();
        let mut suggestions = self
            .services
            .suggestions
            .get_contextual_suggestions(&history, self.language())
            .await;
        suggestions.truncate(self.options.max_suggestions);
        suggestions
    }

    /// Records the click, then asks the suggestion's question.
    pub async fn select_suggestion(
        &mut self,
        suggestion_id: &str,
    ) -> Result<SendOutcome, SessionError> {
        let suggestion = self
            .services
            .suggestions
            .find(suggestion_id)
            .await
            .ok_or_else(|| ServiceError::NotFound(format!("suggestion {}", suggestion_id)))?;

        self.services
            .suggestions
            .track_suggestion_usage(suggestion_id)
            .await;

        let question = suggestion.question(self.language()).to_string();
        self.send_message(&question).await
    }

    // ==================== QUICK ACTIONS ====================

    pub async fn quick_actions(&self) -> Vec<QuickAction> {
        self.services
            .quick_actions
            .get_quick_actions(self.language())
            .await
    }

    /// Fills the action's template from `params` and sends the result.
    pub async fn run_quick_action(
        &mut self,
        action_id: &str,
        params: &HashMap<String, String>,
    ) -> Result<SendOutcome, SessionError> {
        if !self.can_send() {
            return Err(SessionError::NotConnected);
        }

        let query = self
            .services
            .quick_actions
            .execute_quick_action(action_id, params)
            .await?;
        self.send_message(&query).await
    }

    // ==================== FEEDBACK ====================

    pub async fn submit_feedback(
        &mut self,
        message_id: &str,
        kind: FeedbackKind,
        comment: Option<&str>,
    ) -> Result<FeedbackRecord, SessionError> {
        let index = self
            .messages
            .iter()
            .position(|m| m.id == message_id)
            .ok_or_else(|| SessionError::UnknownMessage(message_id.to_string()))?;

        let message = &self.messages[index];
        if message.role != Role::Assistant || message.is_welcome() {
            return Err(SessionError::FeedbackNotAllowed(message_id.to_string()));
        }
        if message.feedback.is_some() {
            return Err(ServiceError::DuplicateFeedback(message_id.to_string()).into());
        }

        let record = FeedbackRecord {
            message_id: message_id.to_string(),
            kind,
            comment: comment
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            timestamp: Utc::now(),
        };

        self.services.feedback.submit_feedback(record.clone()).await?;

        self.messages[index].feedback = Some(record.clone());
        self.publish();
        Ok(record)
    }

    pub async fn feedback_stats(&self) -> FeedbackStats {
        let ids = self
            .messages
            .iter()
            .filter(|m| m.role == Role::Assistant)
            .map(|m| m.id.as_str());
        self.services.feedback.get_feedback_stats(ids).await
    }

    // ==================== EXPORT ====================

    /// Exports the thread. An empty selection is rejected here, before the
    /// export service is called.
    pub async fn export(&self, options: ExportOptions) -> Result<ExportResult, SessionError> {
        let request = ExportRequest {
            format: options.format,
            session_id: self.id.clone(),
            date_range: options.date_range,
            include_system_messages: options.include_system_messages,
            include_attachments: options.include_attachments,
        };

        if select_messages(&request, &self.messages).is_empty() {
            return Err(SessionError::NothingToExport);
        }

        Ok(self
            .services
            .export
            .export_conversation(&request, &self.messages)
            .await?)
    }
}
