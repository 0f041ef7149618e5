use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::internal::ConversationSummary;
use crate::services::HistoryService;

/// Age bucket shown next to a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeDay {
    Today,
    Yesterday,
    ThisWeek,
    Older,
}

impl RelativeDay {
    pub fn from_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let hours = (now - timestamp).num_minutes() as f64 / 60.0;
        let days = hours / 24.0;

        if hours < 24.0 {
            RelativeDay::Today
        } else if days < 2.0 {
            RelativeDay::Yesterday
        } else if days < 7.0 {
            RelativeDay::ThisWeek
        } else {
            RelativeDay::Older
        }
    }

    pub fn label_key(&self) -> &'static str {
        match self {
            RelativeDay::Today => "history.today",
            RelativeDay::Yesterday => "history.yesterday",
            RelativeDay::ThisWeek => "history.thisWeek",
            RelativeDay::Older => "history.older",
        }
    }
}

/// Caller-side view over the history service: keeps the displayed list and
/// turns a blank search into "show everything".
pub struct HistoryBrowser {
    service: Arc<HistoryService>,
    entries: Vec<ConversationSummary>,
    query: String,
}

impl HistoryBrowser {
    pub fn new(service: Arc<HistoryService>) -> Self {
        Self {
            service,
            entries: Vec::new(),
            query: String::new(),
        }
    }

    pub async fn refresh(&mut self) -> &[ConversationSummary] {
        self.entries = self.service.get_conversation_history().await;
        &self.entries
    }

    pub async fn search(&mut self, query: &str) -> &[ConversationSummary] {
        self.query = query.to_string();
        let query = query.trim();
        if query.is_empty() {
            return self.refresh().await;
        }
        self.entries = self.service.search_conversations(query).await;
        &self.entries
    }

    pub async fn delete(&mut self, session_id: &str) {
        self.service.delete_conversation(session_id).await;
        self.entries.retain(|s| s.id != session_id);
    }

    pub fn entries(&self) -> &[ConversationSummary] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}
