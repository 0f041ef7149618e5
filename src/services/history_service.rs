use chrono::{Duration, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::models::internal::{ConversationSummary, SessionStatus};
use crate::services::{simulate_latency, MockLatency};

pub struct HistoryService {
    sessions: RwLock<Vec<ConversationSummary>>,
    latency: MockLatency,
}

impl HistoryService {
    /// Seeded with three archived conversations.
    pub fn new(latency: MockLatency) -> Self {
        Self::with_sessions(seed_sessions(), latency)
    }

    pub fn with_sessions(sessions: Vec<ConversationSummary>, latency: MockLatency) -> Self {
        Self {
            sessions: RwLock::new(sessions),
            latency,
        }
    }

    /// All summaries, most recent first.
    pub async fn get_conversation_history(&self) -> Vec<ConversationSummary> {
        simulate_latency(self.latency.history).await;

        let mut sessions = self.sessions.read().await.clone();
        sessions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        sessions
    }

    /// Case-insensitive substring match on title and last message.
    pub async fn search_conversations(&self, query: &str) -> Vec<ConversationSummary> {
        simulate_latency(self.latency.search).await;

        let needle = query.to_lowercase();
        let results: Vec<ConversationSummary> = self
            .sessions
            .read()
            .await
            .iter()
            .filter(|s| {
                s.title.to_lowercase().contains(&needle)
                    || s.last_message.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        debug!("History search {:?}: {} hits", query, results.len());
        results
    }

    /// Removes the conversation; unknown ids are ignored.
    pub async fn delete_conversation(&self, session_id: &str) {
        simulate_latency(self.latency.delete).await;

        let mut sessions = self.sessions.write().await;
        if let Some(index) = sessions.iter().position(|s| s.id == session_id) {
            sessions.remove(index);
            info!("🗑️ Conversation {} deleted", session_id);
        }
    }

    /// Inserts `summary`, replacing any entry with the same id.
    pub async fn record_conversation(&self, summary: ConversationSummary) {
        let mut sessions = self.sessions.write().await;
        sessions.retain(|s| s.id != summary.id);
        info!("Archived conversation {} ({} messages)", summary.id, summary.message_count);
        sessions.push(summary);
    }
}

fn seed_sessions() -> Vec<ConversationSummary> {
    let now = Utc::now();
    vec![
        ConversationSummary {
            id: "session-1".to_string(),
            title: "Hỏi về chính sách nghỉ phép".to_string(),
            last_message: "Cảm ơn bạn đã giải thích rõ ràng!".to_string(),
            timestamp: now - Duration::hours(2),
            message_count: 8,
            status: SessionStatus::Archived,
        },
        ConversationSummary {
            id: "session-2".to_string(),
            title: "Quy trình onboarding".to_string(),
            last_message: "Tôi hiểu rồi, còn gì nữa không?".to_string(),
            timestamp: now - Duration::days(1),
            message_count: 12,
            status: SessionStatus::Archived,
        },
        ConversationSummary {
            id: "session-3".to_string(),
            title: "Hướng dẫn sử dụng hệ thống".to_string(),
            last_message: "Đã clear, thanks!".to_string(),
            timestamp: now - Duration::days(7),
            message_count: 5,
            status: SessionStatus::Archived,
        },
    ]
}
