use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::api::dto::{ChatResponse, SendMessageRequest, SourceDto};
use crate::models::internal::Category;
use crate::services::backend_client::{BackendError, ChatBackend};
use crate::services::simulate_latency;
use crate::services::suggestion_service::classify_history;

/// Offline backend answering from a few canned replies.
pub struct CannedChatBackend {
    delay: Duration,
    healthy: AtomicBool,
    replies: AtomicU64,
}

impl CannedChatBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            healthy: AtomicBool::new(true),
            replies: AtomicU64::new(0),
        }
    }

    /// Simulates the backend going away (or coming back).
    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }

    pub fn reply_count(&self) -> u64 {
        self.replies.load(Ordering::SeqCst)
    }
}

impl Default for CannedChatBackend {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

fn canned_reply(message: &str) -> (String, Vec<SourceDto>) {
    let source = |filename: &str, relevance_score: f32| SourceDto {
        filename: filename.to_string(),
        relevance_score,
    };

    match classify_history(&[message.to_string()]) {
        Some(Category::Policy) => (
            "Company policies are described in the employee handbook. \
             Leave, remote work and expense rules each have their own section."
                .to_string(),
            vec![source("employee-handbook.pdf", 0.92)],
        ),
        Some(Category::Procedure) => (
            "Procedures are tracked in the operations manual. \
             Start with the checklist for your team and follow the approval steps."
                .to_string(),
            vec![source("operations-manual.pdf", 0.88)],
        ),
        Some(Category::TechnicalGuide) => (
            "Technical guides live in the internal knowledge base. \
             Search by system name to find the setup and troubleshooting pages."
                .to_string(),
            vec![source("it-knowledge-base.md", 0.81)],
        ),
        None => (
            format!(
                "I could not find documents about \"{}\" yet. Try uploading related files.",
                message.trim()
            ),
            Vec::new(),
        ),
    }
}

#[async_trait]
impl ChatBackend for CannedChatBackend {
    async fn health_check(&self) -> Result<bool, BackendError> {
        Ok(self.healthy.load(Ordering::SeqCst))
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<ChatResponse, BackendError> {
        simulate_latency(self.delay).await;

        if !self.healthy.load(Ordering::SeqCst) {
            return Err(BackendError::Unavailable(
                "offline backend is switched off".to_string(),
            ));
        }

        let (content, sources) = canned_reply(&request.message);
        self.replies.fetch_add(1, Ordering::SeqCst);
        debug!("Canned reply for conversation {:?}", request.conversation_id);

        Ok(ChatResponse {
            id: Uuid::new_v4().to_string(),
            conversation_id: request.conversation_id,
            content,
            timestamp: Utc::now(),
            sources,
        })
    }
}
