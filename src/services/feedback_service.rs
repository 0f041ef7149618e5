use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::models::internal::{FeedbackKind, FeedbackRecord, FeedbackStats};
use crate::services::{simulate_latency, MockLatency, ServiceError};

/// Append-only feedback log holding at most one record per message.
pub struct FeedbackService {
    records: RwLock<Vec<FeedbackRecord>>,
    latency: MockLatency,
}

impl FeedbackService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            records: RwLock::new(Vec::new()),
            latency,
        }
    }

    pub async fn submit_feedback(&self, record: FeedbackRecord) -> Result<(), ServiceError> {
        simulate_latency(self.latency.submit_feedback).await;

        let mut records = self.records.write().await;
        if records.iter().any(|r| r.message_id == record.message_id) {
            warn!("Duplicate feedback for message {} rejected", record.message_id);
            return Err(ServiceError::DuplicateFeedback(record.message_id));
        }

        info!("📝 Feedback submitted: {} {:?}", record.message_id, record.kind);
        records.push(record);
        Ok(())
    }

    /// Positive/negative counts over the given messages.
    pub async fn get_feedback_stats<I, S>(&self, message_ids: I) -> FeedbackStats
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        simulate_latency(self.latency.feedback_stats).await;

        let ids: Vec<S> = message_ids.into_iter().collect();
        let records = self.records.read().await;

        records
            .iter()
            .filter(|r| ids.iter().any(|id| id.as_ref() == r.message_id))
            .fold(FeedbackStats::default(), |mut stats, r| {
                match r.kind {
                    FeedbackKind::ThumbsUp => stats.positive += 1,
                    FeedbackKind::ThumbsDown => stats.negative += 1,
                }
                stats
            })
    }

    pub async fn find(&self, message_id: &str) -> Option<FeedbackRecord> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.message_id == message_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}
