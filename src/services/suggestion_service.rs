use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::i18n::Language;
use crate::models::internal::{Category, Suggestion};
use crate::services::{simulate_latency, MockLatency};

/// Keyword sets checked in order; the first hit picks the category.
const CONTEXT_KEYWORDS: [(Category, [&str; 2]); 3] = [
    (Category::Policy, ["policy", "chính sách"]),
    (Category::Procedure, ["procedure", "quy trình"]),
    (Category::TechnicalGuide, ["technical", "kỹ thuật"]),
];

/// Entries returned when no keyword matches.
const FALLBACK_COUNT: usize = 3;

pub struct SuggestionService {
    catalog: RwLock<Vec<Suggestion>>,
    latency: MockLatency,
}

impl SuggestionService {
    pub fn new(latency: MockLatency) -> Self {
        Self::with_catalog(default_catalog(), latency)
    }

    pub fn with_catalog(catalog: Vec<Suggestion>, latency: MockLatency) -> Self {
        Self {
            catalog: RwLock::new(catalog),
            latency,
        }
    }

    /// Catalog entries, optionally restricted to `category`, most used first.
    pub async fn get_suggestions(
        &self,
        category: Option<Category>,
        language: Language,
    ) -> Vec<Suggestion> {
        simulate_latency(self.latency.suggestions).await;
        debug!("Listing suggestions (category: {:?}, lang: {})", category, language);

        let mut suggestions: Vec<Suggestion> = self
            .catalog
            .read()
            .await
            .iter()
            .filter(|s| category.map_or(true, |c| s.category == c))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among equal counts
        suggestions.sort_by(|a, b| b.usage_count.cmp(&a.usage_count));
        suggestions
    }

    /// Picks follow-up questions from keywords in the conversation so far.
    pub async fn get_contextual_suggestions(
        &self,
        history: &[String],
        language: Language,
    ) -> Vec<Suggestion> {
        simulate_latency(self.latency.contextual_suggestions).await;

        let category = classify_history(history);
        debug!(
            "Contextual suggestions for {} history entries (lang: {}): {:?}",
            history.len(),
            language,
            category
        );

        let catalog = self.catalog.read().await;
        match category {
            Some(category) => catalog
                .iter()
                .filter(|s| s.category == category)
                .cloned()
                .collect(),
            None => catalog.iter().take(FALLBACK_COUNT).cloned().collect(),
        }
    }

    /// Best-effort usage telemetry; unknown ids are only logged.
    pub async fn track_suggestion_usage(&self, suggestion_id: &str) {
        simulate_latency(self.latency.track_usage).await;

        let mut catalog = self.catalog.write().await;
        match catalog.iter_mut().find(|s| s.id == suggestion_id) {
            Some(suggestion) => {
                suggestion.usage_count = suggestion.usage_count.saturating_add(1);
                info!(
                    "📊 Suggestion {} usage tracked ({})",
                    suggestion_id, suggestion.usage_count
                );
            }
            None => warn!("Usage tracked for unknown suggestion {}", suggestion_id),
        }
    }

    pub async fn find(&self, suggestion_id: &str) -> Option<Suggestion> {
        self.catalog
            .read()
            .await
            .iter()
            .find(|s| s.id == suggestion_id)
            .cloned()
    }
}

/// Category whose keywords appear in the lowercased history, if any.
pub fn classify_history(history: &[String]) -> Option<Category> {
    let text = history.join(" ").to_lowercase();
    CONTEXT_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(category, _)| *category)
}

fn suggestion(
    id: &str,
    category: Category,
    question_vi: &str,
    question_en: &str,
    priority: u8,
    usage_count: u32,
) -> Suggestion {
    Suggestion {
        id: id.to_string(),
        category,
        question_vi: question_vi.to_string(),
        question_en: question_en.to_string(),
        priority,
        usage_count,
    }
}

pub fn default_catalog() -> Vec<Suggestion> {
    vec![
        suggestion(
            "1",
            Category::Policy,
            "Chính sách nghỉ phép của công ty như thế nào?",
            "What is the company leave policy?",
            1,
            15,
        ),
        suggestion(
            "2",
            Category::Procedure,
            "Quy trình onboarding nhân viên mới?",
            "What is the new employee onboarding process?",
            2,
            12,
        ),
        suggestion(
            "3",
            Category::TechnicalGuide,
            "Hướng dẫn sử dụng hệ thống HR?",
            "How to use the HR system?",
            3,
            8,
        ),
        suggestion(
            "4",
            Category::Policy,
            "Chính sách làm việc từ xa?",
            "What is the remote work policy?",
            1,
            20,
        ),
        suggestion(
            "5",
            Category::Procedure,
            "Cách báo cáo chi phí công tác?",
            "How to report business expenses?",
            2,
            6,
        ),
    ]
}
