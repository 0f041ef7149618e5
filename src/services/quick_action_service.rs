use std::collections::HashMap;
use tracing::{debug, info};

use crate::i18n::Language;
use crate::models::internal::{Category, QuickAction};
use crate::services::{simulate_latency, MockLatency, ServiceError};

/// Substituted for placeholders that have no dedicated fallback.
pub const DEFAULT_PLACEHOLDER: &str = "general";

fn fallback_value(token: &str) -> &'static str {
    match token {
        "topic" => "general",
        "process" => "standard",
        "technology" => "system",
        _ => DEFAULT_PLACEHOLDER,
    }
}

/// Replaces every `{{token}}` in `template`.
///
/// Blank or missing values fall back to a fixed word, so the rendered query
/// never carries a literal placeholder. Values containing braces count as
/// missing.
pub fn render_template(template: &str, params: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };

        out.push_str(&rest[..start]);
        let token = after[..end].trim();
        let value = params
            .get(token)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty() && !v.contains("{{") && !v.contains("}}"))
            .unwrap_or_else(|| fallback_value(token));
        out.push_str(value);

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    out
}

/// Placeholder names in order of appearance.
pub fn template_tokens(template: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        tokens.push(after[..end].trim().to_string());
        rest = &after[end + 2..];
    }
    tokens
}

pub struct QuickActionService {
    catalog: Vec<QuickAction>,
    latency: MockLatency,
}

impl QuickActionService {
    pub fn new(latency: MockLatency) -> Self {
        Self {
            catalog: default_catalog(),
            latency,
        }
    }

    /// The whole catalog; `language` only matters for label display.
    pub async fn get_quick_actions(&self, language: Language) -> Vec<QuickAction> {
        simulate_latency(self.latency.quick_actions).await;
        debug!("Listing {} quick actions (lang: {})", self.catalog.len(), language);
        self.catalog.clone()
    }

    pub async fn execute_quick_action(
        &self,
        action_id: &str,
        params: &HashMap<String, String>,
    ) -> Result<String, ServiceError> {
        simulate_latency(self.latency.execute_quick_action).await;

        let action = self
            .catalog
            .iter()
            .find(|a| a.id == action_id)
            .ok_or_else(|| ServiceError::NotFound(format!("quick action {}", action_id)))?;

        let query = render_template(&action.query, params);
        info!("⚡ Quick action executed: {}", action_id);
        Ok(query)
    }
}

fn action(
    id: &str,
    label_vi: &str,
    label_en: &str,
    query: &str,
    icon: &str,
    category: Category,
) -> QuickAction {
    QuickAction {
        id: id.to_string(),
        label_vi: label_vi.to_string(),
        label_en: label_en.to_string(),
        query: query.to_string(),
        icon: icon.to_string(),
        category,
    }
}

pub fn default_catalog() -> Vec<QuickAction> {
    vec![
        action(
            "find-policy",
            "Tìm Chính sách",
            "Find Policy",
            "Cho tôi biết các chính sách về {{topic}}",
            "document",
            Category::Policy,
        ),
        action(
            "find-procedure",
            "Tìm Quy trình",
            "Find Procedure",
            "Quy trình {{process}} được thực hiện như thế nào?",
            "clipboard",
            Category::Procedure,
        ),
        action(
            "tech-guide",
            "Hướng dẫn Kỹ thuật",
            "Technical Guide",
            "Hướng dẫn kỹ thuật về {{technology}}",
            "cog",
            Category::TechnicalGuide,
        ),
    ]
}
