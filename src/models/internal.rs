use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::i18n::Language;

/// Id of the greeting that opens every session. It never takes feedback.
pub const WELCOME_MESSAGE_ID: &str = "welcome";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub filename: String,
    pub relevance_score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceCitation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<FeedbackRecord>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: content.into(),
            role: Role::User,
            timestamp: Utc::now(),
            sources: Vec::new(),
            feedback: None,
        }
    }

    pub fn assistant(
        id: impl Into<String>,
        content: impl Into<String>,
        timestamp: DateTime<Utc>,
        sources: Vec<SourceCitation>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            role: Role::Assistant,
            timestamp,
            sources,
            feedback: None,
        }
    }

    pub fn welcome(content: impl Into<String>) -> Self {
        Self::assistant(WELCOME_MESSAGE_ID, content, Utc::now(), Vec::new())
    }

    pub fn is_welcome(&self) -> bool {
        self.id == WELCOME_MESSAGE_ID
    }
}

/// Shared by suggestions and quick actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Policy,
    Procedure,
    TechnicalGuide,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Category::Policy => "policy",
            Category::Procedure => "procedure",
            Category::TechnicalGuide => "technical_guide",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: String,
    pub category: Category,
    pub question_vi: String,
    pub question_en: String,
    pub priority: u8,
    pub usage_count: u32,
}

impl Suggestion {
    pub fn question(&self, language: Language) -> &str {
        match language {
            Language::Vi => &self.question_vi,
            Language::En => &self.question_en,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    pub id: String,
    pub label_vi: String,
    pub label_en: String,
    /// Query text with `{{token}}` placeholders.
    pub query: String,
    pub icon: String,
    pub category: Category,
}

impl QuickAction {
    pub fn label(&self, language: Language) -> &str {
        match language {
            Language::Vi => &self.label_vi,
            Language::En => &self.label_en,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    ThumbsUp,
    ThumbsDown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub message_id: String,
    pub kind: FeedbackKind,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeedbackStats {
    pub positive: usize,
    pub negative: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Pdf,
    Json,
    Txt,
    Html,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "json" => Ok(ExportFormat::Json),
            "txt" | "text" => Ok(ExportFormat::Txt),
            "html" => Ok(ExportFormat::Html),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Inclusive on both ends.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.start && at <= self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportRequest {
    pub format: ExportFormat,
    pub session_id: String,
    pub date_range: Option<DateRange>,
    pub include_system_messages: bool,
    pub include_attachments: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportResult {
    pub download_url: String,
    pub filename: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Archived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationSummary {
    pub id: String,
    pub title: String,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    pub message_count: u32,
    pub status: SessionStatus,
}
