use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::internal::SourceCitation;

// ==================== REQUEST DTOs ====================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SendMessageRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

// ==================== RESPONSE DTOs ====================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatResponse {
    pub id: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub sources: Vec<SourceDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceDto {
    pub filename: String,
    pub relevance_score: f32,
}

impl From<SourceDto> for SourceCitation {
    fn from(dto: SourceDto) -> Self {
        SourceCitation {
            filename: dto.filename,
            relevance_score: dto.relevance_score,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ErrorResponse {
    #[serde(alias = "detail", alias = "message")]
    pub error: String,
}
