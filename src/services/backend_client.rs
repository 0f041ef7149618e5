use async_trait::async_trait;
use std::time::Duration;

use crate::api::dto::{ChatResponse, ErrorResponse, SendMessageRequest};

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

/// Remote chat backend as seen by a session.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// `Ok(true)` when the health endpoint answers with a success status.
    async fn health_check(&self) -> Result<bool, BackendError>;

    async fn send_message(&self, request: SendMessageRequest)
        -> Result<ChatResponse, BackendError>;
}

#[derive(Clone)]
pub struct HttpChatBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(base_url: String, timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn health_check(&self) -> Result<bool, BackendError> {
        let response = self
            .client
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;

        Ok(response.status().is_success())
    }

    async fn send_message(
        &self,
        request: SendMessageRequest,
    ) -> Result<ChatResponse, BackendError> {
        let response = self
            .client
            .post(format!("{}/api/v1/chat", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured error body when the backend sends one
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(BackendError::ApiError { status, message });
        }

        let body = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()))?;

        if chat.id.trim().is_empty() {
            return Err(BackendError::InvalidResponse(
                "reply is missing an id".to_string(),
            ));
        }

        Ok(chat)
    }
}
