use chrono::{DateTime, Utc};
use tracing::info;

use crate::models::internal::{ExportFormat, ExportRequest, ExportResult, Message, Role};
use crate::services::{simulate_latency, MockLatency, ServiceError};

const DATA_URL_PREFIX: &str = "data:text/plain;charset=utf-8,";

/// Produces stand-in export artifacts. Nothing is rendered for real; the
/// download URL carries a short text description of what would be exported.
pub struct ExportService {
    latency: MockLatency,
}

impl ExportService {
    pub fn new(latency: MockLatency) -> Self {
        Self { latency }
    }

    pub async fn export_conversation(
        &self,
        request: &ExportRequest,
        messages: &[Message],
    ) -> Result<ExportResult, ServiceError> {
        let selected = select_messages(request, messages);
        if selected.is_empty() {
            return Err(ServiceError::EmptyExport);
        }

        simulate_latency(self.latency.export).await;

        let now = Utc::now();
        let filename = export_filename(&request.session_id, request.format, now);
        let payload = format!(
            "Mock export file for session {}\nFormat: {}\nMessages: {}\nAttachments: {}\nGenerated: {}",
            request.session_id,
            request.format,
            selected.len(),
            if request.include_attachments {
                "included"
            } else {
                "excluded"
            },
            now.to_rfc3339()
        );
        let download_url = format!("{}{}", DATA_URL_PREFIX, urlencoding::encode(&payload));

        info!("📤 Export generated: {}", filename);

        Ok(ExportResult {
            download_url,
            filename,
        })
    }
}

/// Messages that survive the request's system-message and date filters.
pub fn select_messages<'a>(request: &ExportRequest, messages: &'a [Message]) -> Vec<&'a Message> {
    messages
        .iter()
        .filter(|m| request.include_system_messages || m.role != Role::System)
        .filter(|m| request.date_range.map_or(true, |r| r.contains(m.timestamp)))
        .collect()
}

/// `conversation-<session prefix>-<YYYY-MM-DDTHH-MM>.<ext>`, minute resolution.
pub fn export_filename(session_id: &str, format: ExportFormat, at: DateTime<Utc>) -> String {
    let prefix: String = session_id.chars().take(8).collect();
    format!(
        "conversation-{}-{}.{}",
        prefix,
        at.format("%Y-%m-%dT%H-%M"),
        format.extension()
    )
}

/// Decodes the text payload of a download URL produced by this service.
pub fn decode_payload(download_url: &str) -> Option<String> {
    let encoded = download_url.strip_prefix(DATA_URL_PREFIX)?;
    urlencoding::decode(encoded).ok().map(|s| s.into_owned())
}
