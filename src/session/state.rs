use chrono::{DateTime, Utc};
use tokio::time::Instant;

use crate::i18n::Language;
use crate::models::internal::Message;

/// Result of the most recent health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Checking,
    Connected,
    Disconnected,
}

impl Connectivity {
    pub fn is_connected(&self) -> bool {
        matches!(self, Connectivity::Connected)
    }

    /// Translation key for the status label.
    pub fn label_key(&self) -> &'static str {
        match self {
            Connectivity::Checking => "chat.connecting",
            Connectivity::Connected => "chat.connected",
            Connectivity::Disconnected => "chat.disconnected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionVisibility {
    Visible,
    Hidden,
    /// Hidden until the given instant, visible afterwards.
    RestoreAt(Instant),
}

impl SuggestionVisibility {
    pub fn is_visible_at(&self, now: Instant) -> bool {
        match self {
            SuggestionVisibility::Visible => true,
            SuggestionVisibility::Hidden => false,
            SuggestionVisibility::RestoreAt(at) => now >= *at,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.is_visible_at(Instant::now())
    }
}

/// Everything a view needs to redraw a session.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
    pub language: Language,
    pub loading: bool,
    pub connectivity: Connectivity,
    pub suggestions: SuggestionVisibility,
}

impl SessionSnapshot {
    pub fn can_send(&self) -> bool {
        !self.loading && self.connectivity.is_connected()
    }
}

/// Outcome of a send that got past input validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// The backend answered; the assistant message has this id.
    Replied { message_id: String },
    /// The backend failed; an error message with this id was appended.
    Failed { message_id: String, error: String },
}

impl SendOutcome {
    pub fn message_id(&self) -> &str {
        match self {
            SendOutcome::Replied { message_id } | SendOutcome::Failed { message_id, .. } => {
                message_id
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, SendOutcome::Failed { .. })
    }
}
