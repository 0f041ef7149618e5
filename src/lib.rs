//! Chat Assistant - headless bilingual chat client

pub mod api;
pub mod config;
pub mod i18n;
pub mod models;
pub mod services;
pub mod session;
pub mod view;

// Re-export main types for convenience
pub use crate::config::Config;
pub use crate::i18n::{Language, Localizer};
pub use crate::models::internal::{
    ConversationSummary, ExportFormat, FeedbackKind, FeedbackRecord, Message, QuickAction, Role,
    SourceCitation, Suggestion,
};
pub use crate::services::{
    BackendError, CannedChatBackend, ChatBackend, HttpChatBackend, MockLatency, MockServices,
    ServiceError,
};
pub use crate::session::{ChatSession, ExportOptions, SessionError, SessionOptions};
