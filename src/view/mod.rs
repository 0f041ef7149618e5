//! Plain-text rendering of session state for the terminal front-end.

pub mod command;

use chrono::{DateTime, Local, Utc};
use std::fmt::Write;

use crate::i18n::Localizer;
use crate::models::internal::{
    Category, ConversationSummary, FeedbackKind, Message, QuickAction, Role, Suggestion,
};
use crate::session::{Connectivity, RelativeDay, SessionSnapshot};

pub use command::{parse, Command, CommandError, HELP};

fn status_dot(connectivity: Connectivity) -> &'static str {
    match connectivity {
        Connectivity::Connected => "🟢",
        Connectivity::Checking => "🟡",
        Connectivity::Disconnected => "🔴",
    }
}

pub fn render_header(snapshot: &SessionSnapshot) -> String {
    let l10n = Localizer::new(snapshot.language);
    let short_id: String = snapshot.session_id.chars().take(8).collect();
    format!(
        "{} {} {} | 💬 {}... | 📊 {} | 🌍 {}",
        l10n.t("chat.title"),
        status_dot(snapshot.connectivity),
        l10n.t(snapshot.connectivity.label_key()),
        short_id,
        snapshot.messages.len(),
        snapshot.language.code().to_uppercase(),
    )
}

/// One thread entry; `index` is 1-based.
pub fn render_message(index: usize, message: &Message, l10n: &Localizer) -> String {
    let who = match message.role {
        Role::User => "you",
        Role::Assistant => "assistant",
        Role::System => "system",
    };
    let time = message.timestamp.with_timezone(&Local).format("%H:%M:%S");

    let mut out = format!("[{}] {} {}: {}", index, time, who, message.content);

    if !message.sources.is_empty() {
        let _ = write!(out, "\n    {}:", l10n.t("chat.sources"));
        for source in &message.sources {
            let _ = write!(
                out,
                "\n    📄 {} (Score: {:.2})",
                source.filename, source.relevance_score
            );
        }
    }

    if let Some(feedback) = &message.feedback {
        let label = match feedback.kind {
            FeedbackKind::ThumbsUp => format!("👍 {}", l10n.t("feedback.positive")),
            FeedbackKind::ThumbsDown => format!("👎 {}", l10n.t("feedback.negative")),
        };
        let _ = write!(out, "\n    {}", label);
    }

    out
}

pub fn render_thread(snapshot: &SessionSnapshot) -> String {
    let l10n = Localizer::new(snapshot.language);
    if snapshot.messages.is_empty() {
        return l10n.t("chat.noMessages").to_string();
    }

    let mut lines: Vec<String> = snapshot
        .messages
        .iter()
        .enumerate()
        .map(|(i, m)| render_message(i + 1, m, &l10n))
        .collect();

    if snapshot.loading {
        lines.push(format!("... {}", l10n.t("chat.typing")));
    }
    lines.join("\n")
}

pub fn render_suggestions(suggestions: &[Suggestion], l10n: &Localizer) -> String {
    if suggestions.is_empty() {
        return l10n.t("suggestions.noSuggestions").to_string();
    }

    let mut out = format!("💡 {}", l10n.t("suggestions.title"));
    for s in suggestions {
        let _ = write!(out, "\n  [{}] {}", s.id, s.question(l10n.language()));
    }
    out
}

pub fn action_icon(action: &QuickAction) -> &'static str {
    match action.icon.as_str() {
        "document" => "📄",
        "clipboard" => "📋",
        "cog" => "⚙️",
        _ => match action.category {
            Category::Policy => "📋",
            Category::Procedure => "⚙️",
            Category::TechnicalGuide => "🛠️",
        },
    }
}

pub fn render_quick_actions(actions: &[QuickAction], l10n: &Localizer) -> String {
    actions
        .iter()
        .map(|a| {
            format!(
                "  {} {} ({}): {}",
                action_icon(a),
                a.label(l10n.language()),
                a.id,
                a.query
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_history(
    entries: &[ConversationSummary],
    l10n: &Localizer,
    now: DateTime<Utc>,
) -> String {
    if entries.is_empty() {
        return l10n.t("history.noResults").to_string();
    }

    let mut out = format!("📚 {}", l10n.t("history.title"));
    for entry in entries {
        let _ = write!(
            out,
            "\n  {} | {} | {} {} | {}\n      {}",
            entry.id,
            entry.title,
            entry.message_count,
            l10n.t("history.messageCount"),
            l10n.t(RelativeDay::from_age(entry.timestamp, now).label_key()),
            entry.last_message
        );
    }
    out
}
