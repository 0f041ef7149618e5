//! Bilingual label store.
//!
//! Translations are static tables keyed by dotted paths (`"chat.title"`).
//! Language selection is not global: each session carries its own
//! [`Localizer`].

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Vi,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Vi, Language::En];

    pub fn code(&self) -> &'static str {
        match self {
            Language::Vi => "vi",
            Language::En => "en",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::Vi => "Tiếng Việt",
            Language::En => "English",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unsupported language: {0}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vi" | "vn" | "vietnamese" => Ok(Language::Vi),
            "en" | "english" => Ok(Language::En),
            other => Err(UnknownLanguage(other.to_string())),
        }
    }
}

type Table = HashMap<&'static str, &'static str>;

static VI: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("common.loading", "Đang tải..."),
        ("common.error", "Có lỗi xảy ra"),
        ("common.success", "Thành công"),
        ("common.cancel", "Hủy"),
        ("common.confirm", "Xác nhận"),
        ("common.save", "Lưu"),
        ("common.delete", "Xóa"),
        ("common.edit", "Sửa"),
        ("common.send", "Gửi"),
        ("chat.title", "Trợ lý Chat"),
        ("chat.placeholder", "Nhập tin nhắn của bạn..."),
        ("chat.clear", "Xóa cuộc trò chuyện"),
        ("chat.export", "Xuất cuộc trò chuyện"),
        ("chat.typing", "Đang soạn tin..."),
        ("chat.connected", "Đã kết nối"),
        ("chat.connecting", "Đang kết nối..."),
        ("chat.disconnected", "Mất kết nối"),
        ("chat.refresh", "Làm mới"),
        ("chat.noMessages", "Chưa có tin nhắn nào"),
        ("chat.messageSent", "Tin nhắn đã gửi"),
        ("chat.messageReceived", "Tin nhắn đã nhận"),
        (
            "chat.welcome",
            "Xin chào! Tôi là trợ lý RAG của bạn. Hãy tải lên tài liệu và đặt câu hỏi!",
        ),
        (
            "chat.sendFailed",
            "❌ Lỗi: {error}. Vui lòng kiểm tra máy chủ đã hoạt động chưa.",
        ),
        ("chat.sources", "Nguồn"),
        ("suggestions.title", "Câu hỏi gợi ý"),
        ("suggestions.noSuggestions", "Không có gợi ý nào"),
        ("suggestions.loading", "Đang tải gợi ý..."),
        ("quickActions.findPolicy", "Tìm Chính sách"),
        ("quickActions.findProcedure", "Tìm Quy trình"),
        ("quickActions.techGuide", "Hướng dẫn Kỹ thuật"),
        ("quickActions.findPolicyQuery", "Cho tôi biết các chính sách về"),
        (
            "quickActions.findProcedureQuery",
            "Quy trình này được thực hiện như thế nào?",
        ),
        ("quickActions.techGuideQuery", "Hướng dẫn kỹ thuật về"),
        ("feedback.thankYou", "Cảm ơn phản hồi của bạn!"),
        (
            "feedback.commentPlaceholder",
            "Chia sẻ chi tiết về trải nghiệm của bạn...",
        ),
        ("feedback.submit", "Gửi"),
        ("feedback.cancel", "Hủy"),
        ("feedback.positive", "Hữu ích"),
        ("feedback.negative", "Không hữu ích"),
        ("feedback.helpful", "Hữu ích"),
        ("feedback.notHelpful", "Không hữu ích"),
        ("export.title", "Xuất cuộc trò chuyện"),
        ("export.formats.pdf", "PDF"),
        ("export.formats.json", "JSON"),
        ("export.formats.txt", "Text"),
        ("export.formats.html", "HTML"),
        ("export.options.includeSystemMessages", "Bao gồm tin nhắn hệ thống"),
        ("export.options.includeAttachments", "Bao gồm tệp đính kèm"),
        ("export.options.dateRange", "Khoảng thời gian"),
        ("export.downloading", "Đang tải xuống..."),
        ("export.success", "Xuất thành công!"),
        ("export.error", "Lỗi khi xuất file"),
        ("export.noMessages", "Không có tin nhắn để xuất"),
        ("language.switch", "Chuyển ngôn ngữ"),
        ("language.vietnamese", "Tiếng Việt"),
        ("language.english", "English"),
        ("history.title", "Lịch sử trò chuyện"),
        ("history.search", "Tìm kiếm cuộc trò chuyện..."),
        ("history.noResults", "Không tìm thấy kết quả"),
        (
            "history.deleteConfirm",
            "Bạn có chắc muốn xóa cuộc trò chuyện này?",
        ),
        ("history.today", "Hôm nay"),
        ("history.yesterday", "Hôm qua"),
        ("history.thisWeek", "Tuần này"),
        ("history.older", "Cũ hơn"),
        ("history.messageCount", "tin nhắn"),
    ])
});

static EN: Lazy<Table> = Lazy::new(|| {
    HashMap::from([
        ("common.loading", "Loading..."),
        ("common.error", "An error occurred"),
        ("common.success", "Success"),
        ("common.cancel", "Cancel"),
        ("common.confirm", "Confirm"),
        ("common.save", "Save"),
        ("common.delete", "Delete"),
        ("common.edit", "Edit"),
        ("common.send", "Send"),
        ("chat.title", "Chat Assistant"),
        ("chat.placeholder", "Type your message..."),
        ("chat.clear", "Clear conversation"),
        ("chat.export", "Export conversation"),
        ("chat.typing", "Typing..."),
        ("chat.connected", "Connected"),
        ("chat.connecting", "Connecting..."),
        ("chat.disconnected", "Disconnected"),
        ("chat.refresh", "Refresh"),
        ("chat.noMessages", "No messages yet"),
        ("chat.messageSent", "Message sent"),
        ("chat.messageReceived", "Message received"),
        (
            "chat.welcome",
            "Hello! I'm your RAG assistant. Upload documents and ask me questions!",
        ),
        (
            "chat.sendFailed",
            "❌ Error: {error}. Please check if the backend is running.",
        ),
        ("chat.sources", "Sources"),
        ("suggestions.title", "Suggested questions"),
        ("suggestions.noSuggestions", "No suggestions available"),
        ("suggestions.loading", "Loading suggestions..."),
        ("quickActions.findPolicy", "Find Policy"),
        ("quickActions.findProcedure", "Find Procedure"),
        ("quickActions.techGuide", "Technical Guide"),
        ("quickActions.findPolicyQuery", "Tell me about policies regarding"),
        (
            "quickActions.findProcedureQuery",
            "How is this procedure performed?",
        ),
        ("quickActions.techGuideQuery", "Technical guide for"),
        ("feedback.thankYou", "Thank you for your feedback!"),
        (
            "feedback.commentPlaceholder",
            "Share details about your experience...",
        ),
        ("feedback.submit", "Submit"),
        ("feedback.cancel", "Cancel"),
        ("feedback.positive", "Helpful"),
        ("feedback.negative", "Not helpful"),
        ("feedback.helpful", "Helpful"),
        ("feedback.notHelpful", "Not helpful"),
        ("export.title", "Export conversation"),
        ("export.formats.pdf", "PDF"),
        ("export.formats.json", "JSON"),
        ("export.formats.txt", "Text"),
        ("export.formats.html", "HTML"),
        ("export.options.includeSystemMessages", "Include system messages"),
        ("export.options.includeAttachments", "Include attachments"),
        ("export.options.dateRange", "Date range"),
        ("export.downloading", "Downloading..."),
        ("export.success", "Export successful!"),
        ("export.error", "Error exporting file"),
        ("export.noMessages", "No messages to export"),
        ("language.switch", "Switch language"),
        ("language.vietnamese", "Tiếng Việt"),
        ("language.english", "English"),
        ("history.title", "Chat History"),
        ("history.search", "Search conversations..."),
        ("history.noResults", "No results found"),
        (
            "history.deleteConfirm",
            "Are you sure you want to delete this conversation?",
        ),
        ("history.today", "Today"),
        ("history.yesterday", "Yesterday"),
        ("history.thisWeek", "This week"),
        ("history.older", "Older"),
        ("history.messageCount", "messages"),
    ])
});

fn table(language: Language) -> &'static Table {
    match language {
        Language::Vi => &VI,
        Language::En => &EN,
    }
}

/// Looks up `key` for `language`, falling back to the key itself.
pub fn translate<'a>(language: Language, key: &'a str) -> &'a str {
    table(language).get(key).copied().unwrap_or(key)
}

/// Per-session language context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Localizer {
    language: Language,
}

impl Localizer {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        translate(self.language, key)
    }

    /// Translates `key` and substitutes `{name}` markers from `args`.
    pub fn t_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        args.iter()
            .fold(self.t(key).to_string(), |text, (name, value)| {
                text.replace(&format!("{{{}}}", name), value)
            })
    }
}
