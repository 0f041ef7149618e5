use std::collections::HashMap;

use crate::i18n::Language;
use crate::models::internal::{ExportFormat, FeedbackKind};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: /{0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Invalid(String),
}

/// A user intent typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Say(String),
    Clear,
    Retry,
    Status,
    Language(Language),
    Suggest,
    Pick(String),
    Actions,
    Action {
        id: String,
        params: HashMap<String, String>,
    },
    /// `index` is the 1-based position shown in the thread.
    Feedback {
        index: usize,
        kind: FeedbackKind,
        comment: Option<String>,
    },
    Export(ExportFormat),
    History(Option<String>),
    Delete(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
/clear                     start a new conversation
/retry                     resend the last failed message
/status                    check the backend connection
/lang <vi|en>              switch language
/suggest                   show suggested questions
/pick <id>                 ask a suggested question
/actions                   list quick actions
/action <id> [key=value]   run a quick action
/up <n>                    mark message n as helpful
/down <n> [comment]        mark message n as not helpful
/export <pdf|json|txt|html>
/history [query]           list or search past conversations
/delete <id>               delete a past conversation
/quit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "clear" => Command::Clear,
        "retry" => Command::Retry,
        "status" => Command::Status,
        "lang" => Command::Language(
            args.parse()
                .map_err(|e: crate::i18n::UnknownLanguage| CommandError::Invalid(e.to_string()))?,
        ),
        "suggest" => Command::Suggest,
        "pick" => Command::Pick(required(args, "/pick <id>")?.to_string()),
        "actions" => Command::Actions,
        "action" => {
            let mut parts = args.split_whitespace();
            let id = parts
                .next()
                .ok_or(CommandError::Usage("/action <id> [key=value ...]"))?
                .to_string();
            let params = parts
                .map(|pair| {
                    pair.split_once('=')
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .ok_or_else(|| {
                            CommandError::Invalid(format!("expected key=value, got {}", pair))
                        })
                })
                .collect::<Result<HashMap<_, _>, _>>()?;
            Command::Action { id, params }
        }
        "up" => feedback(args, FeedbackKind::ThumbsUp, "/up <n>")?,
        "down" => feedback(args, FeedbackKind::ThumbsDown, "/down <n> [comment]")?,
        "export" => Command::Export(
            required(args, "/export <pdf|json|txt|html>")?
                .parse()
                .map_err(CommandError::Invalid)?,
        ),
        "history" => Command::History(if args.is_empty() {
            None
        } else {
            Some(args.to_string())
        }),
        "delete" => Command::Delete(required(args, "/delete <id>")?.to_string()),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required<'a>(args: &'a str, usage: &'static str) -> Result<&'a str, CommandError> {
    if args.is_empty() {
        Err(CommandError::Usage(usage))
    } else {
        Ok(args)
    }
}

fn feedback(args: &str, kind: FeedbackKind, usage: &'static str) -> Result<Command, CommandError> {
    let (index, comment) = match args.split_once(char::is_whitespace) {
        Some((index, comment)) => (index, Some(comment.trim().to_string())),
        None => (args, None),
    };
    let index: usize = required(index, usage)?
        .parse()
        .map_err(|_| CommandError::Usage(usage))?;
    if index == 0 {
        return Err(CommandError::Usage(usage));
    }
    Ok(Command::Feedback {
        index,
        kind,
        comment: comment.filter(|c| !c.is_empty()),
    })
}
