use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Import our modules
use chat_assistant::{
    config::Config,
    i18n::Language,
    services::{CannedChatBackend, ChatBackend, HttpChatBackend, MockServices},
    session::{
        ChatSession, ExportOptions, HistoryBrowser, SendOutcome, SessionError, SessionOptions,
    },
    view::{self, Command},
};

#[derive(Debug, Parser)]
#[command(name = "chat-assistant", version, about = "Bilingual chat assistant")]
struct Args {
    /// Chat backend base URL (overrides config)
    #[arg(long)]
    backend_url: Option<String>,

    /// Use the built-in canned backend
    #[arg(long)]
    offline: bool,

    /// Interface language (vi or en)
    #[arg(long)]
    language: Option<Language>,

    /// Path to a config file
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Load config
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(url) = args.backend_url {
        config.backend_url = url;
    }
    if let Some(language) = args.language {
        config.default_language = language;
    }
    config.offline |= args.offline;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("chat_assistant={}", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let latency = config.mock_latency();
    let backend: Arc<dyn ChatBackend> = if config.offline {
        tracing::info!("🔌 Offline mode: using canned replies");
        Arc::new(CannedChatBackend::new(latency.chat_response))
    } else {
        tracing::info!("🔗 Backend: {}", config.backend_url);
        Arc::new(HttpChatBackend::with_timeout(
            config.backend_url.clone(),
            config.request_timeout(),
        )?)
    };

    let services = MockServices::new(latency);
    let mut history = HistoryBrowser::new(services.history.clone());
    let mut session = ChatSession::new(backend, services, SessionOptions::from(&config));

    // Probe the backend and load history side by side
    futures::join!(session.check_connection(), history.refresh());

    println!("{}", view::render_header(&session.snapshot()));
    println!("{}", view::render_thread(&session.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match view::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        dispatch(command, &mut session, &mut history).await;
    }

    Ok(())
}

async fn dispatch(command: Command, session: &mut ChatSession, history: &mut HistoryBrowser) {
    let l10n = *session.localizer();

    match command {
        Command::Say(text) => {
            let result = session.send_message(&text).await;
            report_send(session, result);
        }
        Command::Retry => {
            let result = session.retry_last_send().await;
            report_send(session, result);
        }
        Command::Clear => {
            session.clear_session().await;
            history.refresh().await;
            println!("{}", view::render_thread(&session.snapshot()));
        }
        Command::Status => {
            session.check_connection().await;
            println!("{}", view::render_header(&session.snapshot()));
        }
        Command::Language(language) => {
            session.set_language(language);
            println!("{}", view::render_header(&session.snapshot()));
        }
        Command::Suggest => {
            let suggestions = session.load_suggestions().await;
            println!("{}", view::render_suggestions(&suggestions, &l10n));
        }
        Command::Pick(id) => {
            let result = session.select_suggestion(&id).await;
            report_send(session, result);
        }
        Command::Actions => {
            let actions = session.quick_actions().await;
            println!("{}", view::render_quick_actions(&actions, &l10n));
        }
        Command::Action { id, params } => {
            let result = session.run_quick_action(&id, &params).await;
            report_send(session, result);
        }
        Command::Feedback {
            index,
            kind,
            comment,
        } => {
            let Some(message_id) = session.messages().get(index - 1).map(|m| m.id.clone()) else {
                println!("No message #{}", index);
                return;
            };
            match session
                .submit_feedback(&message_id, kind, comment.as_deref())
                .await
            {
                Ok(_) => println!("{}", l10n.t("feedback.thankYou")),
                Err(e) => println!("{}: {}", l10n.t("common.error"), e),
            }
        }
        Command::Export(format) => {
            println!("{}", l10n.t("export.downloading"));
            match session.export(ExportOptions::new(format)).await {
                Ok(result) => println!(
                    "{} {}\n{}",
                    l10n.t("export.success"),
                    result.filename,
                    result.download_url
                ),
                Err(e) => println!("{}: {}", l10n.t("export.error"), e),
            }
        }
        Command::History(query) => {
            let entries = history.search(query.as_deref().unwrap_or("")).await;
            println!("{}", view::render_history(entries, &l10n, chrono::Utc::now()));
        }
        Command::Delete(id) => {
            history.delete(&id).await;
            println!("{}", view::render_history(history.entries(), &l10n, chrono::Utc::now()));
        }
        Command::Help => println!("{}", view::HELP),
        Command::Quit => {}
    }
}

fn report_send(
    session: &ChatSession,
    result: Result<SendOutcome, SessionError>,
) {
    match result {
        Ok(_) => {
            let snapshot = session.snapshot();
            let l10n = *session.localizer();
            let start = snapshot.messages.len().saturating_sub(2);
            for (i, message) in snapshot.messages.iter().enumerate().skip(start) {
                println!("{}", view::render_message(i + 1, message, &l10n));
            }
        }
        Err(e) => println!("{}", e),
    }
}
