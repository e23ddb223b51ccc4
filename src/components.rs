//! Component factory: builds BotComponents from config. Isolates assembly logic from the runner.

use std::sync::Arc;

use anyhow::Result;
use tracing::{error, info, instrument};

use crate::chain::HandlerChain;
use crate::config::BotConfig;
use crate::content::ContentLibrary;
use crate::core::Bot;
use crate::email::{Mailer, SmtpMailer};
use crate::flow::IntakeFlow;
use crate::handlers::{IntakeHandler, LoggingHandler, TranscriptHandler};
use crate::llm::{Assessor, OpenAiAssessor};
use crate::session::{SessionStore, SqliteSessionStore};
use crate::storage::{SqlitePoolManager, TranscriptRepository};
use crate::telegram::TelegramBotAdapter;

/// Core dependencies for run_bot; produced by the component factory.
#[derive(Clone)]
pub struct BotComponents {
    pub teloxide_bot: teloxide::Bot,
    pub bot: Arc<dyn Bot>,
    pub sessions: Arc<dyn SessionStore>,
    pub assessor: Arc<dyn Assessor>,
    pub mailer: Arc<dyn Mailer>,
    pub content: Arc<ContentLibrary>,
    pub transcripts: TranscriptRepository,
}

/// Builds all components from config: SQLite pool + stores, Telegram bot and
/// adapter, LLM assessor, SMTP mailer, content library.
#[instrument(skip(config))]
pub async fn build_bot_components(config: &BotConfig) -> Result<BotComponents> {
    let pool_manager = SqlitePoolManager::new(&config.base.database_url)
        .await
        .map_err(|e| {
            error!(error = %e, database_url = %config.base.database_url, "Failed to open database");
            anyhow::anyhow!("Failed to open database: {}", e)
        })?;

    let transcripts = TranscriptRepository::new(pool_manager.clone())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to initialize transcript storage: {}", e))?;

    let sessions: Arc<dyn SessionStore> = Arc::new(
        SqliteSessionStore::new(&pool_manager)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to initialize session storage: {}", e))?,
    );

    let teloxide_bot = {
        let bot = teloxide::Bot::new(config.base.bot_token.clone());
        if let Some(ref url_str) = config.base.telegram_api_url {
            match reqwest::Url::parse(url_str) {
                Ok(url) => bot.set_api_url(url),
                Err(e) => {
                    error!(error = %e, url = %url_str, "Invalid TELEGRAM_API_URL, using default");
                    bot
                }
            }
        } else {
            bot
        }
    };
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));

    let assessor: Arc<dyn Assessor> = Arc::new(OpenAiAssessor::from_config(&config.llm));
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::from_config(&config.email)?);

    let content = Arc::new(ContentLibrary::load(
        &config.content.checklist_file,
        &config.content.suggestions_file,
    )?);

    info!(
        model = %config.llm.model,
        recipients = config.email.to_emails.len(),
        "Components built"
    );

    Ok(BotComponents {
        teloxide_bot,
        bot,
        sessions,
        assessor,
        mailer,
        content,
        transcripts,
    })
}

/// Builds the handler chain (logging → transcript → intake wizard).
pub fn build_handler_chain(config: &BotConfig, components: &BotComponents) -> HandlerChain {
    let flow = Arc::new(IntakeFlow::new(
        components.bot.clone(),
        components.sessions.clone(),
        components.assessor.clone(),
        components.mailer.clone(),
        components.content.clone(),
        config.email.to_emails.clone(),
    ));

    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler::new()))
        .add_handler(Arc::new(TranscriptHandler::new(
            components.transcripts.clone(),
        )))
        .add_handler(Arc::new(IntakeHandler::new(flow, components.bot.clone())))
}
