//! Main entry: init logging, validate config, build components, run the dispatcher.

use anyhow::Result;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain};
use crate::config::BotConfig;
use crate::core::init_tracing;
use crate::telegram::{run_dispatcher, WebhookSettings};

/// Validates config, initializes tracing, builds all components and starts the
/// dispatcher (webhook listener when WEBHOOK_URL is set, long polling otherwise).
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;

    if let Some(parent) = std::path::Path::new(&config.base.log_file).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    init_tracing(&config.base.log_file)?;

    info!(
        database_url = %config.base.database_url,
        model = %config.llm.model,
        "Initializing bot"
    );

    let components = build_bot_components(&config).await?;
    let handler_chain = build_handler_chain(&config, &components);

    let webhook = match &config.base.webhook_url {
        Some(url) => Some(WebhookSettings {
            url: url.parse()?,
            addr: config.base.webhook_addr.parse()?,
        }),
        None => None,
    };

    info!("Bot started successfully");

    run_dispatcher(components.teloxide_bot.clone(), handler_chain, webhook).await
}
