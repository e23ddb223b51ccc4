//! Base config: Telegram connection, logging, database. Loaded from env.

use anyhow::Result;
use std::env;

/// Base config: Telegram-related, logging, database only.
#[derive(Debug, Clone)]
pub struct BaseConfig {
    /// BOT_TOKEN
    pub bot_token: String,
    /// TELEGRAM_API_URL or TELOXIDE_API_URL
    pub telegram_api_url: Option<String>,
    /// WEBHOOK_URL: public HTTPS URL the transport posts updates to; unset means long polling
    pub webhook_url: Option<String>,
    /// WEBHOOK_ADDR: local listen address for the webhook listener
    pub webhook_addr: String,
    /// Database path for sessions and the transcript log
    pub database_url: String,
    /// Log file path
    pub log_file: String,
}

impl BaseConfig {
    /// Load from environment variables. `token` overrides BOT_TOKEN if provided.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN")
                .map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "./milestones_bot.db".to_string());
        let log_file =
            env::var("LOG_FILE").unwrap_or_else(|_| "logs/milestones-bot.log".to_string());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let webhook_url = env::var("WEBHOOK_URL").ok();
        let webhook_addr =
            env::var("WEBHOOK_ADDR").unwrap_or_else(|_| "0.0.0.0:8443".to_string());

        Ok(Self {
            bot_token,
            telegram_api_url,
            webhook_url,
            webhook_addr,
            database_url,
            log_file,
        })
    }

    /// Validate config (URLs must parse when set).
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or TELOXIDE_API_URL) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        if let Some(ref url_str) = self.webhook_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!("WEBHOOK_URL is set but not a valid URL: {}", url_str);
            }
            if self.webhook_addr.parse::<std::net::SocketAddr>().is_err() {
                anyhow::bail!("WEBHOOK_ADDR is not a valid socket address: {}", self.webhook_addr);
            }
        }
        Ok(())
    }
}
