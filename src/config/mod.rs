//! App configuration: base (transport + log + DB), LLM, email, content.
//! Use `BotConfig::load()` for env-based loading, then `validate()` to fail fast.

pub mod base;
pub mod content;
pub mod email;
pub mod llm;

use anyhow::Result;

pub use base::BaseConfig;
pub use content::ContentConfig;
pub use email::EmailConfig;
pub use llm::LlmConfig;

/// Full bot config. Load from env; `token` overrides BOT_TOKEN when provided.
#[derive(Debug, Clone)]
pub struct BotConfig {
    pub base: BaseConfig,
    pub llm: LlmConfig,
    pub email: EmailConfig,
    pub content: ContentConfig,
}

impl BotConfig {
    /// Load full config from environment variables.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        Ok(Self {
            base: BaseConfig::load(token)?,
            llm: LlmConfig::from_env()?,
            email: EmailConfig::from_env()?,
            content: ContentConfig::from_env()?,
        })
    }

    /// Validate config. Call after load() to fail fast before init.
    pub fn validate(&self) -> Result<()> {
        self.base.validate()?;
        self.llm.validate()?;
        self.email.validate()?;
        self.content.validate()?;
        Ok(())
    }
}
