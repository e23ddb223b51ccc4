//! LLM config: OpenAI-compatible endpoint, model, sampling.

use anyhow::Result;
use std::env;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// OPENAI_API_KEY
    pub api_key: String,
    /// OPENAI_API_BASE (optional, for compatible endpoints)
    pub api_base: Option<String>,
    /// OPENAI_MODEL
    pub model: String,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENAI_API_KEY not set"))?;
        let api_base = env::var("OPENAI_API_BASE").ok();
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
        let temperature = env::var("OPENAI_TEMPERATURE")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(0.7);

        Ok(Self {
            api_key,
            api_base,
            model,
            temperature,
        })
    }

    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.api_key.is_empty(), "OPENAI_API_KEY is empty");
        if let Some(ref base) = self.api_base {
            if reqwest::Url::parse(base).is_err() {
                anyhow::bail!("OPENAI_API_BASE is set but not a valid URL: {}", base);
            }
        }
        Ok(())
    }
}
