//! OpenAI-backed Assessor: one chat completion per operation.

use std::sync::Arc;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::instrument;

use crate::config::LlmConfig;
use crate::core::{BotError, Result};

use super::{prompts, Assessor, DevAgeRequest, RecommendationRequest};

/// Assessor over an OpenAI-compatible chat completion API.
#[derive(Clone)]
pub struct OpenAiAssessor {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
    temperature: f32,
}

impl OpenAiAssessor {
    pub fn from_config(config: &LlmConfig) -> Self {
        let mut openai_config = OpenAIConfig::new().with_api_key(config.api_key.clone());
        if let Some(base) = &config.api_base {
            openai_config = openai_config.with_api_base(base.clone());
        }
        Self {
            client: Arc::new(Client::with_config(openai_config)),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    async fn chat(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system.to_string())
                .build()
                .map_err(|e| BotError::Llm(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user.to_string())
                .build()
                .map_err(|e| BotError::Llm(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .build()
            .map_err(|e| BotError::Llm(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| BotError::Llm(e.to_string()))?;

        match response.choices.first() {
            Some(choice) => Ok(choice.message.content.clone().unwrap_or_default()),
            None => Err(BotError::Llm("no choices in completion response".to_string())),
        }
    }
}

#[async_trait]
impl Assessor for OpenAiAssessor {
    #[instrument(skip(self, text))]
    async fn extract_age_months(&self, text: &str) -> Result<Option<u32>> {
        let reply = self.chat(prompts::AGE_EXTRACTION_SYSTEM, text).await?;
        Ok(prompts::parse_months_reply(&reply))
    }

    #[instrument(skip(self, request))]
    async fn estimate_developmental_age(&self, request: &DevAgeRequest) -> Result<u32> {
        let system = prompts::dev_age_system(request);
        let user = prompts::dev_age_user(request);
        let reply = self.chat(&system, &user).await?;
        prompts::parse_months_reply(&reply)
            .ok_or_else(|| BotError::Llm(format!("non-numeric development age reply: {}", reply)))
    }

    #[instrument(skip(self, request))]
    async fn generate_recommendations(&self, request: &RecommendationRequest) -> Result<String> {
        let system = prompts::recommendations_system(request);
        let user = prompts::recommendations_user(request);
        let reply = self.chat(&system, &user).await?;
        Ok(reply.trim().to_string())
    }
}
