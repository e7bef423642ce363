//! OpenAI-compatible card generator (feature `openai`).
//!
//! Uses the Chat Completions API in JSON mode. Requires `OPENAI_API_KEY` (or
//! explicit config). Prompts come from [`prompts`](super::prompts); responses
//! are parsed and validated by [`payload`](super::payload). The summary call
//! is the one deliberate swallow-and-default path: on failure it returns
//! [`Summary::fallback`] instead of propagating, so the session always ends
//! in a displayable state.
//!
//! **Interaction**: Implements `CardGenerator`; used by `JourneyRunner` like
//! `MockGenerator`. Depends on `async_openai` (feature `openai`).

use async_trait::async_trait;

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};

use super::prompts::{self, ARCHITECT_SYSTEM_PROMPT, GUIDE_SYSTEM_PROMPT};
use super::{parse_cards, parse_summary, CardGenerator, GenerationError};
use crate::card::{KnowledgeCard, Summary, Turn};
use crate::engine::logging;

/// OpenAI Chat Completions client implementing `CardGenerator`.
///
/// Uses `OPENAI_API_KEY` from the environment by default; or provide config
/// via [`OpenAiGenerator::with_config`] (e.g. custom API key or base URL for
/// an OpenAI-compatible endpoint).
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiGenerator {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0-2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// One JSON-mode completion: system + user message in, raw JSON text out.
    async fn complete(&self, system: &str, user: String) -> Result<String, GenerationError> {
        let messages = vec![
            ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage::from(system)),
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage::from(
                user.as_str(),
            )),
        ];

        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(messages);
        args.response_format(ResponseFormat::JsonObject);
        if let Some(t) = self.temperature {
            args.temperature(t);
        }

        let request = args
            .build()
            .map_err(|e| GenerationError::Request(format!("request build failed: {}", e)))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| GenerationError::Request(format!("OpenAI API error: {}", e)))?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::Malformed("no choices in response".to_string()))?;

        choice
            .message
            .content
            .ok_or_else(|| GenerationError::Malformed("empty completion content".to_string()))
    }
}

#[async_trait]
impl CardGenerator for OpenAiGenerator {
    async fn initial_batch(&self, topic: &str) -> Result<Vec<KnowledgeCard>, GenerationError> {
        let raw = self
            .complete(ARCHITECT_SYSTEM_PROMPT, prompts::initial_prompt(topic))
            .await?;
        parse_cards(&raw)
    }

    async fn next_batch(
        &self,
        topic: &str,
        history: &[Turn],
        target_round: u32,
    ) -> Result<Vec<KnowledgeCard>, GenerationError> {
        let raw = self
            .complete(
                GUIDE_SYSTEM_PROMPT,
                prompts::next_prompt(topic, history, target_round),
            )
            .await?;
        parse_cards(&raw)
    }

    async fn summary(&self, topic: &str, history: &[Turn]) -> Result<Summary, GenerationError> {
        let result = self
            .complete(GUIDE_SYSTEM_PROMPT, prompts::summary_prompt(topic, history))
            .await
            .and_then(|raw| parse_summary(&raw));
        match result {
            Ok(summary) => Ok(summary),
            Err(err) => {
                logging::log_generation_failed("summary", &err);
                Ok(Summary::fallback())
            }
        }
    }
}
