//! Completion client boundary for the translation pipeline.
//!
//! The pipeline treats the language model as an opaque collaborator: given a
//! system prompt, a user prompt and a temperature it returns raw text or a
//! transport error. [`OpenAiClient`] is the production implementation over
//! the chat completions API; tests substitute stubs.

use anyhow::{Result, anyhow};
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};

/// Capability consumed by the orchestration agent.
///
/// Implementations may block or suspend; the parsing and classification core
/// downstream of this call never does.
#[allow(async_fn_in_trait)]
pub trait CompletionClient {
    /// Return the completion text for the provided prompts, or fail with a
    /// transport/provider error. Provider-specific response fields beyond
    /// the text are not interpreted.
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String>;
}

/// Chat-completions client for OpenAI-compatible providers.
///
/// A custom base URL points the client at local providers (Ollama, vLLM)
/// that speak the same API without requiring a real key.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiClient {
    pub fn new(model: impl Into<String>, api_key: Option<&str>, base_url: Option<&str>) -> Self {
        let mut config = OpenAIConfig::new();
        if let Some(key) = api_key {
            config = config.with_api_key(key);
        }
        if let Some(url) = base_url {
            config = config.with_api_base(url.trim_end_matches('/'));
        }

        Self {
            client: Client::with_config(config),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
    ) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(temperature)
            .messages(messages)
            .build()?;

        let response = self.client.chat().create(request).await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("model response contained no text content"))?;

        Ok(content.trim().to_string())
    }
}
