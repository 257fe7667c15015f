mod chat_completions;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use conduit_shared::Tool;

use crate::config::ModelConfig;
use crate::Message;

pub use chat_completions::{ChatCompletionsModel, ChatRequest, ChatResponse, Choice, ResponseMessage};

/// A handle on one hosted model.
#[async_trait]
pub trait Model: Send + Sync {
    fn name(&self) -> &str;

    /// Send the conversation so far plus the tools on offer; return the model's reply.
    async fn complete(&self, messages: &[Message], tools: &[Tool]) -> Result<ResponseMessage>;
}

/// Hands out model handles by name so callers never see the vendor API.
pub trait ModelProvider: Send + Sync {
    /// `None` selects the provider's default model.
    fn get_model(&self, name: Option<&str>) -> Arc<dyn Model>;
}

/// Gemini, reached through its OpenAI-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    default_model: String,
}

impl GeminiProvider {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("Conduit/0.1")
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            default_model: config.model.clone(),
        })
    }
}

impl ModelProvider for GeminiProvider {
    fn get_model(&self, name: Option<&str>) -> Arc<dyn Model> {
        let model = name.unwrap_or(&self.default_model);
        Arc::new(ChatCompletionsModel::new(
            self.client.clone(),
            &self.base_url,
            &self.api_key,
            model,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> ModelConfig {
        ModelConfig {
            api_key: "key".to_string(),
            base_url: "https://example.test/v1beta/openai/".to_string(),
            model: "gemini-2.0-flash".to_string(),
            timeout: Duration::from_secs(1),
            max_turns: 10,
        }
    }

    #[test]
    fn get_model_falls_back_to_default() {
        let provider = GeminiProvider::new(&config()).unwrap();
        assert_eq!(provider.get_model(None).name(), "gemini-2.0-flash");
        assert_eq!(provider.get_model(Some("gemini-1.5-flash")).name(), "gemini-1.5-flash");
    }
}
