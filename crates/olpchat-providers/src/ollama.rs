//! Ollama `/api/generate` provider.
//!
//! The generate API takes one prompt string, so the conversation is folded
//! into `"{system}\n\nUser: {question}\n\nAssistant:"`.

use async_trait::async_trait;
use olpchat_core::error::{OlpChatError, Result};
use olpchat_core::traits::provider::{GenerateParams, Provider};
use olpchat_core::types::{Message, ProviderResponse, Role};
use serde_json::json;

use crate::http;
use crate::provider_registry::ProviderSettings;

pub struct OllamaProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = http::build_client(settings.timeout)?;
        Ok(Self { settings, client })
    }
}

/// Flatten chat messages into a single completion prompt.
pub fn render_prompt(messages: &[Message]) -> String {
    let mut prompt = String::new();
    for msg in messages {
        if !prompt.is_empty() {
            prompt.push_str("\n\n");
        }
        match msg.role {
            Role::System => prompt.push_str(&msg.content),
            Role::User => {
                prompt.push_str("User: ");
                prompt.push_str(&msg.content);
            }
            Role::Assistant => {
                prompt.push_str("Assistant: ");
                prompt.push_str(&msg.content);
            }
        }
    }
    prompt.push_str("\n\nAssistant:");
    prompt
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        &self.settings.name
    }

    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse> {
        let mut body = json!({
            "model": self.settings.model,
            "prompt": render_prompt(messages),
            "stream": false,
        });
        let mut options = serde_json::Map::new();
        if let Some(temperature) = params.temperature {
            options.insert("temperature".into(), json!(temperature));
        }
        if let Some(max_tokens) = params.max_tokens {
            options.insert("num_predict".into(), json!(max_tokens));
        }
        if !options.is_empty() {
            body["options"] = options.into();
        }

        let json = http::post_json(&self.client, &self.settings, &body).await?;
        let content = json["response"].as_str().ok_or_else(|| {
            OlpChatError::Provider(format!("{}: missing 'response' field", self.settings.name))
        })?;

        Ok(ProviderResponse {
            content: Some(content.to_string()),
            finish_reason: json["done_reason"].as_str().map(String::from),
        })
    }
}
