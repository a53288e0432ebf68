//! Unified OpenAI-compatible provider.
//!
//! Handles chat completions for llama.cpp's server, OpenRouter and OpenAI.
//! They differ only by endpoint URL, auth style, model and API key.

use async_trait::async_trait;
use olpchat_core::error::{OlpChatError, Result};
use olpchat_core::traits::provider::{GenerateParams, Provider};
use olpchat_core::types::{Message, ProviderResponse};
use serde_json::{Value, json};

use crate::http;
use crate::provider_registry::ProviderSettings;

/// A provider for any `/chat/completions` endpoint.
pub struct OpenAiCompatibleProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl OpenAiCompatibleProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = http::build_client(settings.timeout)?;
        Ok(Self { settings, client })
    }

    fn build_body(&self, messages: &[Message], params: &GenerateParams) -> Result<Value> {
        let mut body = json!({ "messages": serde_json::to_value(messages)? });
        if let Some(model) = &self.settings.model {
            body["model"] = json!(model);
        }
        if let Some(max_tokens) = params.max_tokens.or(self.settings.max_tokens) {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        Ok(body)
    }
}

#[async_trait]
impl Provider for OpenAiCompatibleProvider {
    fn name(&self) -> &str {
        &self.settings.name
    }

    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse> {
        if !self.settings.has_credentials() {
            return Err(OlpChatError::ApiKeyMissing(self.settings.name.clone()));
        }

        let body = self.build_body(messages, params)?;
        let json = http::post_json(&self.client, &self.settings, &body).await?;

        // Standard OpenAI format
        let choice = json["choices"].get(0).ok_or_else(|| {
            OlpChatError::Provider(format!("{}: no choices in response", self.settings.name))
        })?;

        Ok(ProviderResponse {
            content: choice["message"]["content"].as_str().map(String::from),
            finish_reason: choice["finish_reason"].as_str().map(String::from),
        })
    }

    fn is_configured(&self) -> bool {
        self.settings.has_credentials()
    }
}
