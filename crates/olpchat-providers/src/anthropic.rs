//! Anthropic Messages API provider.

use async_trait::async_trait;
use olpchat_core::error::{OlpChatError, Result};
use olpchat_core::traits::provider::{GenerateParams, Provider};
use olpchat_core::types::{Message, ProviderResponse, Role};
use serde_json::{Value, json};

use crate::http;
use crate::provider_registry::ProviderSettings;

const ANTHROPIC_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl AnthropicProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let client = http::build_client(settings.timeout)?;
        Ok(Self { settings, client })
    }

    fn build_body(&self, messages: &[Message], params: &GenerateParams) -> Result<Value> {
        // Anthropic uses a top-level "system" field, not messages[0]
        let system: Vec<&str> = messages
            .iter()
            .filter(|m| m.role == Role::System)
            .map(|m| m.content.as_str())
            .collect();
        let turns: Vec<&Message> = messages.iter().filter(|m| m.role != Role::System).collect();

        let mut body = json!({
            "model": self.settings.model,
            "max_tokens": params.max_tokens.or(self.settings.max_tokens).unwrap_or(1024),
            "messages": serde_json::to_value(turns)?,
        });
        if !system.is_empty() {
            body["system"] = json!(system.join("\n\n"));
        }
        if let Some(temperature) = params.temperature {
            body["temperature"] = json!(temperature);
        }
        Ok(body)
    }
}

#[async_trait]
impl Provider for AnthropicProvider {
    fn name(&self) -> &str {
        &self.settings.name
    }

    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse> {
        if !self.settings.has_credentials() {
            return Err(OlpChatError::ApiKeyMissing(self.settings.name.clone()));
        }

        let body = self.build_body(messages, params)?;
        let json = http::post_json_with(&self.client, &self.settings, &body, |req| {
            req.header("anthropic-version", ANTHROPIC_VERSION)
        })
        .await?;

        let content = json["content"]
            .as_array()
            .and_then(|blocks| blocks.iter().find_map(|b| b["text"].as_str()))
            .ok_or_else(|| {
                OlpChatError::Provider(format!("{}: no text content in response", self.settings.name))
            })?;

        Ok(ProviderResponse {
            content: Some(content.to_string()),
            finish_reason: json["stop_reason"].as_str().map(String::from),
        })
    }

    fn is_configured(&self) -> bool {
        self.settings.has_credentials()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{settings_for, spawn_stub};
    use axum::http::StatusCode;
    use olpchat_core::config::LlmConfig;
    use std::time::Duration;

    fn keyed() -> LlmConfig {
        LlmConfig {
            anthropic_api_key: "sk-ant-test".into(),
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_messages_request_shape() {
        let reply = json!({
            "content": [{ "type": "text", "text": "Claude answer" }],
            "stop_reason": "end_turn"
        });
        let (base, captured) = spawn_stub("/messages", StatusCode::OK, reply, Duration::ZERO).await;
        let provider = AnthropicProvider::new(settings_for("anthropic", &base, &keyed())).unwrap();

        let resp = provider
            .chat(
                &[Message::system("OLP preamble"), Message::user("what is mwee")],
                &GenerateParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(resp.text(), Some("Claude answer"));
        assert_eq!(resp.finish_reason.as_deref(), Some("end_turn"));

        let seen = captured.lock().unwrap().clone();
        assert_eq!(seen.header("x-api-key"), Some("sk-ant-test"));
        assert_eq!(seen.header("anthropic-version"), Some(ANTHROPIC_VERSION));
        assert!(seen.header("authorization").is_none());

        let body = seen.body.unwrap();
        assert_eq!(body["system"], "OLP preamble");
        assert_eq!(body["max_tokens"], 1024);
        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_missing_key() {
        let provider = AnthropicProvider::new(settings_for(
            "anthropic",
            "http://127.0.0.1:9",
            &LlmConfig::default(),
        ))
        .unwrap();
        let err = provider
            .chat(&[Message::user("q")], &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OlpChatError::ApiKeyMissing(ref p) if p == "anthropic"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (base, _) = spawn_stub(
            "/messages",
            StatusCode::UNAUTHORIZED,
            json!({ "error": { "message": "bad key" } }),
            Duration::ZERO,
        )
        .await;
        let provider = AnthropicProvider::new(settings_for("anthropic", &base, &keyed())).unwrap();
        let err = provider
            .chat(&[Message::user("q")], &GenerateParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, OlpChatError::Provider(ref m) if m.contains("401")));
    }
}
