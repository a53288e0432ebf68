//! Provider registry — maps provider names to endpoint configurations.
//!
//! Static entries describe where each backend lives and how it speaks;
//! `ProviderSettings::resolve` combines an entry with the runtime
//! `LlmConfig` (URLs for local servers, API keys, model names).

use olpchat_core::config::LlmConfig;
use std::time::Duration;

/// How to attach auth credentials to requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStyle {
    /// `Authorization: Bearer <key>`
    Bearer,
    /// `x-api-key: <key>` (Anthropic)
    XApiKey,
    /// No authentication required (local servers).
    None,
}

/// Request/response shape spoken by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// Ollama `/api/generate`: single prompt string, `response` field back.
    OllamaGenerate,
    /// OpenAI-style `/chat/completions`.
    ChatCompletions,
    /// Anthropic `/v1/messages` with a top-level `system` field.
    AnthropicMessages,
}

/// Static configuration for a single provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider identifier.
    pub name: &'static str,
    pub wire: WireFormat,
    /// Default base URL (local servers take theirs from `LlmConfig`).
    pub base_url: &'static str,
    /// Path appended to the base URL.
    pub chat_path: &'static str,
    pub auth_style: AuthStyle,
    /// Runs on the operator's own hardware (longer timeout, configurable URL).
    pub local: bool,
    /// Whether requests carry an explicit `max_tokens`.
    pub sends_max_tokens: bool,
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// All known providers.
static PROVIDERS: &[ProviderConfig] = &[
    ProviderConfig {
        name: "ollama",
        wire: WireFormat::OllamaGenerate,
        base_url: "http://localhost:11434",
        chat_path: "/api/generate",
        auth_style: AuthStyle::None,
        local: true,
        sends_max_tokens: false,
    },
    ProviderConfig {
        name: "llamacpp",
        wire: WireFormat::ChatCompletions,
        base_url: "http://localhost:8080",
        chat_path: "/v1/chat/completions",
        auth_style: AuthStyle::None,
        local: true,
        sends_max_tokens: true,
    },
    ProviderConfig {
        name: "openrouter",
        wire: WireFormat::ChatCompletions,
        base_url: "https://openrouter.ai/api/v1",
        chat_path: "/chat/completions",
        auth_style: AuthStyle::Bearer,
        local: false,
        sends_max_tokens: false,
    },
    ProviderConfig {
        name: "anthropic",
        wire: WireFormat::AnthropicMessages,
        base_url: "https://api.anthropic.com/v1",
        chat_path: "/messages",
        auth_style: AuthStyle::XApiKey,
        local: false,
        sends_max_tokens: true,
    },
    ProviderConfig {
        name: "openai",
        wire: WireFormat::ChatCompletions,
        base_url: "https://api.openai.com/v1",
        chat_path: "/chat/completions",
        auth_style: AuthStyle::Bearer,
        local: false,
        sends_max_tokens: false,
    },
];

/// Look up a provider config by name.
pub fn get_provider_config(name: &str) -> Option<&'static ProviderConfig> {
    // Also match aliases
    let lookup = match name {
        "llama.cpp" | "llama_cpp" => "llamacpp",
        "claude" => "anthropic",
        "chatgpt" => "openai",
        other => other,
    };
    PROVIDERS.iter().find(|p| p.name == lookup)
}

/// A registry entry resolved against runtime configuration.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub name: String,
    pub wire: WireFormat,
    /// Base URL without trailing slash.
    pub base_url: String,
    pub chat_path: String,
    pub auth_style: AuthStyle,
    pub api_key: String,
    /// `None` lets the server pick (llama.cpp serves whatever it loaded).
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn resolve(registry: &ProviderConfig, llm: &LlmConfig) -> Self {
        let (base_url, api_key, model) = match registry.name {
            "ollama" => (llm.ollama_url.clone(), String::new(), Some(llm.ollama_model.clone())),
            "llamacpp" => (llm.llamacpp_url.clone(), String::new(), None),
            "openrouter" => (
                registry.base_url.to_string(),
                llm.openrouter_api_key.clone(),
                Some(llm.openrouter_model.clone()),
            ),
            "anthropic" => (
                registry.base_url.to_string(),
                llm.anthropic_api_key.clone(),
                Some(llm.anthropic_model.clone()),
            ),
            "openai" => (
                registry.base_url.to_string(),
                llm.openai_api_key.clone(),
                Some(llm.openai_model.clone()),
            ),
            _ => (registry.base_url.to_string(), String::new(), None),
        };

        let timeout_secs = if registry.local {
            llm.local_timeout_secs
        } else {
            llm.api_timeout_secs
        };

        Self {
            name: registry.name.to_string(),
            wire: registry.wire,
            base_url: base_url.trim_end_matches('/').to_string(),
            chat_path: registry.chat_path.to_string(),
            auth_style: registry.auth_style,
            api_key,
            model,
            max_tokens: registry.sends_max_tokens.then_some(llm.max_tokens),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Full endpoint URL.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }

    /// Keyed providers need a key before they can be called.
    pub fn has_credentials(&self) -> bool {
        self.auth_style == AuthStyle::None || !self.api_key.is_empty()
    }

    /// Attach auth headers for this provider.
    pub fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_style {
            AuthStyle::Bearer if !self.api_key.is_empty() => {
                req.header("Authorization", format!("Bearer {}", self.api_key))
            }
            AuthStyle::XApiKey if !self.api_key.is_empty() => req.header("x-api-key", &self.api_key),
            _ => req,
        }
    }
}
