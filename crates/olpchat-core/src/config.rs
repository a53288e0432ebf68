//! OLP Chat configuration system.
//!
//! Defaults → TOML file → environment variables. Environment variable names
//! match the ones the service has always been deployed with (`LLM_MODE`,
//! `OLLAMA_URL`, `OPENROUTER_API_KEY`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{OlpChatError, Result};

/// Preamble sent to every external provider.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are the Maryland Outdoor Learning Partnership (OLP) AI Assistant.
You help educators, partners, and community members learn about environmental literacy in Maryland.

Key facts:
- Maryland was the first state to require environmental literacy for graduation (since 2011)
- OLP was established by Executive Order 01.01.2024.15
- OLP has five domains of action: Access to Nature, College & Green Careers, Networks, School Sustainability, Environmental & Climate Literacy
- MWEE = Meaningful Watershed Educational Experience (required for graduation)
- Contact: olivia.wisner1@maryland.gov and stephanie.tuckfield1@maryland.gov

Be helpful, accurate, and concise. Focus on Maryland-specific environmental education information.";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OlpChatConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub identity: Identity,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
}

impl OlpChatConfig {
    /// Load config from the default path (~/.olpchat/config.toml), then apply env overrides.
    pub fn load() -> Result<Self> {
        let path = std::env::var("OLPCHAT_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| Self::default_path());
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    /// Load config from a specific path. Env overrides are not applied.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| OlpChatError::Config(format!("Failed to read config {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| OlpChatError::Config(format!("Failed to parse config: {e}")))?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (used by tests).
    pub fn apply_env_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(mode) = get("LLM_MODE") {
            match mode.parse::<LlmMode>() {
                Ok(m) => self.llm.mode = m,
                Err(e) => tracing::warn!("⚠️ Ignoring LLM_MODE: {e}"),
            }
        }
        if let Some(v) = get("OLLAMA_URL") { self.llm.ollama_url = v; }
        if let Some(v) = get("OLLAMA_MODEL") { self.llm.ollama_model = v; }
        if let Some(v) = get("LLAMACPP_URL") { self.llm.llamacpp_url = v; }
        if let Some(v) = get("OPENROUTER_API_KEY") { self.llm.openrouter_api_key = v; }
        if let Some(v) = get("OPENROUTER_MODEL") { self.llm.openrouter_model = v; }
        if let Some(v) = get("ANTHROPIC_API_KEY") { self.llm.anthropic_api_key = v; }
        if let Some(v) = get("OPENAI_API_KEY") { self.llm.openai_api_key = v; }
        if let Some(v) = get("HOST") { self.gateway.host = v; }
        if let Some(port) = get("PORT") {
            match port.parse::<u16>() {
                Ok(p) => self.gateway.port = p,
                Err(_) => tracing::warn!("⚠️ Ignoring invalid PORT={port}"),
            }
        }
        if let Some(v) = get("OLPCHAT_KNOWLEDGE_PATH") { self.knowledge.path = Some(v); }
    }

    /// Get the default config path.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }

    /// Get the OLP Chat home directory.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".olpchat")
    }
}

/// Which external providers (if any) back up the FAQ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmMode {
    /// FAQ only — never call out.
    #[default]
    Faq,
    Ollama,
    Llamacpp,
    /// Hosted APIs: OpenRouter → Anthropic → OpenAI.
    Api,
    /// Local first, then hosted: Ollama → llama.cpp → OpenRouter → Anthropic → OpenAI.
    Hybrid,
}

impl LlmMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::Ollama => "ollama",
            Self::Llamacpp => "llamacpp",
            Self::Api => "api",
            Self::Hybrid => "hybrid",
        }
    }

    /// Provider names tried, in order, when the FAQ has no answer.
    pub fn provider_chain(&self) -> &'static [&'static str] {
        match self {
            Self::Faq => &[],
            Self::Ollama => &["ollama"],
            Self::Llamacpp => &["llamacpp"],
            Self::Api => &["openrouter", "anthropic", "openai"],
            Self::Hybrid => &["ollama", "llamacpp", "openrouter", "anthropic", "openai"],
        }
    }

    /// Whether the Ollama model is part of this mode.
    pub fn uses_ollama(&self) -> bool {
        matches!(self, Self::Ollama | Self::Hybrid)
    }
}

impl fmt::Display for LlmMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmMode {
    type Err = OlpChatError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "faq" => Ok(Self::Faq),
            "ollama" => Ok(Self::Ollama),
            "llamacpp" | "llama.cpp" => Ok(Self::Llamacpp),
            "api" => Ok(Self::Api),
            "hybrid" => Ok(Self::Hybrid),
            other => Err(OlpChatError::Config(format!(
                "unknown LLM mode '{other}' (expected faq, ollama, llamacpp, api, hybrid)"
            ))),
        }
    }
}

/// External provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub mode: LlmMode,
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    #[serde(default = "default_llamacpp_url")]
    pub llamacpp_url: String,
    #[serde(default)]
    pub openrouter_api_key: String,
    #[serde(default = "default_openrouter_model")]
    pub openrouter_model: String,
    #[serde(default)]
    pub anthropic_api_key: String,
    #[serde(default = "default_anthropic_model")]
    pub anthropic_model: String,
    #[serde(default)]
    pub openai_api_key: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-call timeout for local servers (Ollama, llama.cpp).
    #[serde(default = "default_local_timeout")]
    pub local_timeout_secs: u64,
    /// Per-call timeout for hosted APIs.
    #[serde(default = "default_api_timeout")]
    pub api_timeout_secs: u64,
}

fn default_ollama_url() -> String { "http://localhost:11434".into() }
fn default_ollama_model() -> String { "gpt-oss:20b".into() }
fn default_llamacpp_url() -> String { "http://localhost:8080".into() }
fn default_openrouter_model() -> String { "deepseek/deepseek-r1-distill-llama-8b".into() }
fn default_anthropic_model() -> String { "claude-3-haiku-20240307".into() }
fn default_openai_model() -> String { "gpt-4o-mini".into() }
fn default_max_tokens() -> u32 { 1024 }
fn default_local_timeout() -> u64 { 60 }
fn default_api_timeout() -> u64 { 30 }

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            mode: LlmMode::default(),
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            llamacpp_url: default_llamacpp_url(),
            openrouter_api_key: String::new(),
            openrouter_model: default_openrouter_model(),
            anthropic_api_key: String::new(),
            anthropic_model: default_anthropic_model(),
            openai_api_key: String::new(),
            openai_model: default_openai_model(),
            max_tokens: default_max_tokens(),
            local_timeout_secs: default_local_timeout(),
            api_timeout_secs: default_api_timeout(),
        }
    }
}

/// Gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_host")]
    pub host: String,
}

fn default_port() -> u16 { 5000 }
fn default_host() -> String { "0.0.0.0".into() }

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

/// Service identity and the preamble given to providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

fn default_service_name() -> String { "Maryland OLP AI Chat".into() }
fn default_system_prompt() -> String { DEFAULT_SYSTEM_PROMPT.into() }

impl Default for Identity {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// Knowledge base source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// Alternative FAQ document (JSON). Built-in content is used when unset.
    #[serde(default)]
    pub path: Option<String>,
}
