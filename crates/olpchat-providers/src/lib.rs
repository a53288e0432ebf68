//! # OLP Chat Providers
//!
//! External text-generation backends used when the FAQ has no answer.
//!
//! OpenAI-compatible servers (llama.cpp, OpenRouter, OpenAI) share one
//! `OpenAiCompatibleProvider`; Ollama's generate API and Anthropic's messages
//! API have their own small implementations. `FailoverProvider` tries a list
//! of them in order.

pub mod anthropic;
pub mod failover;
pub mod http;
pub mod ollama;
pub mod openai_compatible;
pub mod provider_registry;

#[cfg(test)]
pub(crate) mod test_support;

use olpchat_core::config::LlmConfig;
use olpchat_core::error::{OlpChatError, Result};
use olpchat_core::traits::Provider;

use crate::failover::FailoverProvider;
use crate::provider_registry::{ProviderSettings, WireFormat};

/// Create a single provider by name.
pub fn create_provider(name: &str, llm: &LlmConfig) -> Result<Box<dyn Provider>> {
    let registry = provider_registry::get_provider_config(name)
        .ok_or_else(|| OlpChatError::ProviderNotFound(name.into()))?;
    let settings = ProviderSettings::resolve(registry, llm);
    provider_from_settings(settings)
}

/// Create a provider from already-resolved settings.
pub fn provider_from_settings(settings: ProviderSettings) -> Result<Box<dyn Provider>> {
    Ok(match settings.wire {
        WireFormat::OllamaGenerate => Box::new(ollama::OllamaProvider::new(settings)?),
        WireFormat::ChatCompletions => {
            Box::new(openai_compatible::OpenAiCompatibleProvider::new(settings)?)
        }
        WireFormat::AnthropicMessages => Box::new(anthropic::AnthropicProvider::new(settings)?),
    })
}

/// Build the fallback chain for the configured LLM mode (empty in `faq` mode).
pub fn create_chain(llm: &LlmConfig) -> Result<FailoverProvider> {
    let providers = llm
        .mode
        .provider_chain()
        .iter()
        .map(|name| create_provider(name, llm))
        .collect::<Result<Vec<_>>>()?;
    Ok(FailoverProvider::new(providers))
}
