//! # OLP Chat Agent
//!
//! Answers one query at a time: match → maybe generate → format.
//!
//! 1. The knowledge base matcher looks for a curated answer.
//! 2. With no match, a non-`faq` mode and a non-empty query, the provider
//!    chain is asked for text.
//! 3. The result is wrapped in a [`ChatResponse`]; if nothing answered, the
//!    static fallback is used.

pub mod response;

use std::sync::Arc;

use olpchat_core::config::{LlmMode, OlpChatConfig};
use olpchat_core::error::Result;
use olpchat_core::traits::provider::GenerateParams;
use olpchat_core::types::Message;
use olpchat_knowledge::{KnowledgeBase, normalize_query};
use olpchat_providers::failover::FailoverProvider;

pub use response::{ChatResponse, Source};

/// The chat pipeline. Immutable once built; share it through an `Arc`.
pub struct ChatAgent {
    knowledge: Arc<KnowledgeBase>,
    chain: FailoverProvider,
    mode: LlmMode,
    system_prompt: String,
}

impl ChatAgent {
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        chain: FailoverProvider,
        mode: LlmMode,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            knowledge,
            chain,
            mode,
            system_prompt: system_prompt.into(),
        }
    }

    /// Build the agent and its provider chain from configuration.
    pub fn from_config(config: &OlpChatConfig, knowledge: Arc<KnowledgeBase>) -> Result<Self> {
        let chain = olpchat_providers::create_chain(&config.llm)?;
        if chain.is_empty() {
            tracing::info!("📖 LLM mode '{}': answering from the FAQ only", config.llm.mode);
        } else {
            tracing::info!(
                "🤖 LLM mode '{}': fallback chain [{}]",
                config.llm.mode,
                chain.provider_names().join(" → ")
            );
        }
        Ok(Self::new(
            knowledge,
            chain,
            config.llm.mode,
            config.identity.system_prompt.clone(),
        ))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn mode(&self) -> LlmMode {
        self.mode
    }

    pub fn chain(&self) -> &FailoverProvider {
        &self.chain
    }

    /// Answer a raw user query. Never fails; the fallback is the floor.
    pub async fn respond(&self, query: &str) -> ChatResponse {
        if let Some(record) = self.knowledge.find_best_match(query) {
            tracing::debug!("📚 FAQ answer for '{}': {}", query, record.topic);
            return ChatResponse::from_record(record);
        }

        let normalized = normalize_query(query);
        if self.mode != LlmMode::Faq && !self.chain.is_empty() && !normalized.is_empty() {
            let messages = [
                Message::system(self.system_prompt.as_str()),
                Message::user(normalized),
            ];
            if let Some(answer) = self
                .chain
                .first_answer(&messages, &GenerateParams::default())
                .await
            {
                tracing::info!("🤖 Generated answer via {}", answer.provider);
                return ChatResponse::generated(answer);
            }
        }

        tracing::debug!("🤷 No answer for '{}', using fallback", query);
        ChatResponse::fallback(query)
    }
}
