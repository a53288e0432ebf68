//! Provider failover — sequential fallback across generation backends.
//!
//! Try primary → fallback₁ → fallback₂. A provider fails when it errors,
//! times out, or returns blank text; the first non-blank answer wins.
//! The chain may be empty (`faq` mode), in which case nothing is attempted.

use async_trait::async_trait;
use olpchat_core::error::{OlpChatError, Result};
use olpchat_core::traits::provider::{GenerateParams, Provider};
use olpchat_core::types::{Message, ProviderResponse};

/// Text produced by one provider in the chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAnswer {
    pub text: String,
    /// Name of the provider that produced it.
    pub provider: String,
}

/// Failover chain — tries providers in order until one answers.
pub struct FailoverProvider {
    providers: Vec<Box<dyn Provider>>,
}

impl FailoverProvider {
    /// First provider is primary, the rest are fallbacks.
    pub fn new(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    /// An empty chain that never generates.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// First non-blank answer from the chain, or `None` if every provider failed.
    pub async fn first_answer(
        &self,
        messages: &[Message],
        params: &GenerateParams,
    ) -> Option<GeneratedAnswer> {
        for (idx, provider) in self.providers.iter().enumerate() {
            match provider.chat(messages, params).await {
                Ok(response) => match response.text() {
                    Some(text) => {
                        if idx > 0 {
                            tracing::info!(
                                "🔄 Failover: {} → {} (success)",
                                self.providers[0].name(),
                                provider.name()
                            );
                        }
                        return Some(GeneratedAnswer {
                            text: text.to_string(),
                            provider: provider.name().to_string(),
                        });
                    }
                    None => {
                        tracing::warn!("⚠️ Provider {} returned an empty answer", provider.name());
                    }
                },
                Err(e) if e.is_not_configured() => {
                    tracing::debug!("⏭️ Skipping provider {}: {}", provider.name(), e);
                }
                Err(e) => {
                    tracing::warn!("⚠️ Provider {} failed: {}", provider.name(), e);
                }
            }
        }
        None
    }
}

#[async_trait]
impl Provider for FailoverProvider {
    fn name(&self) -> &str {
        // Return primary provider name
        self.providers
            .first()
            .map(|p| p.name())
            .unwrap_or("failover")
    }

    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse> {
        self.first_answer(messages, params)
            .await
            .map(|answer| ProviderResponse {
                content: Some(answer.text),
                finish_reason: None,
            })
            .ok_or_else(|| OlpChatError::EmptyResponse("no provider produced an answer".into()))
    }

    fn is_configured(&self) -> bool {
        self.providers.iter().any(|p| p.is_configured())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Behavior {
        Answer(&'static str),
        Fail,
        NoKey,
    }

    struct MockProvider {
        name: &'static str,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Provider for MockProvider {
        fn name(&self) -> &str {
            self.name
        }

        async fn chat(&self, _: &[Message], _: &GenerateParams) -> Result<ProviderResponse> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Answer(text) => Ok(ProviderResponse {
                    content: Some(text.to_string()),
                    finish_reason: None,
                }),
                Behavior::Fail => Err(OlpChatError::Http("connection refused".into())),
                Behavior::NoKey => Err(OlpChatError::ApiKeyMissing(self.name.into())),
            }
        }

        fn is_configured(&self) -> bool {
            !matches!(self.behavior, Behavior::NoKey)
        }
    }

    fn mock(name: &'static str, behavior: Behavior) -> (Box<dyn Provider>, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = MockProvider {
            name,
            behavior,
            calls: calls.clone(),
        };
        (Box::new(provider), calls)
    }

    fn question() -> Vec<Message> {
        vec![Message::user("q")]
    }

    #[tokio::test]
    async fn test_empty_chain_yields_nothing() {
        let chain = FailoverProvider::empty();
        assert!(chain.is_empty());
        assert_eq!(chain.name(), "failover");
        assert!(!chain.is_configured());
        assert!(chain.first_answer(&question(), &GenerateParams::default()).await.is_none());
        assert!(matches!(
            chain.chat(&question(), &GenerateParams::default()).await,
            Err(OlpChatError::EmptyResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_first_success_stops_chain() {
        let (a, a_calls) = mock("a", Behavior::Answer("from a"));
        let (b, b_calls) = mock("b", Behavior::Answer("from b"));
        let chain = FailoverProvider::new(vec![a, b]);

        let answer = chain.first_answer(&question(), &GenerateParams::default()).await.unwrap();
        assert_eq!(answer.text, "from a");
        assert_eq!(answer.provider, "a");
        assert_eq!(a_calls.load(Ordering::SeqCst), 1);
        assert_eq!(b_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_falls_through_errors_and_blank_text() {
        let (a, _) = mock("a", Behavior::Fail);
        let (b, _) = mock("b", Behavior::NoKey);
        let (c, c_calls) = mock("c", Behavior::Answer("   "));
        let (d, _) = mock("d", Behavior::Answer("  trimmed  "));
        let chain = FailoverProvider::new(vec![a, b, c, d]);

        let answer = chain.first_answer(&question(), &GenerateParams::default()).await.unwrap();
        assert_eq!(answer.provider, "d");
        assert_eq!(answer.text, "trimmed");
        assert_eq!(c_calls.load(Ordering::SeqCst), 1);
        assert_eq!(chain.provider_names(), vec!["a", "b", "c", "d"]);
        assert_eq!(chain.name(), "a");
    }

    #[tokio::test]
    async fn test_all_fail() {
        let (a, _) = mock("a", Behavior::Fail);
        let (b, _) = mock("b", Behavior::Answer(""));
        let chain = FailoverProvider::new(vec![a, b]);
        assert!(chain.first_answer(&question(), &GenerateParams::default()).await.is_none());
        assert!(chain.chat(&question(), &GenerateParams::default()).await.is_err());
    }

    #[tokio::test]
    async fn test_chat_via_trait() {
        let (a, _) = mock("a", Behavior::Answer("ok"));
        let chain = FailoverProvider::new(vec![a]);
        let resp = chain.chat(&question(), &GenerateParams::default()).await.unwrap();
        assert_eq!(resp.text(), Some("ok"));
    }
}
