//! Provider trait — an external text-generation backend.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Message, ProviderResponse};

/// Per-call generation parameters. `None` leaves the provider's own setting in place.
#[derive(Debug, Clone, Default)]
pub struct GenerateParams {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

#[async_trait]
pub trait Provider: Send + Sync {
    /// Short identifier used in logs and response envelopes.
    fn name(&self) -> &str;

    /// Send a conversation and return the generated text.
    async fn chat(&self, messages: &[Message], params: &GenerateParams) -> Result<ProviderResponse>;

    /// Whether the provider has what it needs to be called (e.g. an API key).
    fn is_configured(&self) -> bool {
        true
    }
}
