//! Shared HTTP plumbing for provider calls.

use olpchat_core::error::{OlpChatError, Result};
use serde_json::Value;
use std::time::Duration;

use crate::provider_registry::ProviderSettings;

/// Longest slice of an error body kept in error messages.
const MAX_ERROR_BODY: usize = 300;

/// Build a client with the per-provider request timeout.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OlpChatError::Http(format!("failed to build HTTP client: {e}")))
}

/// POST a JSON body to the provider endpoint and parse the JSON reply.
pub async fn post_json(
    client: &reqwest::Client,
    settings: &ProviderSettings,
    body: &Value,
) -> Result<Value> {
    post_json_with(client, settings, body, |req| req).await
}

/// Like [`post_json`], with a hook for provider-specific headers.
pub async fn post_json_with<F>(
    client: &reqwest::Client,
    settings: &ProviderSettings,
    body: &Value,
    extra: F,
) -> Result<Value>
where
    F: FnOnce(reqwest::RequestBuilder) -> reqwest::RequestBuilder,
{
    let url = settings.url();
    let req = client
        .post(&url)
        .header("Content-Type", "application/json")
        .json(body);
    let req = extra(settings.apply_auth(req));

    let resp = req.send().await.map_err(|e| {
        if e.is_timeout() {
            OlpChatError::Timeout(format!(
                "{} did not answer within {}s",
                settings.name,
                settings.timeout.as_secs()
            ))
        } else {
            OlpChatError::Http(format!("{} connection failed ({url}): {e}", settings.name))
        }
    })?;

    let status = resp.status();
    if !status.is_success() {
        let text = resp.text().await.unwrap_or_default();
        return Err(OlpChatError::Provider(format!(
            "{} API error {status}: {}",
            settings.name,
            truncate(&text, MAX_ERROR_BODY)
        )));
    }

    resp.json::<Value>().await.map_err(|e| {
        if e.is_timeout() {
            OlpChatError::Timeout(format!("{} response body timed out", settings.name))
        } else {
            OlpChatError::Provider(format!("{} returned malformed JSON: {e}", settings.name))
        }
    })
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
