//! Error types for OLP Chat.

use thiserror::Error;

/// Workspace-wide error type.
#[derive(Debug, Error)]
pub enum OlpChatError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("API key missing for provider: {0}")]
    ApiKeyMissing(String),

    #[error("Provider returned an empty response: {0}")]
    EmptyResponse(String),

    #[error("Unknown provider: {0}")]
    ProviderNotFound(String),

    #[error("Knowledge base error: {0}")]
    Knowledge(String),
}

impl OlpChatError {
    /// Whether this error only means "provider not configured" rather than a real failure.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::ApiKeyMissing(_))
    }
}

pub type Result<T> = std::result::Result<T, OlpChatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OlpChatError::ApiKeyMissing("openai".into());
        assert_eq!(err.to_string(), "API key missing for provider: openai");
        assert!(err.is_not_configured());
        assert!(!OlpChatError::Http("boom".into()).is_not_configured());
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: OlpChatError = io.into();
        assert!(matches!(err, OlpChatError::Io(_)));
    }
}
