//! Knowledge base loading errors.

use olpchat_core::OlpChatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("failed to parse knowledge document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to read knowledge document: {0}")]
    Io(#[from] std::io::Error),

    #[error("keyword '{keyword}' points at unknown topic '{topic}'")]
    DanglingKeyword { keyword: String, topic: String },

    #[error("topic '{0}' is not a normalized key (must be lowercase with no surrounding whitespace)")]
    InvalidTopicKey(String),

    #[error("keyword '{0}' must be non-empty and lowercase")]
    InvalidKeyword(String),
}

impl From<KnowledgeError> for OlpChatError {
    fn from(e: KnowledgeError) -> Self {
        OlpChatError::Knowledge(e.to_string())
    }
}
