//! The five OLP domains of action.

use serde::{Deserialize, Serialize};

use crate::error::KnowledgeError;

const BUILTIN_DOMAINS: &str = include_str!("../data/domains.json");

/// A domain of action with its current actions and recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Parse the built-in domain list.
pub fn builtin_domains() -> Result<Vec<Domain>, KnowledgeError> {
    Ok(serde_json::from_str(BUILTIN_DOMAINS)?)
}
