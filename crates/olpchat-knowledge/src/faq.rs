//! FAQ table, keyword index, and the knowledge base that owns them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domains::{self, Domain};
use crate::error::KnowledgeError;
use crate::matcher::normalize_query;

/// Built-in FAQ content (topics + keyword index).
const BUILTIN_FAQ: &str = include_str!("../data/faq.json");

/// One curated answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Canonical lowercase topic key. Filled from the document key when loading.
    #[serde(default)]
    pub topic: String,
    pub answer: String,
    #[serde(default = "default_category")]
    pub category: String,
    /// Presentational only — not used for matching.
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

fn default_category() -> String {
    "general".into()
}

/// Keyword fragment → topic keys, in insertion order.
///
/// Iteration order decides frequency ties in the matcher, so it must stay
/// the order the index was written in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordIndex {
    entries: IndexMap<String, Vec<String>>,
}

impl KeywordIndex {
    pub fn new(entries: IndexMap<String, Vec<String>>) -> Self {
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// On-disk shape of a knowledge document.
#[derive(Debug, Deserialize)]
struct KnowledgeDocument {
    topics: IndexMap<String, AnswerRecord>,
    #[serde(default)]
    keywords: KeywordIndex,
    #[serde(default)]
    domains: Option<Vec<Domain>>,
}

/// Immutable FAQ knowledge base.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    records: IndexMap<String, AnswerRecord>,
    keywords: KeywordIndex,
    domains: Vec<Domain>,
}

impl KnowledgeBase {
    /// Build and validate a knowledge base.
    pub fn new(
        records: IndexMap<String, AnswerRecord>,
        keywords: KeywordIndex,
        domains: Vec<Domain>,
    ) -> Result<Self, KnowledgeError> {
        for topic in records.keys() {
            if topic.is_empty() || normalize_query(topic) != *topic {
                return Err(KnowledgeError::InvalidTopicKey(topic.clone()));
            }
        }
        for (keyword, topics) in keywords.iter() {
            if keyword.is_empty() || keyword.to_lowercase() != keyword {
                return Err(KnowledgeError::InvalidKeyword(keyword.to_string()));
            }
            if let Some(missing) = topics.iter().find(|t| !records.contains_key(t.as_str())) {
                return Err(KnowledgeError::DanglingKeyword {
                    keyword: keyword.to_string(),
                    topic: missing.clone(),
                });
            }
        }
        Ok(Self {
            records,
            keywords,
            domains,
        })
    }

    /// The curated Maryland OLP content shipped with the crate.
    pub fn builtin() -> Result<Self, KnowledgeError> {
        Self::from_json(BUILTIN_FAQ)
    }

    /// Parse a knowledge document. Domains default to the built-in list.
    pub fn from_json(json: &str) -> Result<Self, KnowledgeError> {
        let doc: KnowledgeDocument = serde_json::from_str(json)?;
        let records = doc
            .topics
            .into_iter()
            .map(|(key, mut record)| {
                record.topic = key.clone();
                (key, record)
            })
            .collect();
        let domains = match doc.domains {
            Some(d) => d,
            None => domains::builtin_domains()?,
        };
        Self::new(records, doc.keywords, domains)
    }

    /// Load a knowledge document from disk.
    pub fn from_path(path: &Path) -> Result<Self, KnowledgeError> {
        let content = std::fs::read_to_string(path)?;
        let kb = Self::from_json(&content)?;
        tracing::info!(
            "📚 Knowledge base loaded from {}: {} topics, {} keywords",
            path.display(),
            kb.len(),
            kb.keywords.len()
        );
        Ok(kb)
    }

    /// Exact topic lookup (key must already be normalized).
    pub fn get(&self, topic: &str) -> Option<&AnswerRecord> {
        self.records.get(topic)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records in table order.
    pub fn records(&self) -> impl Iterator<Item = &AnswerRecord> {
        self.records.values()
    }

    pub fn keywords(&self) -> &KeywordIndex {
        &self.keywords
    }

    /// `(topic, category)` pairs in table order.
    pub fn topics(&self) -> Vec<(&str, &str)> {
        self.records
            .values()
            .map(|r| (r.topic.as_str(), r.category.as_str()))
            .collect()
    }

    /// Sorted, deduplicated categories.
    pub fn categories(&self) -> Vec<&str> {
        let mut cats: Vec<&str> = self.records.values().map(|r| r.category.as_str()).collect();
        cats.sort_unstable();
        cats.dedup();
        cats
    }

    /// Records in one category, table order.
    pub fn by_category(&self, category: &str) -> Vec<&AnswerRecord> {
        self.records
            .values()
            .filter(|r| r.category == category)
            .collect()
    }

    pub fn domains(&self) -> &[Domain] {
        &self.domains
    }
}
