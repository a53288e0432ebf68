//! The chat response envelope and how each answer source fills it.

use olpchat_knowledge::AnswerRecord;
use olpchat_providers::failover::GeneratedAnswer;
use serde::{Deserialize, Serialize};

/// Category given to text produced by an external provider.
pub const GENERATED_CATEGORY: &str = "ai_generated";

/// Topics suggested alongside the fallback answer.
pub const FALLBACK_RELATED: [&str; 3] = ["five domains", "contact olp", "what is maryland olp"];

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "faq")]
    Faq,
    #[serde(rename = "externally-generated")]
    ExternallyGenerated,
    #[serde(rename = "fallback")]
    Fallback,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Faq => "faq",
            Self::ExternallyGenerated => "externally-generated",
            Self::Fallback => "fallback",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body returned for every chat query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
    pub category: String,
    pub related: Vec<String>,
    pub url: Option<String>,
    pub source: Source,
    /// Provider name, only for generated answers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl ChatResponse {
    /// Envelope for a curated FAQ record.
    pub fn from_record(record: &AnswerRecord) -> Self {
        Self {
            answer: record.answer.clone(),
            category: record.category.clone(),
            related: record.related.clone(),
            url: record.url.clone(),
            source: Source::Faq,
            provider: None,
        }
    }

    /// Envelope for provider-generated text.
    pub fn generated(answer: GeneratedAnswer) -> Self {
        Self {
            answer: answer.text,
            category: GENERATED_CATEGORY.into(),
            related: Vec::new(),
            url: None,
            source: Source::ExternallyGenerated,
            provider: Some(answer.provider),
        }
    }

    /// Static "here is what I can help with" answer quoting the user's query.
    pub fn fallback(query: &str) -> Self {
        Self {
            answer: fallback_text(query),
            category: "fallback".into(),
            related: FALLBACK_RELATED.iter().map(|s| s.to_string()).collect(),
            url: None,
            source: Source::Fallback,
            provider: None,
        }
    }
}

fn fallback_text(query: &str) -> String {
    format!(
        "I don't have specific information about '{query}' in my knowledge base yet. \
         Here are some things I can help with:\n\n\
         - **Five Domains of OLP**: Access to Nature, College & Green Careers, Networks, \
         School Sustainability, Environmental & Climate Literacy\n\
         - **Programs**: MWEE, Green Schools, CTE pathways\n\
         - **Resources**: Funding, professional development, curriculum\n\
         - **Contact info**: How to reach Maryland OLP team\n\n\
         Try asking about one of these topics, or contact the OLP team directly:\n\
         olivia.wisner1@maryland.gov or stephanie.tuckfield1@maryland.gov"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_serializes_as_tag() {
        assert_eq!(serde_json::to_value(Source::Faq).unwrap(), json!("faq"));
        assert_eq!(
            serde_json::to_value(Source::ExternallyGenerated).unwrap(),
            json!("externally-generated")
        );
        assert_eq!(Source::Fallback.to_string(), "fallback");
    }

    #[test]
    fn test_faq_envelope_keeps_null_url() {
        let record = AnswerRecord {
            topic: "what is mwee".into(),
            answer: "A MWEE is...".into(),
            category: "programs".into(),
            related: vec!["outdoor learning".into()],
            url: None,
        };
        let json = serde_json::to_value(ChatResponse::from_record(&record)).unwrap();
        assert_eq!(json["source"], "faq");
        assert_eq!(json["category"], "programs");
        assert_eq!(json["url"], serde_json::Value::Null);
        assert!(json.get("provider").is_none());
    }

    #[test]
    fn test_generated_envelope() {
        let resp = ChatResponse::generated(GeneratedAnswer {
            text: "Generated.".into(),
            provider: "ollama".into(),
        });
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["category"], "ai_generated");
        assert_eq!(json["source"], "externally-generated");
        assert_eq!(json["provider"], "ollama");
        assert_eq!(json["related"], json!([]));
    }

    #[test]
    fn test_fallback_quotes_query_and_contacts() {
        let resp = ChatResponse::fallback("Tide Tables");
        assert!(resp.answer.contains("'Tide Tables'"));
        assert!(resp.answer.contains("olivia.wisner1@maryland.gov"));
        assert!(resp.answer.contains("stephanie.tuckfield1@maryland.gov"));
        assert!(resp.answer.contains("Five Domains of OLP"));
        assert_eq!(resp.category, "fallback");
        assert_eq!(resp.related, vec!["five domains", "contact olp", "what is maryland olp"]);
        assert_eq!(resp.source, Source::Fallback);
    }
}
