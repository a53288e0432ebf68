//! Query → best FAQ record.
//!
//! Direct match on the normalized query first; otherwise every keyword that
//! occurs as a substring of the query votes for its topics, and the topic
//! with the most votes wins. Substring, not word, containment: `"ai"` matches
//! inside `"detail"`. Ties go to the topic that received its first vote
//! earliest, which follows keyword index order.

use indexmap::IndexMap;

use crate::faq::{AnswerRecord, KnowledgeBase};

/// Lowercase and trim a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

impl KnowledgeBase {
    /// Best record for a free-text query, or `None`.
    pub fn find_best_match(&self, query: &str) -> Option<&AnswerRecord> {
        let query = normalize_query(query);
        if query.is_empty() {
            return None;
        }

        if let Some(record) = self.get(&query) {
            return Some(record);
        }

        // Insertion order = order of first vote.
        let mut votes: IndexMap<&str, usize> = IndexMap::new();
        for (keyword, topics) in self.keywords().iter() {
            if query.contains(keyword) {
                for topic in topics {
                    *votes.entry(topic.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (topic, count) in votes {
            if best.is_none_or(|(_, top)| count > top) {
                best = Some((topic, count));
            }
        }

        let (topic, count) = best?;
        tracing::debug!("keyword match '{query}' → '{topic}' ({count} votes)");
        self.get(topic)
    }

    /// Resolve a URL path segment like `green-school` to a record.
    ///
    /// Dashes are treated as spaces on both sides, so `b-wet-grants` finds
    /// `b-wet grants` directly. A plain keyword scan of `b wet grants` would
    /// only hit `grant` and land on `funding grants` instead. Anything without
    /// a matching key falls back to [`find_best_match`](Self::find_best_match).
    pub fn lookup_path_topic(&self, segment: &str) -> Option<&AnswerRecord> {
        let wanted = normalize_query(&segment.replace('-', " "));
        if wanted.is_empty() {
            return None;
        }

        if let Some(record) = self.get(&wanted) {
            return Some(record);
        }
        if let Some(record) = self
            .records()
            .find(|r| r.topic.replace('-', " ") == wanted)
        {
            return Some(record);
        }

        self.find_best_match(&wanted)
    }
}
