//! Topic suggestions for partially typed queries.

use crate::faq::KnowledgeBase;

/// Suggestions returned by the HTTP layer.
pub const DEFAULT_SUGGESTION_LIMIT: usize = 5;

impl KnowledgeBase {
    /// Topic keys whose keyword overlaps the query in either direction.
    ///
    /// Looser than [`find_best_match`](Self::find_best_match): `"clim"` suggests
    /// the `climate` topics because the query is a substring of the keyword.
    /// Order follows the keyword index; duplicates are dropped.
    pub fn suggest(&self, query: &str, limit: usize) -> Vec<&str> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return vec![];
        }

        let mut suggestions: Vec<&str> = Vec::new();
        for (keyword, topics) in self.keywords().iter() {
            if keyword.contains(query.as_str()) || query.contains(keyword) {
                for topic in topics {
                    if !suggestions.contains(&topic.as_str()) {
                        suggestions.push(topic);
                    }
                }
            }
            if suggestions.len() >= limit {
                break;
            }
        }
        suggestions.truncate(limit);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb() -> KnowledgeBase {
        KnowledgeBase::builtin().unwrap()
    }

    #[test]
    fn test_partial_keyword() {
        let kb = kb();
        assert_eq!(
            kb.suggest("clim", DEFAULT_SUGGESTION_LIMIT),
            vec![
                "climate education",
                "climate literacy definition",
                "environmental and climate literacy",
            ]
        );
    }

    #[test]
    fn test_deduplicates_across_keywords() {
        let kb = kb();
        // "green school" and "green" both match; "what are green schools" appears once
        assert_eq!(
            kb.suggest("green", DEFAULT_SUGGESTION_LIMIT),
            vec![
                "what are green schools",
                "how to become green school",
                "college and green careers",
                "green careers",
            ]
        );
        assert_eq!(kb.suggest("grant money", 5), vec!["funding grants", "b-wet grants"]);
    }

    #[test]
    fn test_limit() {
        let kb = kb();
        let s = kb.suggest("a", DEFAULT_SUGGESTION_LIMIT);
        assert_eq!(s.len(), 5);
        assert_eq!(s[0], "what is environmental literacy");
        assert_eq!(kb.suggest("a", 2).len(), 2);
        assert!(kb.suggest("a", 0).is_empty());
    }

    #[test]
    fn test_empty_and_unknown() {
        let kb = kb();
        assert!(kb.suggest("", 5).is_empty());
        assert!(kb.suggest("   ", 5).is_empty());
        assert!(kb.suggest("zzz", 5).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let kb = kb();
        assert_eq!(kb.suggest("CLIM", 5), kb.suggest("clim", 5));
    }

    #[test]
    fn test_query_is_trimmed() {
        let kb = kb();
        // A trailing space must not turn "clim" into a query no keyword contains
        assert_eq!(kb.suggest("clim ", 5), kb.suggest("clim", 5));
        assert_eq!(kb.suggest("  clim", 5).len(), 3);
        // Whitespace alone is not "contained in every keyword"
        assert!(kb.suggest(" ", 5).is_empty());
    }
}
