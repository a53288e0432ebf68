//! # OLP Chat Knowledge Base
//!
//! Hand-curated FAQ answers plus a keyword index, matched without any
//! embeddings or search engine.
//!
//! ## How it works
//! ```text
//! User: "tell me about chesapeake bay grants"
//!   ↓ normalize (lowercase + trim)
//! Direct match on topic key?  — no
//!   ↓ keyword scan (substring containment, index order)
//! "chesapeake" → 3 topics, "bay" → 2 topics, "grant" → 2 topics
//!   ↓ frequency count, ties to the first topic seen
//! "chesapeake bay foundation"
//! ```
//!
//! The knowledge base is immutable once built; share it behind an `Arc`.

pub mod domains;
pub mod error;
pub mod faq;
pub mod matcher;
pub mod suggest;

pub use domains::Domain;
pub use error::KnowledgeError;
pub use faq::{AnswerRecord, KeywordIndex, KnowledgeBase};
pub use matcher::normalize_query;
