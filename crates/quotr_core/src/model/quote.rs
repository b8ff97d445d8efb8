//! Quote domain model.
//!
//! # Invariants
//! - `owner_id` is assigned at creation and never rewritten.
//! - `owner_id` may differ from the owner of `book_id`; no consistency is
//!   enforced between the two.

use crate::model::book::BookId;
use crate::model::user::UserId;
use crate::model::validation::{check_required, ValidationError};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Storage identifier of a quote row.
pub type QuoteId = i64;

/// Persisted quote record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub book_id: BookId,
    pub text: String,
    /// Page number in the source book, when known.
    pub page: Option<u32>,
    pub owner_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    pub modified_at: i64,
}

impl Quote {
    /// Returns single-line quote text capped at `max_chars` characters.
    pub fn excerpt(&self, max_chars: usize) -> String {
        let normalized = WHITESPACE_RE.replace_all(self.text.trim(), " ");
        if normalized.chars().count() <= max_chars {
            return normalized.into_owned();
        }
        let mut excerpt = normalized.chars().take(max_chars).collect::<String>();
        excerpt.push_str("...");
        excerpt
    }
}

/// User-editable quote fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDraft {
    pub book_id: BookId,
    pub text: String,
    pub page: Option<u32>,
}

impl QuoteDraft {
    /// Builds a draft with surrounding whitespace stripped from `text`.
    pub fn new(book_id: BookId, text: impl Into<String>, page: Option<u32>) -> Self {
        Self {
            book_id,
            text: text.into().trim().to_string(),
            page,
        }
    }

    /// Checks that quote text is present.
    ///
    /// Book existence is checked by the repository at write time.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("text", &self.text, usize::MAX)
    }
}

/// List row for quote listings and search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteEntry {
    pub quote: Quote,
    pub book_title: String,
    pub book_author: String,
    /// Relevance rank, higher is better. Set only for search results.
    pub rank: Option<f64>,
}
