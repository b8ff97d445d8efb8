//! Book domain model.
//!
//! # Invariants
//! - `owner_id` is assigned at creation and never rewritten.
//! - `modified_at >= created_at` for records written through services.

use crate::model::quote::Quote;
use crate::model::user::UserId;
use crate::model::validation::{check_required, ValidationError};
use serde::{Deserialize, Serialize};

/// Storage identifier of a book row.
pub type BookId = i64;

pub const BOOK_TITLE_MAX_CHARS: usize = 200;
pub const BOOK_AUTHOR_MAX_CHARS: usize = 200;

/// Persisted book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub owner_id: UserId,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed on every update.
    pub modified_at: i64,
}

/// User-editable book fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
}

impl BookDraft {
    /// Builds a draft with surrounding whitespace stripped.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            author: author.into().trim().to_string(),
        }
    }

    /// Checks required fields and length limits.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_required("title", &self.title, BOOK_TITLE_MAX_CHARS)?;
        check_required("author", &self.author, BOOK_AUTHOR_MAX_CHARS)?;
        Ok(())
    }
}

/// Book detail projection: the book plus every quote attached to it.
///
/// `quotes` is not filtered by quote owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetail {
    pub book: Book,
    pub quotes: Vec<Quote>,
}
