//! Search provider contract and its error type.

use crate::db::DbError;
use crate::model::page::PageWindow;
use crate::model::quote::QuoteEntry;
use crate::model::user::UserId;
use crate::repo::RepoError;
use crate::search::terms::SearchTerms;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for query execution and result decoding.
#[derive(Debug)]
pub enum SearchError {
    /// The engine rejected the generated match expression.
    InvalidQuery {
        query: String,
        message: String,
    },
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidQuery { query, message } => {
                write!(f, "invalid full-text query `{query}`: {message}")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidQuery { .. } => None,
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            RepoError::InvalidData(message) => Self::InvalidData(message),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Ranked text search over an owner's quotes.
///
/// Implementations match `terms` against a combined index of quote text,
/// book title and book author, and must never return quotes owned by anyone
/// other than `owner`.
pub trait SearchProvider {
    /// Counts the owner's quotes matching every term.
    fn count_matches(&self, owner: UserId, terms: &SearchTerms) -> SearchResult<u64>;

    /// Returns one window of matching quotes, most relevant first.
    ///
    /// Every returned entry carries `rank: Some(_)`, higher meaning more
    /// relevant.
    fn ranked_quotes(
        &self,
        owner: UserId,
        terms: &SearchTerms,
        window: PageWindow,
    ) -> SearchResult<Vec<QuoteEntry>>;
}
