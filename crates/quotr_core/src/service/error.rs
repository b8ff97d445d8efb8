//! Catalog-level error contract.

use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use crate::search::provider::SearchError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatalogResult<T> = Result<T, CatalogError>;

/// What a NotFound refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    Book(i64),
    Quote(i64),
    /// Requested page number is outside the result.
    Page(u32),
}

/// Service error for catalog use-cases.
#[derive(Debug)]
pub enum CatalogError {
    /// Target is absent or owned by someone else; the two are never told apart.
    NotFound(Missing),
    /// Create/update/search input was rejected.
    Validation(ValidationError),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Search-engine failure.
    Search(SearchError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl CatalogError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(Missing::Book(id)) => write!(f, "book not found: {id}"),
            Self::NotFound(Missing::Quote(id)) => write!(f, "quote not found: {id}"),
            Self::NotFound(Missing::Page(number)) => write!(f, "page not found: {number}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Search(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent catalog state: {details}"),
        }
    }
}

impl Error for CatalogError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Search(err) => Some(err),
            Self::NotFound(_) | Self::InconsistentState(_) => None,
        }
    }
}

impl From<RepoError> for CatalogError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity: "book", id } => Self::NotFound(Missing::Book(id)),
            RepoError::NotFound { entity: "quote", id } => Self::NotFound(Missing::Quote(id)),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SearchError> for CatalogError {
    fn from(value: SearchError) -> Self {
        Self::Search(value)
    }
}
