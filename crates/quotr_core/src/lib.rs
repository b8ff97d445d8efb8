//! Core domain logic for the quotr book-quotes catalog.
//! This crate is the single source of truth for ownership scoping, search and
//! pagination rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookDetail, BookDraft, BookId};
pub use model::page::{Page, PageRequest, PageWindow, PAGE_SIZE};
pub use model::quote::{Quote, QuoteDraft, QuoteEntry, QuoteId};
pub use model::user::{Principal, User, UserId};
pub use model::validation::ValidationError;
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::quote_repo::{QuoteRepository, SqliteQuoteRepository};
pub use repo::user_repo::{SqliteUserRepository, UserRepository};
pub use repo::{RepoError, RepoResult};
pub use search::fts::Fts5SearchProvider;
pub use search::provider::{SearchError, SearchProvider, SearchResult};
pub use search::terms::SearchTerms;
pub use service::account_service::AccountService;
pub use service::book_service::BookService;
pub use service::clock::{Clock, SystemClock};
pub use service::error::{CatalogError, CatalogResult, Missing};
pub use service::quote_service::QuoteService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
