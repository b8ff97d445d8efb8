//! Quote use-case service.
//!
//! # Responsibility
//! - List an owner's quotes by recency, or by relevance when searching.
//! - Provide ownership-gated detail, create, update and delete.
//!
//! # Invariants
//! - All reads and writes go through the owner-scoped repository, and search
//!   is always asked for the repository's owner.
//! - Pages hold at most `PAGE_SIZE` entries.
//! - `create_quote` stamps `created_at = modified_at = now`; `update_quote`
//!   refreshes `modified_at` only.

use crate::model::page::{Page, PageRequest};
use crate::model::quote::{Quote, QuoteDraft, QuoteEntry, QuoteId};
use crate::repo::quote_repo::QuoteRepository;
use crate::search::provider::SearchProvider;
use crate::search::terms::SearchTerms;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::{CatalogError, CatalogResult, Missing};
use log::{debug, info};

/// Quote service facade over an owner-scoped repository and a search provider.
pub struct QuoteService<R: QuoteRepository, S: SearchProvider, C: Clock = SystemClock> {
    repo: R,
    search: S,
    clock: C,
}

impl<R: QuoteRepository, S: SearchProvider> QuoteService<R, S> {
    /// Creates a service stamping records with wall-clock time.
    pub fn new(repo: R, search: S) -> Self {
        Self::with_clock(repo, search, SystemClock)
    }
}

impl<R: QuoteRepository, S: SearchProvider, C: Clock> QuoteService<R, S, C> {
    pub fn with_clock(repo: R, search: S, clock: C) -> Self {
        Self {
            repo,
            search,
            clock,
        }
    }

    /// Lists one page of the owner's quotes.
    ///
    /// Without a search term the order is `modified_at DESC`. With one, only
    /// quotes whose text, book title or book author match every term are
    /// returned, most relevant first.
    ///
    /// # Errors
    /// - `NotFound(Missing::Page)` when `page` is past the last page.
    pub fn list_quotes(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> CatalogResult<Page<QuoteEntry>> {
        let owner = self.repo.owner();
        let terms = SearchTerms::parse(search);

        let (items, total_count) = match terms.as_ref() {
            None => {
                let total_count = self.repo.count_quotes()?;
                let window = page
                    .window(total_count)
                    .ok_or(CatalogError::NotFound(Missing::Page(page.number())))?;
                (self.repo.list_quotes(window)?, total_count)
            }
            Some(terms) => {
                let total_count = self.search.count_matches(owner, terms)?;
                let window = page
                    .window(total_count)
                    .ok_or(CatalogError::NotFound(Missing::Page(page.number())))?;
                (self.search.ranked_quotes(owner, terms, window)?, total_count)
            }
        };

        debug!(
            "event=quote_list module=service status=ok owner={owner} page={} searched={} token_count={} total={total_count} returned={}",
            page.number(),
            terms.is_some(),
            terms.as_ref().map_or(0, |terms| terms.tokens().len()),
            items.len()
        );
        Ok(Page::new(items, page, total_count))
    }

    /// Gets one quote owned by the scoped owner.
    pub fn get_quote(&self, id: QuoteId) -> CatalogResult<Quote> {
        self.repo
            .get_quote(id)?
            .ok_or(CatalogError::NotFound(Missing::Quote(id)))
    }

    /// Creates a quote owned by the scoped owner.
    pub fn create_quote(&self, draft: &QuoteDraft) -> CatalogResult<Quote> {
        let now = self.clock.now_epoch_ms();
        let id = self.repo.create_quote(draft, now)?;
        info!(
            "event=quote_create module=service status=ok owner={} quote_id={id} book_id={} text_chars={}",
            self.repo.owner(),
            draft.book_id,
            draft.text.chars().count()
        );

        self.repo
            .get_quote(id)?
            .ok_or(CatalogError::InconsistentState(
                "created quote not found in read-back",
            ))
    }

    /// Replaces book, text and page of an owned quote.
    pub fn update_quote(&self, id: QuoteId, draft: &QuoteDraft) -> CatalogResult<Quote> {
        let now = self.clock.now_epoch_ms();
        self.repo.update_quote(id, draft, now)?;
        info!(
            "event=quote_update module=service status=ok owner={} quote_id={id}",
            self.repo.owner()
        );

        self.repo
            .get_quote(id)?
            .ok_or(CatalogError::InconsistentState(
                "updated quote not found in read-back",
            ))
    }

    /// Deletes an owned quote.
    pub fn delete_quote(&self, id: QuoteId) -> CatalogResult<()> {
        self.repo.delete_quote(id)?;
        info!(
            "event=quote_delete module=service status=ok owner={} quote_id={id}",
            self.repo.owner()
        );
        Ok(())
    }
}
