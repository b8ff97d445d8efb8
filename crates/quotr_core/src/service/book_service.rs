//! Book use-case service.
//!
//! # Responsibility
//! - List an owner's books by recency.
//! - Provide ownership-gated detail (with attached quotes), create, update
//!   and delete.
//!
//! # Invariants
//! - Book detail lists every quote on the book, not only the owner's.
//! - Deleting a book deletes its quotes.

use crate::model::book::{Book, BookDetail, BookDraft, BookId};
use crate::model::page::{Page, PageRequest};
use crate::repo::book_repo::BookRepository;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::{CatalogError, CatalogResult, Missing};
use log::{debug, info};

/// Book service facade over an owner-scoped repository.
pub struct BookService<R: BookRepository, C: Clock = SystemClock> {
    repo: R,
    clock: C,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service stamping records with wall-clock time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, SystemClock)
    }
}

impl<R: BookRepository, C: Clock> BookService<R, C> {
    pub fn with_clock(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Lists one page of the owner's books, most recently modified first.
    pub fn list_books(&self, page: PageRequest) -> CatalogResult<Page<Book>> {
        let total_count = self.repo.count_books()?;
        let window = page
            .window(total_count)
            .ok_or(CatalogError::NotFound(Missing::Page(page.number())))?;
        let items = self.repo.list_books(window)?;

        debug!(
            "event=book_list module=service status=ok owner={} page={} total={total_count} returned={}",
            self.repo.owner(),
            page.number(),
            items.len()
        );
        Ok(Page::new(items, page, total_count))
    }

    pub fn get_book(&self, id: BookId) -> CatalogResult<Book> {
        self.repo
            .get_book(id)?
            .ok_or(CatalogError::NotFound(Missing::Book(id)))
    }

    /// Gets an owned book together with all quotes attached to it.
    pub fn get_book_detail(&self, id: BookId) -> CatalogResult<BookDetail> {
        let book = self.get_book(id)?;
        let quotes = self.repo.list_book_quotes(book.id)?;
        Ok(BookDetail { book, quotes })
    }

    pub fn create_book(&self, draft: &BookDraft) -> CatalogResult<Book> {
        let now = self.clock.now_epoch_ms();
        let id = self.repo.create_book(draft, now)?;
        info!(
            "event=book_create module=service status=ok owner={} book_id={id}",
            self.repo.owner()
        );

        self.repo
            .get_book(id)?
            .ok_or(CatalogError::InconsistentState(
                "created book not found in read-back",
            ))
    }

    /// Replaces title and author of an owned book.
    pub fn update_book(&self, id: BookId, draft: &BookDraft) -> CatalogResult<Book> {
        let now = self.clock.now_epoch_ms();
        self.repo.update_book(id, draft, now)?;
        info!(
            "event=book_update module=service status=ok owner={} book_id={id}",
            self.repo.owner()
        );

        self.repo
            .get_book(id)?
            .ok_or(CatalogError::InconsistentState(
                "updated book not found in read-back",
            ))
    }

    /// Deletes an owned book and, by cascade, its quotes.
    pub fn delete_book(&self, id: BookId) -> CatalogResult<()> {
        self.repo.delete_book(id)?;
        info!(
            "event=book_delete module=service status=ok owner={} book_id={id}",
            self.repo.owner()
        );
        Ok(())
    }
}
