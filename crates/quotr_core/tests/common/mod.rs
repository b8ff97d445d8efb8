#![allow(dead_code)]

use quotr_core::db::open_db_in_memory;
use quotr_core::{
    AccountService, BookDraft, BookService, Clock, Fts5SearchProvider, Principal, QuoteDraft,
    QuoteService, SqliteBookRepository, SqliteQuoteRepository, SqliteUserRepository,
};
use rusqlite::Connection;
use std::cell::Cell;

pub type TestBookService<'c> = BookService<SqliteBookRepository<'c>, &'c FixedClock>;
pub type TestQuoteService<'c> =
    QuoteService<SqliteQuoteRepository<'c>, Fts5SearchProvider<'c>, &'c FixedClock>;

/// Manually driven clock for timestamp assertions.
pub struct FixedClock(Cell<i64>);

impl FixedClock {
    pub fn new(start: i64) -> Self {
        Self(Cell::new(start))
    }

    pub fn set(&self, value: i64) {
        self.0.set(value);
    }

    pub fn advance(&self, delta_ms: i64) -> i64 {
        self.0.set(self.0.get() + delta_ms);
        self.0.get()
    }
}

impl Clock for FixedClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0.get()
    }
}

pub fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

pub fn register(conn: &Connection, username: &str) -> Principal {
    let accounts = AccountService::new(SqliteUserRepository::try_new(conn).unwrap());
    accounts.register_user(username).unwrap();
    accounts.resolve_principal(username).unwrap().unwrap()
}

pub fn books<'c>(
    conn: &'c Connection,
    principal: &Principal,
    clock: &'c FixedClock,
) -> TestBookService<'c> {
    BookService::with_clock(
        SqliteBookRepository::try_new(conn, principal).unwrap(),
        clock,
    )
}

pub fn quotes<'c>(
    conn: &'c Connection,
    principal: &Principal,
    clock: &'c FixedClock,
) -> TestQuoteService<'c> {
    QuoteService::with_clock(
        SqliteQuoteRepository::try_new(conn, principal).unwrap(),
        Fts5SearchProvider::try_new(conn).unwrap(),
        clock,
    )
}

/// Seeds one book with two quotes, each one clock tick apart.
///
/// Returns `(book_id, [first_quote_id, second_quote_id])`.
pub fn seed_tiny_catalog(
    conn: &Connection,
    principal: &Principal,
    clock: &FixedClock,
) -> (i64, [i64; 2]) {
    let book = books(conn, principal, clock)
        .create_book(&BookDraft::new("The Book", "An Author"))
        .unwrap();
    let quote_service = quotes(conn, principal, clock);
    clock.advance(1_000);
    let first = quote_service
        .create_quote(&QuoteDraft::new(
            book.id,
            "There's a thing that they said",
            Some(12),
        ))
        .unwrap();
    clock.advance(1_000);
    let second = quote_service
        .create_quote(&QuoteDraft::new(
            book.id,
            "There's another thing that they said",
            None,
        ))
        .unwrap();
    (book.id, [first.id, second.id])
}
