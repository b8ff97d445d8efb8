//! Book repository contracts and owner-scoped SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and recency listing over `books` for a single owner.
//! - Load the quotes attached to an owned book for detail views.
//!
//! # Invariants
//! - Every `books` statement is constrained by `owner_id = <scoped owner>`.
//! - Deleting a book removes its quotes through `ON DELETE CASCADE`.
//! - Attached quotes are listed regardless of their own owner.

use crate::model::book::{Book, BookDraft, BookId};
use crate::model::page::PageWindow;
use crate::model::quote::Quote;
use crate::model::user::{Principal, UserId};
use crate::repo::quote_repo::{parse_quote_row, QUOTE_COLUMNS_SQL};
use crate::repo::{count_to_u64, ensure_tables, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    owner_id,
    created_at,
    modified_at
FROM books";

/// Repository interface for book operations scoped to one owner.
pub trait BookRepository {
    /// Owner every operation is scoped to.
    fn owner(&self) -> UserId;
    fn create_book(&self, draft: &BookDraft, now: i64) -> RepoResult<BookId>;
    /// Replaces title and author and sets `modified_at = now`.
    fn update_book(&self, id: BookId, draft: &BookDraft, now: i64) -> RepoResult<()>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn count_books(&self) -> RepoResult<u64>;
    /// Lists books by `modified_at DESC, id DESC`.
    fn list_books(&self, window: PageWindow) -> RepoResult<Vec<Book>>;
    /// Lists every quote on `book_id` ordered by id, whoever owns the quote.
    ///
    /// Callers must check visibility of `book_id` first.
    fn list_book_quotes(&self, book_id: BookId) -> RepoResult<Vec<Quote>>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
}

/// SQLite-backed book repository bound to one owner.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
    owner: UserId,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository scoped to `principal`.
    pub fn try_new(conn: &'conn Connection, principal: &Principal) -> RepoResult<Self> {
        ensure_tables(conn, &["books", "quotes"])?;
        Ok(Self {
            conn,
            owner: principal.user_id(),
        })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn owner(&self) -> UserId {
        self.owner
    }

    fn create_book(&self, draft: &BookDraft, now: i64) -> RepoResult<BookId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO books (title, author, owner_id, created_at, modified_at)
             VALUES (?1, ?2, ?3, ?4, ?4);",
            params![draft.title.as_str(), draft.author.as_str(), self.owner, now],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_book(&self, id: BookId, draft: &BookDraft, now: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        if !book_visible(&tx, id, self.owner)? {
            return Err(RepoError::NotFound { entity: "book", id });
        }
        draft.validate()?;

        tx.execute(
            "UPDATE books
             SET
                title = ?3,
                author = ?4,
                modified_at = ?5
             WHERE id = ?1
               AND owner_id = ?2;",
            params![
                id,
                self.owner,
                draft.title.as_str(),
                draft.author.as_str(),
                now
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE id = ?1 AND owner_id = ?2;"),
                params![id, self.owner],
                parse_book_row,
            )
            .optional()?;
        Ok(book)
    }

    fn count_books(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE owner_id = ?1;",
            [self.owner],
            |row| row.get(0),
        )?;
        count_to_u64(count, "books")
    }

    fn list_books(&self, window: PageWindow) -> RepoResult<Vec<Book>> {
        let offset = i64::try_from(window.offset)
            .map_err(|_| RepoError::InvalidData(format!("offset out of range: {}", window.offset)))?;
        let mut stmt = self.conn.prepare(&format!(
            "{BOOK_SELECT_SQL}
             WHERE owner_id = ?1
             ORDER BY modified_at DESC, id DESC
             LIMIT ?2 OFFSET ?3;"
        ))?;

        let books = stmt
            .query_map(params![self.owner, window.limit, offset], parse_book_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    fn list_book_quotes(&self, book_id: BookId) -> RepoResult<Vec<Quote>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUOTE_COLUMNS_SQL}
             FROM quotes q
             WHERE q.book_id = ?1
             ORDER BY q.id ASC;"
        ))?;

        let mut rows = stmt.query([book_id])?;
        let mut quotes = Vec::new();
        while let Some(row) = rows.next()? {
            quotes.push(parse_quote_row(row)?);
        }

        Ok(quotes)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM books WHERE id = ?1 AND owner_id = ?2;",
            params![id, self.owner],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "book", id });
        }

        Ok(())
    }
}

fn book_visible(conn: &Connection, id: BookId, owner: UserId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1 AND owner_id = ?2);",
        params![id, owner],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_book_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        author: row.get("author")?,
        owner_id: row.get("owner_id")?,
        created_at: row.get("created_at")?,
        modified_at: row.get("modified_at")?,
    })
}
