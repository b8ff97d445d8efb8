//! Quote repository contracts and owner-scoped SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD and recency listing over `quotes` for a single owner.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Every statement is constrained by `owner_id = <scoped owner>`.
//! - Writes call `QuoteDraft::validate()` before SQL mutations.
//! - Not-owned rows are indistinguishable from missing rows.
//! - Quote writes accept any existing book, whoever owns it.

use crate::model::book::BookId;
use crate::model::page::PageWindow;
use crate::model::quote::{Quote, QuoteDraft, QuoteEntry, QuoteId};
use crate::model::user::{Principal, UserId};
use crate::model::validation::ValidationError;
use crate::repo::{count_to_u64, ensure_tables, RepoError, RepoResult};
use rusqlite::{params, Connection, Row};

pub(crate) const QUOTE_COLUMNS_SQL: &str = "q.id AS id,
    q.book_id AS book_id,
    q.text AS text,
    q.page AS page,
    q.owner_id AS owner_id,
    q.created_at AS created_at,
    q.modified_at AS modified_at";

/// Repository interface for quote operations scoped to one owner.
pub trait QuoteRepository {
    /// Owner every operation is scoped to.
    fn owner(&self) -> UserId;
    fn create_quote(&self, draft: &QuoteDraft, now: i64) -> RepoResult<QuoteId>;
    /// Replaces book, text and page and sets `modified_at = now`.
    fn update_quote(&self, id: QuoteId, draft: &QuoteDraft, now: i64) -> RepoResult<()>;
    fn get_quote(&self, id: QuoteId) -> RepoResult<Option<Quote>>;
    fn count_quotes(&self) -> RepoResult<u64>;
    /// Lists quotes by `modified_at DESC, id DESC`.
    fn list_quotes(&self, window: PageWindow) -> RepoResult<Vec<QuoteEntry>>;
    fn delete_quote(&self, id: QuoteId) -> RepoResult<()>;
}

/// SQLite-backed quote repository bound to one owner.
pub struct SqliteQuoteRepository<'conn> {
    conn: &'conn Connection,
    owner: UserId,
}

impl<'conn> SqliteQuoteRepository<'conn> {
    /// Constructs a repository scoped to `principal`.
    pub fn try_new(conn: &'conn Connection, principal: &Principal) -> RepoResult<Self> {
        ensure_tables(conn, &["books", "quotes"])?;
        Ok(Self {
            conn,
            owner: principal.user_id(),
        })
    }
}

impl QuoteRepository for SqliteQuoteRepository<'_> {
    fn owner(&self) -> UserId {
        self.owner
    }

    fn create_quote(&self, draft: &QuoteDraft, now: i64) -> RepoResult<QuoteId> {
        draft.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO quotes (book_id, text, page, owner_id, created_at, modified_at)
             SELECT ?1, ?2, ?3, ?4, ?5, ?5
             WHERE EXISTS (SELECT 1 FROM books WHERE id = ?1);",
            params![
                draft.book_id,
                draft.text.as_str(),
                draft.page,
                self.owner,
                now
            ],
        )?;

        if inserted == 0 {
            return Err(ValidationError::UnknownBook(draft.book_id).into());
        }

        Ok(self.conn.last_insert_rowid())
    }

    fn update_quote(&self, id: QuoteId, draft: &QuoteDraft, now: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        if !quote_visible(&tx, id, self.owner)? {
            return Err(RepoError::NotFound { entity: "quote", id });
        }
        draft.validate()?;
        if !book_exists(&tx, draft.book_id)? {
            return Err(ValidationError::UnknownBook(draft.book_id).into());
        }

        tx.execute(
            "UPDATE quotes
             SET
                book_id = ?3,
                text = ?4,
                page = ?5,
                modified_at = ?6
             WHERE id = ?1
               AND owner_id = ?2;",
            params![
                id,
                self.owner,
                draft.book_id,
                draft.text.as_str(),
                draft.page,
                now
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn get_quote(&self, id: QuoteId) -> RepoResult<Option<Quote>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {QUOTE_COLUMNS_SQL}
             FROM quotes q
             WHERE q.id = ?1
               AND q.owner_id = ?2;"
        ))?;

        let mut rows = stmt.query(params![id, self.owner])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_quote_row(row)?));
        }

        Ok(None)
    }

    fn count_quotes(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM quotes WHERE owner_id = ?1;",
            [self.owner],
            |row| row.get(0),
        )?;
        count_to_u64(count, "quotes")
    }

    fn list_quotes(&self, window: PageWindow) -> RepoResult<Vec<QuoteEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT
                {QUOTE_COLUMNS_SQL},
                b.title AS book_title,
                b.author AS book_author
             FROM quotes q
             JOIN books b ON b.id = q.book_id
             WHERE q.owner_id = ?1
             ORDER BY q.modified_at DESC, q.id DESC
             LIMIT ?2 OFFSET ?3;"
        ))?;

        let offset = i64::try_from(window.offset)
            .map_err(|_| RepoError::InvalidData(format!("offset out of range: {}", window.offset)))?;
        let mut rows = stmt.query(params![self.owner, window.limit, offset])?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next()? {
            entries.push(parse_quote_entry_row(row, None)?);
        }

        Ok(entries)
    }

    fn delete_quote(&self, id: QuoteId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM quotes WHERE id = ?1 AND owner_id = ?2;",
            params![id, self.owner],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound { entity: "quote", id });
        }

        Ok(())
    }
}

/// Decodes a row selected with [`QUOTE_COLUMNS_SQL`].
pub(crate) fn parse_quote_row(row: &Row<'_>) -> RepoResult<Quote> {
    let page = match row.get::<_, Option<i64>>("page")? {
        Some(value) => Some(u32::try_from(value).map_err(|_| {
            RepoError::InvalidData(format!("invalid page value `{value}` in quotes.page"))
        })?),
        None => None,
    };

    Ok(Quote {
        id: row.get("id")?,
        book_id: row.get("book_id")?,
        text: row.get("text")?,
        page,
        owner_id: row.get("owner_id")?,
        created_at: row.get("created_at")?,
        modified_at: row.get("modified_at")?,
    })
}

/// Decodes a quote row joined with `book_title`/`book_author` columns.
pub(crate) fn parse_quote_entry_row(row: &Row<'_>, rank: Option<f64>) -> RepoResult<QuoteEntry> {
    Ok(QuoteEntry {
        quote: parse_quote_row(row)?,
        book_title: row.get("book_title")?,
        book_author: row.get("book_author")?,
        rank,
    })
}

fn quote_visible(conn: &Connection, id: QuoteId, owner: UserId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM quotes WHERE id = ?1 AND owner_id = ?2);",
        params![id, owner],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn book_exists(conn: &Connection, book_id: BookId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM books WHERE id = ?1);",
        [book_id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
