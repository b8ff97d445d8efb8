//! SQLite FTS5-based quote search.
//!
//! # Responsibility
//! - Match search terms against `quotes_fts` (quote text, book title, book
//!   author) with porter-stemmed tokenization.
//! - Rank hits by `bm25` and page through them.
//!
//! # Invariants
//! - Only quotes owned by the requested owner are counted or returned.
//! - Result ordering is deterministic: rank, then `modified_at DESC, id DESC`.

use crate::db::DbError;
use crate::model::page::PageWindow;
use crate::model::quote::QuoteEntry;
use crate::model::user::UserId;
use crate::repo::ensure_tables;
use crate::repo::quote_repo::{parse_quote_entry_row, QUOTE_COLUMNS_SQL};
use crate::search::provider::{SearchError, SearchProvider, SearchResult};
use crate::search::terms::SearchTerms;
use rusqlite::{params, Connection};

/// FTS5-backed [`SearchProvider`].
pub struct Fts5SearchProvider<'conn> {
    conn: &'conn Connection,
}

impl<'conn> Fts5SearchProvider<'conn> {
    pub fn try_new(conn: &'conn Connection) -> SearchResult<Self> {
        ensure_tables(conn, &["quotes", "books", "quotes_fts"])?;
        Ok(Self { conn })
    }
}

impl SearchProvider for Fts5SearchProvider<'_> {
    fn count_matches(&self, owner: UserId, terms: &SearchTerms) -> SearchResult<u64> {
        let Some(match_expr) = build_match_expression(terms) else {
            return Ok(0);
        };

        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*)
                 FROM quotes_fts
                 JOIN quotes q ON q.id = quotes_fts.rowid
                 WHERE quotes_fts MATCH ?1
                   AND q.owner_id = ?2;",
                params![match_expr.as_str(), owner],
                |row| row.get(0),
            )
            .map_err(|err| map_query_error(err, &match_expr))?;

        u64::try_from(count)
            .map_err(|_| SearchError::InvalidData(format!("negative match count `{count}`")))
    }

    fn ranked_quotes(
        &self,
        owner: UserId,
        terms: &SearchTerms,
        window: PageWindow,
    ) -> SearchResult<Vec<QuoteEntry>> {
        let Some(match_expr) = build_match_expression(terms) else {
            return Ok(Vec::new());
        };
        let offset = i64::try_from(window.offset)
            .map_err(|_| SearchError::InvalidData(format!("offset out of range: {}", window.offset)))?;

        let mut stmt = self.conn.prepare(&format!(
            "SELECT
                {QUOTE_COLUMNS_SQL},
                b.title AS book_title,
                b.author AS book_author,
                bm25(quotes_fts) AS score
             FROM quotes_fts
             JOIN quotes q ON q.id = quotes_fts.rowid
             JOIN books b ON b.id = q.book_id
             WHERE quotes_fts MATCH ?1
               AND q.owner_id = ?2
             ORDER BY score ASC, q.modified_at DESC, q.id DESC
             LIMIT ?3 OFFSET ?4;"
        ))?;

        let mut rows = stmt
            .query(params![match_expr.as_str(), owner, window.limit, offset])
            .map_err(|err| map_query_error(err, &match_expr))?;
        let mut entries = Vec::new();

        while let Some(row) = rows
            .next()
            .map_err(|err| map_query_error(err, &match_expr))?
        {
            // bm25 scores are lower-is-better; expose higher-is-better.
            let score: f64 = row.get("score")?;
            entries.push(parse_quote_entry_row(row, Some(-score))?);
        }

        Ok(entries)
    }
}

/// Builds an FTS5 expression requiring every token, each as a quoted string.
fn build_match_expression(terms: &SearchTerms) -> Option<String> {
    if terms.is_empty() {
        return None;
    }

    let expr = terms
        .tokens()
        .iter()
        .map(|token| escape_fts_term(token))
        .collect::<Vec<_>>()
        .join(" AND ");
    Some(expr)
}

fn escape_fts_term(raw: &str) -> String {
    let escaped = raw.replace('"', "\"\"");
    format!("\"{escaped}\"")
}

fn map_query_error(err: rusqlite::Error, query: &str) -> SearchError {
    if is_match_syntax_error(&err) {
        return SearchError::InvalidQuery {
            query: query.to_string(),
            message: err.to_string(),
        };
    }

    SearchError::Db(DbError::Sqlite(err))
}

fn is_match_syntax_error(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(_, Some(message)) => {
            let msg = message.to_lowercase();
            (msg.contains("fts5") && msg.contains("syntax"))
                || msg.contains("malformed match expression")
                || msg.contains("unterminated")
        }
        _ => false,
    }
}
