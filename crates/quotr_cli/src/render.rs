//! Text and JSON presentation of catalog records.

use quotr_core::{Book, BookDetail, Page, Quote, QuoteEntry};
use serde::Serialize;
use std::fmt::Write as _;

const EXCERPT_CHARS: usize = 80;

pub fn json<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn quote_page(page: &Page<QuoteEntry>, searched: bool) -> String {
    if page.is_empty() {
        let placeholder = if searched {
            "No quotes match your search."
        } else {
            "No quotes yet."
        };
        return placeholder.to_string();
    }

    let mut out = String::new();
    for entry in &page.items {
        let _ = writeln!(
            out,
            "#{:<5} {}\n       {} ({}){}",
            entry.quote.id,
            entry.quote.excerpt(EXCERPT_CHARS),
            entry.book_title,
            entry.book_author,
            page_suffix(entry.quote.page)
        );
    }
    out.push_str(&page_footer(page, "quote"));
    out
}

pub fn book_page(page: &Page<Book>) -> String {
    if page.is_empty() {
        return "No books yet.".to_string();
    }

    let mut out = String::new();
    for book in &page.items {
        let _ = writeln!(out, "#{:<5} {} by {}", book.id, book.title, book.author);
    }
    out.push_str(&page_footer(page, "book"));
    out
}

pub fn quote(quote: &Quote) -> String {
    format!(
        "#{} (book #{}){}\n\n{}",
        quote.id,
        quote.book_id,
        page_suffix(quote.page),
        quote.text
    )
}

pub fn book(book: &Book) -> String {
    format!("#{} {} by {}", book.id, book.title, book.author)
}

pub fn book_detail(detail: &BookDetail) -> String {
    let mut out = book(&detail.book);
    if detail.quotes.is_empty() {
        out.push_str("\n\nNo quotes yet.");
        return out;
    }
    out.push('\n');
    for quote in &detail.quotes {
        let _ = write!(
            out,
            "\n#{:<5} {}{}",
            quote.id,
            quote.excerpt(EXCERPT_CHARS),
            page_suffix(quote.page)
        );
    }
    out
}

fn page_suffix(page: Option<u32>) -> String {
    page.map(|number| format!(", p. {number}"))
        .unwrap_or_default()
}

fn page_footer<T>(page: &Page<T>, noun: &str) -> String {
    let plural = if page.total_count == 1 { "" } else { "s" };
    format!(
        "page {}/{} ({} {noun}{plural})",
        page.number, page.num_pages, page.total_count
    )
}

#[cfg(test)]
mod tests {
    use super::{book_page, quote_page};
    use quotr_core::{Book, Page, PageRequest, Quote, QuoteEntry};

    fn entry() -> QuoteEntry {
        QuoteEntry {
            quote: Quote {
                id: 1,
                book_id: 1,
                text: "There's a thing\nthat they said".to_string(),
                page: Some(567),
                owner_id: 1,
                created_at: 0,
                modified_at: 0,
            },
            book_title: "The Book".to_string(),
            book_author: "An Author".to_string(),
            rank: None,
        }
    }

    #[test]
    fn empty_pages_render_placeholders() {
        let quotes: Page<QuoteEntry> = Page::new(Vec::new(), PageRequest::first(), 0);
        assert_eq!(quote_page(&quotes, false), "No quotes yet.");
        assert_eq!(quote_page(&quotes, true), "No quotes match your search.");

        let books: Page<Book> = Page::new(Vec::new(), PageRequest::first(), 0);
        assert_eq!(book_page(&books), "No books yet.");
    }

    #[test]
    fn quote_rows_show_excerpt_book_and_page() {
        let page = Page::new(vec![entry()], PageRequest::first(), 1);
        let text = quote_page(&page, false);
        assert!(text.contains("There's a thing that they said"));
        assert!(text.contains("The Book (An Author), p. 567"));
        assert!(text.ends_with("page 1/1 (1 quote)"));
    }
}
