mod common;

use common::{books, quotes, register, seed_tiny_catalog, setup, FixedClock};
use quotr_core::{
    BookDraft, CatalogError, Missing, Page, PageRequest, QuoteDraft, QuoteEntry, PAGE_SIZE,
};

#[test]
fn quote_pages_hold_at_most_twenty_entries_in_recency_order() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let book = books(&conn, &tiny, &clock)
        .create_book(&BookDraft::new("Long Book", "Prolific"))
        .unwrap();
    let service = quotes(&conn, &tiny, &clock);
    let mut created = Vec::new();
    for idx in 0..45 {
        clock.advance(1);
        created.push(
            service
                .create_quote(&QuoteDraft::new(book.id, format!("quote number {idx}"), Some(idx)))
                .unwrap()
                .id,
        );
    }
    created.reverse();

    let first = service.list_quotes(None, PageRequest::first()).unwrap();
    assert_eq!(first.items.len(), PAGE_SIZE as usize);
    assert_eq!(first.total_count, 45);
    assert_eq!(first.num_pages, 3);
    assert!(first.has_next);
    assert!(!first.has_previous);

    let third = service.list_quotes(None, PageRequest::new(3)).unwrap();
    assert_eq!(third.items.len(), 5);
    assert!(!third.has_next);

    let mut seen = Vec::new();
    for number in 1..=3 {
        let page = service.list_quotes(None, PageRequest::new(number)).unwrap();
        seen.extend(page.items.into_iter().map(|entry| entry.quote.id));
    }
    assert_eq!(seen, created);
}

#[test]
fn search_results_are_paginated() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let book = books(&conn, &tiny, &clock)
        .create_book(&BookDraft::new("Echoes", "Repeat"))
        .unwrap();
    let service = quotes(&conn, &tiny, &clock);
    for idx in 0..25 {
        clock.advance(1);
        service
            .create_quote(&QuoteDraft::new(book.id, format!("echo {idx}"), None))
            .unwrap();
    }

    let first = service
        .list_quotes(Some("echo"), PageRequest::first())
        .unwrap();
    assert_eq!(first.items.len(), 20);
    assert_eq!(first.total_count, 25);
    let second = service
        .list_quotes(Some("echo"), PageRequest::new(2))
        .unwrap();
    assert_eq!(second.items.len(), 5);
    assert!(second.items.iter().all(|entry| entry.rank.is_some()));
}

#[test]
fn pages_outside_the_result_are_not_found() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let service = quotes(&conn, &tiny, &clock);

    let err = service.list_quotes(None, PageRequest::new(2)).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(Missing::Page(2))));

    let err = service.list_quotes(None, PageRequest::new(0)).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(Missing::Page(0))));

    let err = books(&conn, &tiny, &clock)
        .list_books(PageRequest::new(5))
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn book_pages_hold_at_most_twenty_entries() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let service = books(&conn, &tiny, &clock);
    for idx in 0..21 {
        clock.advance(1);
        service
            .create_book(&BookDraft::new(format!("Volume {idx}"), "Serial"))
            .unwrap();
    }

    let first = service.list_books(PageRequest::first()).unwrap();
    assert_eq!(first.items.len(), 20);
    assert_eq!(first.items[0].title, "Volume 20");
    let second = service.list_books(PageRequest::new(2)).unwrap();
    assert_eq!(second.items.len(), 1);
    assert_eq!(second.items[0].title, "Volume 0");
}

#[test]
fn quote_page_serializes_entries_and_page_metadata() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let (book_id, [first_id, second_id]) = seed_tiny_catalog(&conn, &tiny, &clock);

    let page = quotes(&conn, &tiny, &clock)
        .list_quotes(None, PageRequest::first())
        .unwrap();
    let value = serde_json::to_value(&page).unwrap();

    assert_eq!(value["number"], 1);
    assert_eq!(value["total_count"], 2);
    assert_eq!(value["num_pages"], 1);
    assert_eq!(value["has_previous"], false);
    assert_eq!(value["has_next"], false);

    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["quote"]["id"], second_id);
    assert_eq!(items[0]["quote"]["page"], serde_json::Value::Null);
    assert_eq!(items[0]["rank"], serde_json::Value::Null);
    assert_eq!(items[1]["quote"]["id"], first_id);
    assert_eq!(items[1]["quote"]["book_id"], book_id);
    assert_eq!(items[1]["quote"]["page"], 12);
    assert_eq!(items[1]["book_title"], "The Book");
    assert_eq!(items[1]["book_author"], "An Author");

    let decoded: Page<QuoteEntry> = serde_json::from_value(value).unwrap();
    assert_eq!(decoded, page);
}
