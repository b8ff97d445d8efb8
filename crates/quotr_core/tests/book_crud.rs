mod common;

use common::{books, quotes, register, seed_tiny_catalog, setup, FixedClock};
use quotr_core::{BookDraft, CatalogError, Missing, PageRequest, QuoteDraft, ValidationError};

#[test]
fn create_and_get_book() {
    let conn = setup();
    let clock = FixedClock::new(10);
    let tiny = register(&conn, "tiny");
    let service = books(&conn, &tiny, &clock);

    let created = service
        .create_book(&BookDraft::new(" Dune ", "Frank Herbert"))
        .unwrap();
    assert_eq!(created.title, "Dune");
    assert_eq!(created.owner_id, tiny.user_id());
    assert_eq!(created.created_at, 10);
    assert_eq!(created.modified_at, 10);

    assert_eq!(service.get_book(created.id).unwrap(), created);
}

#[test]
fn update_book_refreshes_modified_and_keeps_owner() {
    let conn = setup();
    let clock = FixedClock::new(10);
    let tiny = register(&conn, "tiny");
    let service = books(&conn, &tiny, &clock);
    let created = service
        .create_book(&BookDraft::new("Dune", "Herbert"))
        .unwrap();

    clock.set(500);
    let updated = service
        .update_book(created.id, &BookDraft::new("Dune Messiah", "Frank Herbert"))
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.author, "Frank Herbert");
    assert_eq!(updated.owner_id, created.owner_id);
    assert_eq!(updated.created_at, 10);
    assert_eq!(updated.modified_at, 500);
}

#[test]
fn update_book_rejects_blank_title() {
    let conn = setup();
    let clock = FixedClock::new(10);
    let tiny = register(&conn, "tiny");
    let service = books(&conn, &tiny, &clock);
    let created = service
        .create_book(&BookDraft::new("Dune", "Herbert"))
        .unwrap();

    let err = service
        .update_book(created.id, &BookDraft::new("", "Herbert"))
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::Validation(ValidationError::Blank { field: "title" })
    ));
    assert_eq!(service.get_book(created.id).unwrap().title, "Dune");
}

#[test]
fn rejected_book_update_leaves_no_open_transaction() {
    let conn = setup();
    let clock = FixedClock::new(10);
    let tiny = register(&conn, "tiny");
    let other = register(&conn, "other");
    let service = books(&conn, &tiny, &clock);
    let created = service
        .create_book(&BookDraft::new("Dune", "Herbert"))
        .unwrap();

    service
        .update_book(created.id, &BookDraft::new("Dune", ""))
        .unwrap_err();
    assert!(conn.is_autocommit());
    assert!(books(&conn, &other, &clock)
        .update_book(created.id, &BookDraft::new("Stolen", "Thief"))
        .unwrap_err()
        .is_not_found());
    assert!(conn.is_autocommit());

    clock.advance(5);
    let updated = service
        .update_book(created.id, &BookDraft::new("Dune Messiah", "Herbert"))
        .unwrap();
    assert_eq!(updated.title, "Dune Messiah");
    assert_eq!(updated.modified_at, 15);
}

#[test]
fn book_detail_lists_attached_quotes() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let (book_id, [first, second]) = seed_tiny_catalog(&conn, &tiny, &clock);

    let detail = books(&conn, &tiny, &clock).get_book_detail(book_id).unwrap();
    assert_eq!(detail.book.id, book_id);
    let ids: Vec<_> = detail.quotes.iter().map(|quote| quote.id).collect();
    assert_eq!(ids, vec![first, second]);
}

#[test]
fn book_detail_includes_quotes_owned_by_other_users() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let other = register(&conn, "other");
    let (book_id, _) = seed_tiny_catalog(&conn, &tiny, &clock);

    let foreign = quotes(&conn, &other, &clock)
        .create_quote(&QuoteDraft::new(book_id, "Borrowed words", None))
        .unwrap();
    assert_eq!(foreign.owner_id, other.user_id());

    let detail = books(&conn, &tiny, &clock).get_book_detail(book_id).unwrap();
    assert_eq!(detail.quotes.len(), 3);
    assert!(detail.quotes.iter().any(|quote| quote.id == foreign.id));

    // The quote stays private to its owner in quote listings.
    let tiny_quotes = quotes(&conn, &tiny, &clock)
        .list_quotes(None, PageRequest::first())
        .unwrap();
    assert!(tiny_quotes
        .items
        .iter()
        .all(|entry| entry.quote.id != foreign.id));
}

#[test]
fn deleting_book_cascades_to_quotes() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let (book_id, [first, second]) = seed_tiny_catalog(&conn, &tiny, &clock);
    let keep = books(&conn, &tiny, &clock)
        .create_book(&BookDraft::new("Other Book", "Someone"))
        .unwrap();
    let kept_quote = quotes(&conn, &tiny, &clock)
        .create_quote(&QuoteDraft::new(keep.id, "still here", None))
        .unwrap();

    books(&conn, &tiny, &clock).delete_book(book_id).unwrap();

    let quote_service = quotes(&conn, &tiny, &clock);
    for id in [first, second] {
        assert!(matches!(
            quote_service.get_quote(id).unwrap_err(),
            CatalogError::NotFound(Missing::Quote(_))
        ));
    }
    let remaining: i64 = conn
        .query_row("SELECT COUNT(*) FROM quotes WHERE book_id = ?1;", [book_id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(remaining, 0);
    assert_eq!(quote_service.get_quote(kept_quote.id).unwrap(), kept_quote);

    let err = books(&conn, &tiny, &clock).get_book(book_id).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(Missing::Book(id)) if id == book_id));
}

#[test]
fn list_books_orders_by_most_recently_modified() {
    let conn = setup();
    let clock = FixedClock::new(0);
    let tiny = register(&conn, "tiny");
    let service = books(&conn, &tiny, &clock);

    let first = service.create_book(&BookDraft::new("First", "A")).unwrap();
    clock.advance(10);
    let second = service.create_book(&BookDraft::new("Second", "B")).unwrap();
    clock.advance(10);
    service
        .update_book(first.id, &BookDraft::new("First (revised)", "A"))
        .unwrap();

    let page = service.list_books(PageRequest::first()).unwrap();
    let ids: Vec<_> = page.items.iter().map(|book| book.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}
