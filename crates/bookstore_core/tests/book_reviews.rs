use bookstore_core::db::open_db_in_memory;
use bookstore_core::{
    Book, BookService, Editorial, EditorialService, RecordKind, Review, ReviewService,
    ServiceError, SqliteBookRepository, SqliteEditorialRepository, SqliteReviewRepository,
};
use rusqlite::Connection;

fn seed_book(conn: &Connection, title: &str, isbn: &str) -> i64 {
    let editorials = EditorialService::new(SqliteEditorialRepository::try_new(conn).unwrap());
    let editorial = editorials
        .create_editorial(&Editorial::new(format!("editorial for {title}")))
        .unwrap();
    let books = BookService::new(SqliteBookRepository::try_new(conn).unwrap());
    books
        .create_book(&Book::new(title, isbn, editorial.id))
        .unwrap()
        .id
}

#[test]
fn create_and_get_scoped_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let book_id = seed_book(&conn, "reviewed book", "978-20");
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    let mut review = Review::new("a sharp debut");
    review.source = Some("El Espectador".to_string());
    review.description = Some("worth reading twice".to_string());
    review.rating = Some(5);

    let created = service.create_review(book_id, &review).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.book_id, book_id);
    assert_eq!(created.name, review.name);
    assert_eq!(created.source, review.source);
    assert_eq!(created.description, review.description);
    assert_eq!(created.rating, review.rating);

    let loaded = service.get_review(book_id, created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn every_operation_requires_the_owning_book() {
    let conn = open_db_in_memory().unwrap();
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    let not_found_book = |err: ServiceError| {
        matches!(
            err,
            ServiceError::NotFound {
                kind: RecordKind::Book,
                id: 4242
            }
        )
    };

    assert!(not_found_book(
        service.create_review(4242, &Review::new("orphan")).unwrap_err()
    ));
    assert!(not_found_book(service.list_reviews(4242).unwrap_err()));
    assert!(not_found_book(service.get_review(4242, 1).unwrap_err()));
    assert!(not_found_book(
        service.update_review(4242, 1, &Review::new("orphan")).unwrap_err()
    ));
    assert!(not_found_book(service.delete_review(4242, 1).unwrap_err()));
}

#[test]
fn cross_owner_review_ids_are_not_found() {
    let conn = open_db_in_memory().unwrap();
    let book_a = seed_book(&conn, "book a", "978-21");
    let book_b = seed_book(&conn, "book b", "978-22");
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    let review_x = service.create_review(book_a, &Review::new("review x")).unwrap();
    let review_y = service.create_review(book_b, &Review::new("review y")).unwrap();

    // A review id owned by another book behaves exactly like an absent id.
    let err = service.get_review(book_a, review_y.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Review,
            ..
        }
    ));

    let err = service
        .update_review(book_a, review_y.id, &Review::new("hijack"))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Review,
            ..
        }
    ));

    let err = service.delete_review(book_a, review_y.id).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Review,
            ..
        }
    ));

    // Both reviews are still intact under their real owners.
    assert_eq!(service.get_review(book_a, review_x.id).unwrap(), review_x);
    assert_eq!(service.get_review(book_b, review_y.id).unwrap(), review_y);
}

#[test]
fn list_reviews_is_scoped_to_the_book() {
    let conn = open_db_in_memory().unwrap();
    let book_a = seed_book(&conn, "popular", "978-23");
    let book_b = seed_book(&conn, "quiet", "978-24");
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    for index in 0..3 {
        service
            .create_review(book_a, &Review::new(format!("review {index}")))
            .unwrap();
    }
    service.create_review(book_b, &Review::new("only one")).unwrap();

    assert_eq!(service.list_reviews(book_a).unwrap().len(), 3);
    assert_eq!(service.list_reviews(book_b).unwrap().len(), 1);
}

#[test]
fn update_review_replaces_fields_and_preserves_identity() {
    let conn = open_db_in_memory().unwrap();
    let book_id = seed_book(&conn, "edited", "978-25");
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    let created = service.create_review(book_id, &Review::new("first take")).unwrap();

    let mut replacement = Review::new("second take");
    replacement.rating = Some(3);
    let updated = service
        .update_review(book_id, created.id, &replacement)
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.book_id, book_id);
    assert_eq!(updated.name, "second take");
    assert_eq!(updated.rating, Some(3));
}

#[test]
fn delete_review_removes_only_the_scoped_record() {
    let conn = open_db_in_memory().unwrap();
    let book_id = seed_book(&conn, "pruned", "978-26");
    let service = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());

    let keep = service.create_review(book_id, &Review::new("keep")).unwrap();
    let remove = service.create_review(book_id, &Review::new("remove")).unwrap();

    service.delete_review(book_id, remove.id).unwrap();
    let err = service.get_review(book_id, remove.id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));

    assert_eq!(service.get_review(book_id, keep.id).unwrap(), keep);
}

#[test]
fn deleting_a_book_removes_its_reviews() {
    let conn = open_db_in_memory().unwrap();
    let book_id = seed_book(&conn, "ephemeral", "978-27");

    let reviews = ReviewService::new(SqliteReviewRepository::try_new(&conn).unwrap());
    reviews.create_review(book_id, &Review::new("soon gone")).unwrap();

    let books = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    books.delete_book(book_id).unwrap();

    let orphan_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM reviews WHERE book_id = ?1;",
            [book_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphan_count, 0);
}
