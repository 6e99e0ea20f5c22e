use bookstore_core::db::open_db_in_memory;
use bookstore_core::{
    Author, AuthorService, Book, BookService, Editorial, EditorialService, Publisher,
    PublisherService, RecordKind, RepoError, ServiceError, SqliteAuthorRepository,
    SqliteBookRepository, SqliteEditorialRepository, SqlitePublisherRepository, ValidationError,
};
use rusqlite::Connection;

fn seed_editorial(conn: &Connection, name: &str) -> i64 {
    let service = EditorialService::new(SqliteEditorialRepository::try_new(conn).unwrap());
    service.create_editorial(&Editorial::new(name)).unwrap().id
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Norma");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let mut book = Book::new("La vorágine", "978-9580600135", editorial_id);
    book.description = Some("Novela de la selva".to_string());
    book.image = Some("voragine.png".to_string());
    book.publishing_date = Some(-1_388_534_400_000);

    let created = service.create_book(&book).unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, book.title);
    assert_eq!(created.isbn, book.isbn);
    assert_eq!(created.description, book.description);
    assert_eq!(created.image, book.image);
    assert_eq!(created.publishing_date, book.publishing_date);
    assert_eq!(created.editorial_id, Some(editorial_id));

    let loaded = service.get_book(created.id).unwrap();
    assert_eq!(loaded, created);
}

#[test]
fn create_rejects_blank_isbn() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Planeta");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let err = service
        .create_book(&Book::new("untitled", "  ", editorial_id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyIsbn)
    ));
}

#[test]
fn create_requires_existing_editorial() {
    let conn = open_db_in_memory().unwrap();
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let mut detached = Book::new("orphan", "978-1", 4242);
    let err = service.create_book(&detached).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));

    detached.editorial_id = None;
    let err = service.create_book(&detached).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
}

#[test]
fn publisher_link_is_one_to_one() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Alfaguara");
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(&conn).unwrap());
    let publisher = publishers
        .create_publisher(&Publisher::new("Calle Luna Press", "Cra 7 # 1-23, Bogotá"))
        .unwrap();

    let books = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let mut first = Book::new("first", "978-2", editorial_id);
    first.publisher_id = Some(publisher.id);
    let first = books.create_book(&first).unwrap();

    let attached = publishers.book(publisher.id).unwrap();
    assert_eq!(attached.map(|book| book.id), Some(first.id));

    let mut second = Book::new("second", "978-3", editorial_id);
    second.publisher_id = Some(publisher.id);
    let err = books.create_book(&second).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));

    let mut third = Book::new("third", "978-4", editorial_id);
    third.publisher_id = Some(4242);
    let err = books.create_book(&third).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
}

#[test]
fn update_replaces_all_fields_and_preserves_id() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Seix Barral");
    let other_editorial_id = seed_editorial(&conn, "Sudamericana");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let created = service
        .create_book(&Book::new("draft", "978-5", editorial_id))
        .unwrap();

    let mut replacement = Book::new("final title", "978-6", other_editorial_id);
    replacement.description = Some("revised".to_string());
    let updated = service.update_book(created.id, &replacement).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "final title");
    assert_eq!(updated.isbn, "978-6");
    assert_eq!(updated.editorial_id, Some(other_editorial_id));
    assert_eq!(updated.description.as_deref(), Some("revised"));
}

#[test]
fn update_keeps_own_publisher_attachment() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Anagrama");
    let publishers = PublisherService::new(SqlitePublisherRepository::try_new(&conn).unwrap());
    let publisher = publishers
        .create_publisher(&Publisher::new("Río Press", "Av 19 # 104-37"))
        .unwrap();

    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let mut book = Book::new("linked", "978-7", editorial_id);
    book.publisher_id = Some(publisher.id);
    let created = service.create_book(&book).unwrap();

    // Re-submitting the same publisher on update must not trip the
    // one-to-one check against the book itself.
    let mut replacement = created.clone();
    replacement.title = "linked, revised".to_string();
    let updated = service.update_book(created.id, &replacement).unwrap();
    assert_eq!(updated.publisher_id, Some(publisher.id));
}

#[test]
fn update_rejects_blank_isbn() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Tusquets");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let created = service
        .create_book(&Book::new("draft", "978-8", editorial_id))
        .unwrap();

    let err = service
        .update_book(created.id, &Book::new("draft", "", editorial_id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyIsbn)
    ));
}

#[test]
fn operations_on_missing_book_fail_not_found() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Espasa");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let err = service.get_book(4242).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Book,
            id: 4242
        }
    ));

    let err = service
        .update_book(4242, &Book::new("ghost", "978-9", editorial_id))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Book,
            ..
        }
    ));

    let err = service.delete_book(4242).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            kind: RecordKind::Book,
            ..
        }
    ));
}

#[test]
fn delete_book_with_authors_is_blocked() {
    let mut conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Oveja Negra");

    let book_id = {
        let books = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
        books
            .create_book(&Book::new("guarded", "978-10", editorial_id))
            .unwrap()
            .id
    };

    {
        let authors = AuthorService::new(SqliteAuthorRepository::try_new(&mut conn).unwrap());
        let author = authors
            .create_author(&Author::new("G. García Márquez"))
            .unwrap();
        authors.add_book(author.id, book_id).unwrap();
    }

    let books = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    let err = books.delete_book(book_id).unwrap_err();
    assert!(matches!(err, ServiceError::InvalidRelation(_)));
    assert!(err.to_string().contains("authors"));

    let linked = books.authors(book_id).unwrap();
    assert_eq!(linked.len(), 1);

    {
        let authors = AuthorService::new(SqliteAuthorRepository::try_new(&mut conn).unwrap());
        authors.remove_book(linked[0].id, book_id).unwrap();
    }

    let books = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());
    books.delete_book(book_id).unwrap();
    let err = books.get_book(book_id).unwrap_err();
    assert!(matches!(err, ServiceError::NotFound { .. }));
}

#[test]
fn list_books_returns_exactly_the_inserted_records() {
    let conn = open_db_in_memory().unwrap();
    let editorial_id = seed_editorial(&conn, "Debolsillo");
    let service = BookService::new(SqliteBookRepository::try_new(&conn).unwrap());

    let mut inserted = Vec::new();
    for index in 0..3 {
        let book = service
            .create_book(&Book::new(
                format!("volume {index}"),
                format!("978-11-{index}"),
                editorial_id,
            ))
            .unwrap();
        inserted.push(book);
    }

    let listed = service.list_books().unwrap();
    assert_eq!(listed.len(), inserted.len());
    for book in &inserted {
        assert!(listed.iter().any(|item| item == book));
    }
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_tables() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        bookstore_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqliteBookRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("books"))
    ));
}
