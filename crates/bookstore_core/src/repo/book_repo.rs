//! Book repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `books` table.
//! - Expose the reference probes book validation needs (editorial,
//!   publisher, author links).
//!
//! # Invariants
//! - Write paths call `Book::validate()` before SQL mutations.
//! - Deleting a book removes its author links and reviews (FK cascade).

use crate::model::author::Author;
use crate::model::book::{Book, BookId};
use crate::model::editorial::EditorialId;
use crate::model::publisher::PublisherId;
use crate::model::RecordKind;
use crate::repo::author_repo::author_from_row;
use crate::repo::{ensure_schema_ready, id_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    isbn,
    description,
    image,
    publishing_date,
    editorial_id,
    publisher_id
FROM books";

/// Repository interface for book CRUD and reference probes.
pub trait BookRepository {
    fn create_book(&self, book: &Book) -> RepoResult<BookId>;
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    fn delete_book(&self, id: BookId) -> RepoResult<()>;
    /// Authors currently linked to the book, id order.
    fn authors_for_book(&self, id: BookId) -> RepoResult<Vec<Author>>;
    /// Number of author links held by the book.
    fn author_link_count(&self, id: BookId) -> RepoResult<i64>;
    fn editorial_exists(&self, id: EditorialId) -> RepoResult<bool>;
    fn publisher_exists(&self, id: PublisherId) -> RepoResult<bool>;
    /// The book currently attached to the publisher, if any.
    fn book_for_publisher(&self, id: PublisherId) -> RepoResult<Option<BookId>>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["books", "editorials", "publishers", "book_authors"])?;
        Ok(Self { conn })
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn create_book(&self, book: &Book) -> RepoResult<BookId> {
        book.validate()?;

        self.conn.execute(
            "INSERT INTO books (
                title,
                isbn,
                description,
                image,
                publishing_date,
                editorial_id,
                publisher_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                book.title.as_str(),
                book.isbn.as_str(),
                book.description.as_deref(),
                book.image.as_deref(),
                book.publishing_date,
                book.editorial_id,
                book.publisher_id,
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                isbn = ?2,
                description = ?3,
                image = ?4,
                publishing_date = ?5,
                editorial_id = ?6,
                publisher_id = ?7
             WHERE id = ?8;",
            params![
                book.title.as_str(),
                book.isbn.as_str(),
                book.description.as_deref(),
                book.image.as_deref(),
                book.publishing_date,
                book.editorial_id,
                book.publisher_id,
                book.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Book,
                id: book.id,
            });
        }

        Ok(())
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE id = ?1;"),
                [id],
                book_from_row,
            )
            .optional()?;
        Ok(book)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(book_from_row(row)?);
        }
        Ok(books)
    }

    fn delete_book(&self, id: BookId) -> RepoResult<()> {
        let changed = self.conn.execute("DELETE FROM books WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Book,
                id,
            });
        }
        Ok(())
    }

    fn authors_for_book(&self, id: BookId) -> RepoResult<Vec<Author>> {
        let mut stmt = self.conn.prepare(
            "SELECT a.id, a.name, a.description, a.image, a.birth_date
             FROM book_authors ba
             INNER JOIN authors a ON a.id = ba.author_id
             WHERE ba.book_id = ?1
             ORDER BY a.id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(author_from_row(row)?);
        }
        Ok(authors)
    }

    fn author_link_count(&self, id: BookId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM book_authors WHERE book_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn editorial_exists(&self, id: EditorialId) -> RepoResult<bool> {
        id_exists(self.conn, "editorials", id)
    }

    fn publisher_exists(&self, id: PublisherId) -> RepoResult<bool> {
        id_exists(self.conn, "publishers", id)
    }

    fn book_for_publisher(&self, id: PublisherId) -> RepoResult<Option<BookId>> {
        let book_id = self
            .conn
            .query_row(
                "SELECT id FROM books WHERE publisher_id = ?1;",
                [id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(book_id)
    }
}

pub(crate) fn book_from_row(row: &Row<'_>) -> Result<Book, rusqlite::Error> {
    Ok(Book {
        id: row.get("id")?,
        title: row.get("title")?,
        isbn: row.get("isbn")?,
        description: row.get("description")?,
        image: row.get("image")?,
        publishing_date: row.get("publishing_date")?,
        editorial_id: row.get("editorial_id")?,
        publisher_id: row.get("publisher_id")?,
    })
}
