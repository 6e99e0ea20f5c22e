//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Own the author/book link table operations, including atomic full
//!   replacement.
//!
//! # Invariants
//! - `replace_book_links` swaps the whole link set in a single immediate
//!   transaction.
//! - Link writes never create dangling references; both ends are FK-backed.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::model::prize::Prize;
use crate::model::RecordKind;
use crate::repo::book_repo::book_from_row;
use crate::repo::prize_repo::prize_from_row;
use crate::repo::{ensure_schema_ready, id_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    description,
    image,
    birth_date
FROM authors";

/// Repository interface for author CRUD and author/book links.
pub trait AuthorRepository {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId>;
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn list_authors(&self) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
    fn book_exists(&self, id: BookId) -> RepoResult<bool>;
    /// Adds one author/book link; already-linked pairs are a no-op.
    fn add_book_link(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<()>;
    /// Removes one author/book link; absent pairs are a no-op.
    fn remove_book_link(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<()>;
    /// Replaces the author's whole link set in one transaction.
    fn replace_book_links(&mut self, author_id: AuthorId, book_ids: &[BookId]) -> RepoResult<()>;
    fn book_link_exists(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<bool>;
    /// Books currently linked to the author, id order.
    fn books_for_author(&self, id: AuthorId) -> RepoResult<Vec<Book>>;
    /// Prizes currently awarded to the author, id order.
    fn prizes_for_author(&self, id: AuthorId) -> RepoResult<Vec<Prize>>;
    fn linked_book_count(&self, id: AuthorId) -> RepoResult<i64>;
    fn prize_count(&self, id: AuthorId) -> RepoResult<i64>;
}

/// SQLite-backed author repository.
///
/// Holds a mutable connection borrow because link replacement runs inside
/// an explicit transaction.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["authors", "books", "book_authors", "prizes"])?;
        Ok(Self { conn })
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &Author) -> RepoResult<AuthorId> {
        self.conn.execute(
            "INSERT INTO authors (name, description, image, birth_date)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                author.name.as_str(),
                author.description.as_deref(),
                author.image.as_deref(),
                author.birth_date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE authors
             SET name = ?1, description = ?2, image = ?3, birth_date = ?4
             WHERE id = ?5;",
            params![
                author.name.as_str(),
                author.description.as_deref(),
                author.image.as_deref(),
                author.birth_date,
                author.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Author,
                id: author.id,
            });
        }

        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let author = self
            .conn
            .query_row(
                &format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"),
                [id],
                author_from_row,
            )
            .optional()?;
        Ok(author)
    }

    fn list_authors(&self) -> RepoResult<Vec<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(author_from_row(row)?);
        }
        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Author,
                id,
            });
        }
        Ok(())
    }

    fn book_exists(&self, id: BookId) -> RepoResult<bool> {
        id_exists(self.conn, "books", id)
    }

    fn add_book_link(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO book_authors (book_id, author_id) VALUES (?1, ?2);",
            params![book_id, author_id],
        )?;
        Ok(())
    }

    fn remove_book_link(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM book_authors WHERE book_id = ?1 AND author_id = ?2;",
            params![book_id, author_id],
        )?;
        Ok(())
    }

    fn replace_book_links(&mut self, author_id: AuthorId, book_ids: &[BookId]) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute("DELETE FROM book_authors WHERE author_id = ?1;", [author_id])?;
        for book_id in book_ids {
            tx.execute(
                "INSERT OR IGNORE INTO book_authors (book_id, author_id) VALUES (?1, ?2);",
                params![book_id, author_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    fn book_link_exists(&self, author_id: AuthorId, book_id: BookId) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM book_authors WHERE book_id = ?1 AND author_id = ?2
            );",
            params![book_id, author_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn books_for_author(&self, id: AuthorId) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT b.id, b.title, b.isbn, b.description, b.image,
                    b.publishing_date, b.editorial_id, b.publisher_id
             FROM book_authors ba
             INNER JOIN books b ON b.id = ba.book_id
             WHERE ba.author_id = ?1
             ORDER BY b.id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(book_from_row(row)?);
        }
        Ok(books)
    }

    fn prizes_for_author(&self, id: AuthorId) -> RepoResult<Vec<Prize>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, description, premiation_date, organization_id, author_id
             FROM prizes
             WHERE author_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut prizes = Vec::new();
        while let Some(row) = rows.next()? {
            prizes.push(prize_from_row(row)?);
        }
        Ok(prizes)
    }

    fn linked_book_count(&self, id: AuthorId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM book_authors WHERE author_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn prize_count(&self, id: AuthorId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM prizes WHERE author_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

pub(crate) fn author_from_row(row: &Row<'_>) -> Result<Author, rusqlite::Error> {
    Ok(Author {
        id: row.get("id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        image: row.get("image")?,
        birth_date: row.get("birth_date")?,
    })
}
