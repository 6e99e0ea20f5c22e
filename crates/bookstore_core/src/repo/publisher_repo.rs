//! Publisher repository contract and SQLite implementation.

use crate::model::book::Book;
use crate::model::publisher::{Publisher, PublisherId};
use crate::model::RecordKind;
use crate::repo::book_repo::book_from_row;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for publisher CRUD and the one-to-one book lookup.
pub trait PublisherRepository {
    fn create_publisher(&self, publisher: &Publisher) -> RepoResult<PublisherId>;
    fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()>;
    fn get_publisher(&self, id: PublisherId) -> RepoResult<Option<Publisher>>;
    fn list_publishers(&self) -> RepoResult<Vec<Publisher>>;
    fn delete_publisher(&self, id: PublisherId) -> RepoResult<()>;
    /// The book attached to the publisher, if any.
    fn book_for_publisher(&self, id: PublisherId) -> RepoResult<Option<Book>>;
}

/// SQLite-backed publisher repository.
pub struct SqlitePublisherRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePublisherRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["publishers", "books"])?;
        Ok(Self { conn })
    }
}

impl PublisherRepository for SqlitePublisherRepository<'_> {
    fn create_publisher(&self, publisher: &Publisher) -> RepoResult<PublisherId> {
        self.conn.execute(
            "INSERT INTO publishers (name, address) VALUES (?1, ?2);",
            params![publisher.name.as_str(), publisher.address.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_publisher(&self, publisher: &Publisher) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE publishers SET name = ?1, address = ?2 WHERE id = ?3;",
            params![
                publisher.name.as_str(),
                publisher.address.as_str(),
                publisher.id
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Publisher,
                id: publisher.id,
            });
        }
        Ok(())
    }

    fn get_publisher(&self, id: PublisherId) -> RepoResult<Option<Publisher>> {
        let publisher = self
            .conn
            .query_row(
                "SELECT id, name, address FROM publishers WHERE id = ?1;",
                [id],
                publisher_from_row,
            )
            .optional()?;
        Ok(publisher)
    }

    fn list_publishers(&self) -> RepoResult<Vec<Publisher>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, address FROM publishers ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut publishers = Vec::new();
        while let Some(row) = rows.next()? {
            publishers.push(publisher_from_row(row)?);
        }
        Ok(publishers)
    }

    fn delete_publisher(&self, id: PublisherId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM publishers WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Publisher,
                id,
            });
        }
        Ok(())
    }

    fn book_for_publisher(&self, id: PublisherId) -> RepoResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                "SELECT id, title, isbn, description, image,
                        publishing_date, editorial_id, publisher_id
                 FROM books
                 WHERE publisher_id = ?1;",
                [id],
                book_from_row,
            )
            .optional()?;
        Ok(book)
    }
}

fn publisher_from_row(row: &Row<'_>) -> Result<Publisher, rusqlite::Error> {
    Ok(Publisher {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
    })
}
