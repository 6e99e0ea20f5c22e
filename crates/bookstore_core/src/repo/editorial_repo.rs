//! Editorial repository contract and SQLite implementation.

use crate::model::book::Book;
use crate::model::editorial::{Editorial, EditorialId};
use crate::model::RecordKind;
use crate::repo::book_repo::book_from_row;
use crate::repo::{ensure_schema_ready, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Repository interface for editorial CRUD and book lookups.
pub trait EditorialRepository {
    fn create_editorial(&self, editorial: &Editorial) -> RepoResult<EditorialId>;
    fn update_editorial(&self, editorial: &Editorial) -> RepoResult<()>;
    fn get_editorial(&self, id: EditorialId) -> RepoResult<Option<Editorial>>;
    fn list_editorials(&self) -> RepoResult<Vec<Editorial>>;
    fn delete_editorial(&self, id: EditorialId) -> RepoResult<()>;
    /// Books published under the editorial, id order.
    fn books_for_editorial(&self, id: EditorialId) -> RepoResult<Vec<Book>>;
    fn book_count(&self, id: EditorialId) -> RepoResult<i64>;
}

/// SQLite-backed editorial repository.
pub struct SqliteEditorialRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEditorialRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["editorials", "books"])?;
        Ok(Self { conn })
    }
}

impl EditorialRepository for SqliteEditorialRepository<'_> {
    fn create_editorial(&self, editorial: &Editorial) -> RepoResult<EditorialId> {
        self.conn.execute(
            "INSERT INTO editorials (name) VALUES (?1);",
            [editorial.name.as_str()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_editorial(&self, editorial: &Editorial) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE editorials SET name = ?1 WHERE id = ?2;",
            params![editorial.name.as_str(), editorial.id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Editorial,
                id: editorial.id,
            });
        }
        Ok(())
    }

    fn get_editorial(&self, id: EditorialId) -> RepoResult<Option<Editorial>> {
        let editorial = self
            .conn
            .query_row(
                "SELECT id, name FROM editorials WHERE id = ?1;",
                [id],
                editorial_from_row,
            )
            .optional()?;
        Ok(editorial)
    }

    fn list_editorials(&self) -> RepoResult<Vec<Editorial>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM editorials ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut editorials = Vec::new();
        while let Some(row) = rows.next()? {
            editorials.push(editorial_from_row(row)?);
        }
        Ok(editorials)
    }

    fn delete_editorial(&self, id: EditorialId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM editorials WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Editorial,
                id,
            });
        }
        Ok(())
    }

    fn books_for_editorial(&self, id: EditorialId) -> RepoResult<Vec<Book>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, isbn, description, image,
                    publishing_date, editorial_id, publisher_id
             FROM books
             WHERE editorial_id = ?1
             ORDER BY id ASC;",
        )?;
        let mut rows = stmt.query([id])?;
        let mut books = Vec::new();
        while let Some(row) = rows.next()? {
            books.push(book_from_row(row)?);
        }
        Ok(books)
    }

    fn book_count(&self, id: EditorialId) -> RepoResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM books WHERE editorial_id = ?1;",
            [id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn editorial_from_row(row: &Row<'_>) -> Result<Editorial, rusqlite::Error> {
    Ok(Editorial {
        id: row.get("id")?,
        name: row.get("name")?,
    })
}
