//! Review repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide book-scoped CRUD APIs over the `reviews` table.
//!
//! # Invariants
//! - Every query is constrained by the owning book id; a review id under a
//!   different book behaves exactly like an absent id.

use crate::model::book::BookId;
use crate::model::review::{Review, ReviewId};
use crate::model::RecordKind;
use crate::repo::{ensure_schema_ready, id_exists, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const REVIEW_SELECT_SQL: &str = "SELECT
    id,
    book_id,
    name,
    source,
    description,
    rating
FROM reviews";

/// Repository interface for book-scoped review operations.
pub trait ReviewRepository {
    /// Creates one review; `review.book_id` must name the owning book.
    fn create_review(&self, review: &Review) -> RepoResult<ReviewId>;
    /// Rewrites all mutable fields of the review identified by
    /// `(review.book_id, review.id)`.
    fn update_review(&self, review: &Review) -> RepoResult<()>;
    fn get_review(&self, book_id: BookId, review_id: ReviewId) -> RepoResult<Option<Review>>;
    fn list_reviews(&self, book_id: BookId) -> RepoResult<Vec<Review>>;
    fn delete_review(&self, book_id: BookId, review_id: ReviewId) -> RepoResult<()>;
    fn book_exists(&self, book_id: BookId) -> RepoResult<bool>;
}

/// SQLite-backed review repository.
pub struct SqliteReviewRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteReviewRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, &["reviews", "books"])?;
        Ok(Self { conn })
    }
}

impl ReviewRepository for SqliteReviewRepository<'_> {
    fn create_review(&self, review: &Review) -> RepoResult<ReviewId> {
        self.conn.execute(
            "INSERT INTO reviews (book_id, name, source, description, rating)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                review.book_id,
                review.name.as_str(),
                review.source.as_deref(),
                review.description.as_deref(),
                review.rating,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_review(&self, review: &Review) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE reviews
             SET name = ?1, source = ?2, description = ?3, rating = ?4
             WHERE id = ?5
               AND book_id = ?6;",
            params![
                review.name.as_str(),
                review.source.as_deref(),
                review.description.as_deref(),
                review.rating,
                review.id,
                review.book_id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Review,
                id: review.id,
            });
        }

        Ok(())
    }

    fn get_review(&self, book_id: BookId, review_id: ReviewId) -> RepoResult<Option<Review>> {
        let review = self
            .conn
            .query_row(
                &format!("{REVIEW_SELECT_SQL} WHERE id = ?1 AND book_id = ?2;"),
                params![review_id, book_id],
                review_from_row,
            )
            .optional()?;
        Ok(review)
    }

    fn list_reviews(&self, book_id: BookId) -> RepoResult<Vec<Review>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "{REVIEW_SELECT_SQL} WHERE book_id = ?1 ORDER BY id ASC;"
            ))?;
        let mut rows = stmt.query([book_id])?;
        let mut reviews = Vec::new();
        while let Some(row) = rows.next()? {
            reviews.push(review_from_row(row)?);
        }
        Ok(reviews)
    }

    fn delete_review(&self, book_id: BookId, review_id: ReviewId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "DELETE FROM reviews WHERE id = ?1 AND book_id = ?2;",
            params![review_id, book_id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: RecordKind::Review,
                id: review_id,
            });
        }
        Ok(())
    }

    fn book_exists(&self, book_id: BookId) -> RepoResult<bool> {
        id_exists(self.conn, "books", book_id)
    }
}

fn review_from_row(row: &Row<'_>) -> Result<Review, rusqlite::Error> {
    Ok(Review {
        id: row.get("id")?,
        book_id: row.get("book_id")?,
        name: row.get("name")?,
        source: row.get("source")?,
        description: row.get("description")?,
        rating: row.get("rating")?,
    })
}
