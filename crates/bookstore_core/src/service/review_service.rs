//! Review use-case service.
//!
//! # Responsibility
//! - Provide review APIs scoped to one owning book.
//!
//! # Invariants
//! - Every operation resolves the owning book first.
//! - A review id that exists under a different book is reported as
//!   not-found, never as a distinct conflict.

use crate::model::book::BookId;
use crate::model::review::{Review, ReviewId};
use crate::model::RecordKind;
use crate::repo::review_repo::ReviewRepository;
use crate::service::{ServiceError, ServiceResult};

/// Review service facade over repository implementations.
pub struct ReviewService<R: ReviewRepository> {
    repo: R,
}

impl<R: ReviewRepository> ReviewService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new review under the given book.
    pub fn create_review(&self, book_id: BookId, review: &Review) -> ServiceResult<Review> {
        self.require_book(book_id)?;

        let mut scoped = review.clone();
        scoped.book_id = book_id;
        let id = self.repo.create_review(&scoped)?;
        self.require_review(book_id, id)
    }

    /// Lists the book's reviews, id order.
    pub fn list_reviews(&self, book_id: BookId) -> ServiceResult<Vec<Review>> {
        self.require_book(book_id)?;
        Ok(self.repo.list_reviews(book_id)?)
    }

    /// Gets one review scoped to the owning book.
    pub fn get_review(&self, book_id: BookId, review_id: ReviewId) -> ServiceResult<Review> {
        self.require_book(book_id)?;
        self.require_review(book_id, review_id)
    }

    /// Replaces all mutable fields of the scoped review, preserving its id
    /// and owner.
    pub fn update_review(
        &self,
        book_id: BookId,
        review_id: ReviewId,
        review: &Review,
    ) -> ServiceResult<Review> {
        self.require_book(book_id)?;
        self.require_review(book_id, review_id)?;

        let mut replacement = review.clone();
        replacement.id = review_id;
        replacement.book_id = book_id;
        self.repo.update_review(&replacement)?;
        self.require_review(book_id, review_id)
    }

    /// Deletes one review scoped to the owning book.
    pub fn delete_review(&self, book_id: BookId, review_id: ReviewId) -> ServiceResult<()> {
        self.require_book(book_id)?;
        self.repo.delete_review(book_id, review_id)?;
        Ok(())
    }

    fn require_book(&self, book_id: BookId) -> ServiceResult<()> {
        if !self.repo.book_exists(book_id)? {
            return Err(ServiceError::not_found(RecordKind::Book, book_id));
        }
        Ok(())
    }

    fn require_review(&self, book_id: BookId, review_id: ReviewId) -> ServiceResult<Review> {
        self.repo
            .get_review(book_id, review_id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Review, review_id))
    }
}
