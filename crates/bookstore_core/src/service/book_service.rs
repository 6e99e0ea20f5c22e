//! Book use-case service.
//!
//! # Responsibility
//! - Provide book create/get/list/update/delete APIs with reference checks.
//!
//! # Invariants
//! - A book is never persisted without an existing editorial.
//! - A publisher can be attached to at most one book.
//! - A book with associated authors cannot be deleted.
//! - `update_book` uses full record replacement semantics.

use crate::model::author::Author;
use crate::model::book::{Book, BookId};
use crate::model::RecordKind;
use crate::repo::book_repo::BookRepository;
use crate::service::{ServiceError, ServiceResult};

/// Book service facade over repository implementations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new book after checking its editorial and publisher
    /// references.
    pub fn create_book(&self, book: &Book) -> ServiceResult<Book> {
        self.check_references(book)?;
        let id = self.repo.create_book(book)?;
        self.require_book(id)
    }

    /// Gets one book by id.
    pub fn get_book(&self, id: BookId) -> ServiceResult<Book> {
        self.require_book(id)
    }

    /// Lists every book, id order.
    pub fn list_books(&self) -> ServiceResult<Vec<Book>> {
        Ok(self.repo.list_books()?)
    }

    /// Replaces all mutable fields of the stored book, preserving its id.
    pub fn update_book(&self, id: BookId, book: &Book) -> ServiceResult<Book> {
        self.require_book(id)?;

        let mut replacement = book.clone();
        replacement.id = id;
        self.check_references(&replacement)?;
        self.repo.update_book(&replacement)?;
        self.require_book(id)
    }

    /// Deletes one book; blocked while the book has associated authors.
    pub fn delete_book(&self, id: BookId) -> ServiceResult<()> {
        self.require_book(id)?;
        if self.repo.author_link_count(id)? > 0 {
            return Err(ServiceError::invalid_relation(
                "unable to delete book because it has associated authors",
            ));
        }
        self.repo.delete_book(id)?;
        Ok(())
    }

    /// Authors currently linked to the book.
    pub fn authors(&self, id: BookId) -> ServiceResult<Vec<Author>> {
        self.require_book(id)?;
        Ok(self.repo.authors_for_book(id)?)
    }

    fn require_book(&self, id: BookId) -> ServiceResult<Book> {
        self.repo
            .get_book(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Book, id))
    }

    fn check_references(&self, book: &Book) -> ServiceResult<()> {
        let editorial_id = book
            .editorial_id
            .ok_or_else(|| ServiceError::invalid_relation("editorial is not valid"))?;
        if !self.repo.editorial_exists(editorial_id)? {
            return Err(ServiceError::invalid_relation("editorial is not valid"));
        }

        if let Some(publisher_id) = book.publisher_id {
            if !self.repo.publisher_exists(publisher_id)? {
                return Err(ServiceError::invalid_relation("publisher is not valid"));
            }
            if let Some(owner) = self.repo.book_for_publisher(publisher_id)? {
                if owner != book.id {
                    return Err(ServiceError::invalid_relation(
                        "publisher already has a published book",
                    ));
                }
            }
        }

        Ok(())
    }
}
