//! Author use-case service.
//!
//! # Responsibility
//! - Provide author create/get/list/update/delete APIs.
//! - Manage the author/book many-to-many links.
//!
//! # Invariants
//! - An author with books or prizes cannot be deleted.
//! - `replace_books` swaps the whole link set atomically.
//! - Link operations never dangle: both ends must exist first.

use crate::model::author::{Author, AuthorId};
use crate::model::book::{Book, BookId};
use crate::model::prize::Prize;
use crate::model::RecordKind;
use crate::repo::author_repo::AuthorRepository;
use crate::service::{ServiceError, ServiceResult};

/// Author service facade over repository implementations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new author.
    pub fn create_author(&self, author: &Author) -> ServiceResult<Author> {
        let id = self.repo.create_author(author)?;
        self.require_author(id)
    }

    /// Gets one author by id.
    pub fn get_author(&self, id: AuthorId) -> ServiceResult<Author> {
        self.require_author(id)
    }

    /// Lists every author, id order.
    pub fn list_authors(&self) -> ServiceResult<Vec<Author>> {
        Ok(self.repo.list_authors()?)
    }

    /// Replaces all mutable fields of the stored author, preserving its id.
    pub fn update_author(&self, id: AuthorId, author: &Author) -> ServiceResult<Author> {
        self.require_author(id)?;

        let mut replacement = author.clone();
        replacement.id = id;
        self.repo.update_author(&replacement)?;
        self.require_author(id)
    }

    /// Deletes one author; blocked while the author has books or prizes.
    pub fn delete_author(&self, id: AuthorId) -> ServiceResult<()> {
        self.require_author(id)?;
        if self.repo.linked_book_count(id)? > 0 {
            return Err(ServiceError::invalid_relation(
                "unable to delete author because they have associated books",
            ));
        }
        if self.repo.prize_count(id)? > 0 {
            return Err(ServiceError::invalid_relation(
                "unable to delete author because they have associated prizes",
            ));
        }
        self.repo.delete_author(id)?;
        Ok(())
    }

    /// Links one existing book to the author. Linking twice is a no-op.
    pub fn add_book(&self, author_id: AuthorId, book_id: BookId) -> ServiceResult<()> {
        self.require_author(author_id)?;
        self.require_book_exists(book_id)?;
        self.repo.add_book_link(author_id, book_id)?;
        Ok(())
    }

    /// Books currently linked to the author.
    pub fn books(&self, author_id: AuthorId) -> ServiceResult<Vec<Book>> {
        self.require_author(author_id)?;
        Ok(self.repo.books_for_author(author_id)?)
    }

    /// Gets one linked book. A book that exists but is not associated to
    /// the author is an invalid-relation failure, not a not-found.
    pub fn book(&self, author_id: AuthorId, book_id: BookId) -> ServiceResult<Book> {
        self.require_author(author_id)?;
        self.require_book_exists(book_id)?;
        if !self.repo.book_link_exists(author_id, book_id)? {
            return Err(ServiceError::invalid_relation(
                "the book is not associated to the author",
            ));
        }

        let linked = self
            .repo
            .books_for_author(author_id)?
            .into_iter()
            .find(|book| book.id == book_id);
        linked.ok_or_else(|| ServiceError::not_found(RecordKind::Book, book_id))
    }

    /// Atomically replaces the author's whole book link set.
    pub fn replace_books(&mut self, author_id: AuthorId, book_ids: &[BookId]) -> ServiceResult<Vec<Book>> {
        self.require_author(author_id)?;
        for book_id in book_ids {
            self.require_book_exists(*book_id)?;
        }

        self.repo.replace_book_links(author_id, book_ids)?;
        Ok(self.repo.books_for_author(author_id)?)
    }

    /// Unlinks one book from the author. Unlinking an absent pair is a
    /// no-op.
    pub fn remove_book(&self, author_id: AuthorId, book_id: BookId) -> ServiceResult<()> {
        self.require_author(author_id)?;
        self.require_book_exists(book_id)?;
        self.repo.remove_book_link(author_id, book_id)?;
        Ok(())
    }

    /// Prizes currently awarded to the author.
    pub fn prizes(&self, author_id: AuthorId) -> ServiceResult<Vec<Prize>> {
        self.require_author(author_id)?;
        Ok(self.repo.prizes_for_author(author_id)?)
    }

    fn require_author(&self, id: AuthorId) -> ServiceResult<Author> {
        self.repo
            .get_author(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Author, id))
    }

    fn require_book_exists(&self, id: BookId) -> ServiceResult<()> {
        if !self.repo.book_exists(id)? {
            return Err(ServiceError::not_found(RecordKind::Book, id));
        }
        Ok(())
    }
}
