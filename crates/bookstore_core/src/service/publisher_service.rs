//! Publisher use-case service.
//!
//! # Invariants
//! - A publisher attached to a book cannot be deleted.

use crate::model::book::Book;
use crate::model::publisher::{Publisher, PublisherId};
use crate::model::RecordKind;
use crate::repo::publisher_repo::PublisherRepository;
use crate::service::{ServiceError, ServiceResult};

/// Publisher service facade over repository implementations.
pub struct PublisherService<R: PublisherRepository> {
    repo: R,
}

impl<R: PublisherRepository> PublisherService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new publisher.
    pub fn create_publisher(&self, publisher: &Publisher) -> ServiceResult<Publisher> {
        let id = self.repo.create_publisher(publisher)?;
        self.require_publisher(id)
    }

    /// Gets one publisher by id.
    pub fn get_publisher(&self, id: PublisherId) -> ServiceResult<Publisher> {
        self.require_publisher(id)
    }

    /// Lists every publisher, id order.
    pub fn list_publishers(&self) -> ServiceResult<Vec<Publisher>> {
        Ok(self.repo.list_publishers()?)
    }

    /// Replaces all mutable fields of the stored publisher, preserving its
    /// id.
    pub fn update_publisher(&self, id: PublisherId, publisher: &Publisher) -> ServiceResult<Publisher> {
        self.require_publisher(id)?;

        let mut replacement = publisher.clone();
        replacement.id = id;
        self.repo.update_publisher(&replacement)?;
        self.require_publisher(id)
    }

    /// Deletes one publisher; blocked while a book references it.
    pub fn delete_publisher(&self, id: PublisherId) -> ServiceResult<()> {
        self.require_publisher(id)?;
        if self.repo.book_for_publisher(id)?.is_some() {
            return Err(ServiceError::invalid_relation(
                "unable to delete publisher because it has a published book",
            ));
        }
        self.repo.delete_publisher(id)?;
        Ok(())
    }

    /// The book attached to the publisher, if any.
    pub fn book(&self, id: PublisherId) -> ServiceResult<Option<Book>> {
        self.require_publisher(id)?;
        Ok(self.repo.book_for_publisher(id)?)
    }

    fn require_publisher(&self, id: PublisherId) -> ServiceResult<Publisher> {
        self.repo
            .get_publisher(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Publisher, id))
    }
}
