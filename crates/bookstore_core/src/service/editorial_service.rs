//! Editorial use-case service.
//!
//! # Invariants
//! - An editorial with published books cannot be deleted.

use crate::model::book::Book;
use crate::model::editorial::{Editorial, EditorialId};
use crate::model::RecordKind;
use crate::repo::editorial_repo::EditorialRepository;
use crate::service::{ServiceError, ServiceResult};

/// Editorial service facade over repository implementations.
pub struct EditorialService<R: EditorialRepository> {
    repo: R,
}

impl<R: EditorialRepository> EditorialService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new editorial.
    pub fn create_editorial(&self, editorial: &Editorial) -> ServiceResult<Editorial> {
        let id = self.repo.create_editorial(editorial)?;
        self.require_editorial(id)
    }

    /// Gets one editorial by id.
    pub fn get_editorial(&self, id: EditorialId) -> ServiceResult<Editorial> {
        self.require_editorial(id)
    }

    /// Lists every editorial, id order.
    pub fn list_editorials(&self) -> ServiceResult<Vec<Editorial>> {
        Ok(self.repo.list_editorials()?)
    }

    /// Replaces all mutable fields of the stored editorial, preserving its
    /// id.
    pub fn update_editorial(&self, id: EditorialId, editorial: &Editorial) -> ServiceResult<Editorial> {
        self.require_editorial(id)?;

        let mut replacement = editorial.clone();
        replacement.id = id;
        self.repo.update_editorial(&replacement)?;
        self.require_editorial(id)
    }

    /// Deletes one editorial; blocked while it has books.
    pub fn delete_editorial(&self, id: EditorialId) -> ServiceResult<()> {
        self.require_editorial(id)?;
        if self.repo.book_count(id)? > 0 {
            return Err(ServiceError::invalid_relation(
                "unable to delete editorial because it has associated books",
            ));
        }
        self.repo.delete_editorial(id)?;
        Ok(())
    }

    /// Books published under the editorial.
    pub fn books(&self, id: EditorialId) -> ServiceResult<Vec<Book>> {
        self.require_editorial(id)?;
        Ok(self.repo.books_for_editorial(id)?)
    }

    fn require_editorial(&self, id: EditorialId) -> ServiceResult<Editorial> {
        self.repo
            .get_editorial(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Editorial, id))
    }
}
