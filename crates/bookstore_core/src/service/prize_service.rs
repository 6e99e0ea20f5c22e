//! Prize use-case service.
//!
//! # Responsibility
//! - Provide prize create/get/list/update/delete APIs.
//! - Manage the nullable prize/author link.
//!
//! # Invariants
//! - A prize is never persisted without an existing organization, and one
//!   organization endows at most one prize.
//! - A prize with an author cannot be deleted; the author must be detached
//!   first.

use crate::model::author::{Author, AuthorId};
use crate::model::prize::{Prize, PrizeId};
use crate::model::RecordKind;
use crate::repo::prize_repo::PrizeRepository;
use crate::service::{ServiceError, ServiceResult};

/// Prize service facade over repository implementations.
pub struct PrizeService<R: PrizeRepository> {
    repo: R,
}

impl<R: PrizeRepository> PrizeService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new prize after checking its organization reference.
    pub fn create_prize(&self, prize: &Prize) -> ServiceResult<Prize> {
        self.check_organization(prize)?;
        if let Some(author_id) = prize.author_id {
            self.require_author_exists(author_id)?;
        }

        let id = self.repo.create_prize(prize)?;
        self.require_prize(id)
    }

    /// Gets one prize by id.
    pub fn get_prize(&self, id: PrizeId) -> ServiceResult<Prize> {
        self.require_prize(id)
    }

    /// Lists every prize, id order.
    pub fn list_prizes(&self) -> ServiceResult<Vec<Prize>> {
        Ok(self.repo.list_prizes()?)
    }

    /// Replaces all mutable fields of the stored prize, preserving its id.
    /// The replacement organization is re-validated because full-record
    /// replace may change the association.
    pub fn update_prize(&self, id: PrizeId, prize: &Prize) -> ServiceResult<Prize> {
        self.require_prize(id)?;

        let mut replacement = prize.clone();
        replacement.id = id;
        self.check_organization(&replacement)?;
        if let Some(author_id) = replacement.author_id {
            self.require_author_exists(author_id)?;
        }

        self.repo.update_prize(&replacement)?;
        self.require_prize(id)
    }

    /// Deletes one prize; blocked while the prize has an author.
    pub fn delete_prize(&self, id: PrizeId) -> ServiceResult<()> {
        let stored = self.require_prize(id)?;
        if stored.author_id.is_some() {
            return Err(ServiceError::invalid_relation(
                "unable to delete prize because it has an author",
            ));
        }
        self.repo.delete_prize(id)?;
        Ok(())
    }

    /// Attaches an existing author to the prize, replacing any previous
    /// attachment.
    pub fn attach_author(&self, prize_id: PrizeId, author_id: AuthorId) -> ServiceResult<Prize> {
        self.require_prize(prize_id)?;
        self.require_author_exists(author_id)?;
        self.repo.set_author(prize_id, Some(author_id))?;
        self.require_prize(prize_id)
    }

    /// The author currently attached to the prize, if any.
    pub fn author(&self, prize_id: PrizeId) -> ServiceResult<Option<Author>> {
        self.require_prize(prize_id)?;
        Ok(self.repo.author_for_prize(prize_id)?)
    }

    /// Detaches the prize's author. Detaching an author-less prize is a
    /// no-op.
    pub fn detach_author(&self, prize_id: PrizeId) -> ServiceResult<Prize> {
        self.require_prize(prize_id)?;
        self.repo.set_author(prize_id, None)?;
        self.require_prize(prize_id)
    }

    fn require_prize(&self, id: PrizeId) -> ServiceResult<Prize> {
        self.repo
            .get_prize(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Prize, id))
    }

    fn require_author_exists(&self, id: AuthorId) -> ServiceResult<()> {
        if !self.repo.author_exists(id)? {
            return Err(ServiceError::not_found(RecordKind::Author, id));
        }
        Ok(())
    }

    fn check_organization(&self, prize: &Prize) -> ServiceResult<()> {
        let organization_id = prize
            .organization_id
            .ok_or_else(|| ServiceError::invalid_relation("organization is not valid"))?;
        if !self.repo.organization_exists(organization_id)? {
            return Err(ServiceError::invalid_relation("organization is not valid"));
        }
        if let Some(holder) = self.repo.prize_for_organization(organization_id)? {
            if holder != prize.id {
                return Err(ServiceError::invalid_relation(
                    "organization already endows a prize",
                ));
            }
        }
        Ok(())
    }
}
