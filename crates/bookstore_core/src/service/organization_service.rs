//! Organization use-case service.
//!
//! # Invariants
//! - An organization endowing a prize cannot be deleted.

use crate::model::organization::{Organization, OrganizationId};
use crate::model::prize::Prize;
use crate::model::RecordKind;
use crate::repo::organization_repo::OrganizationRepository;
use crate::service::{ServiceError, ServiceResult};

/// Organization service facade over repository implementations.
pub struct OrganizationService<R: OrganizationRepository> {
    repo: R,
}

impl<R: OrganizationRepository> OrganizationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new organization.
    pub fn create_organization(&self, organization: &Organization) -> ServiceResult<Organization> {
        let id = self.repo.create_organization(organization)?;
        self.require_organization(id)
    }

    /// Gets one organization by id.
    pub fn get_organization(&self, id: OrganizationId) -> ServiceResult<Organization> {
        self.require_organization(id)
    }

    /// Lists every organization, id order.
    pub fn list_organizations(&self) -> ServiceResult<Vec<Organization>> {
        Ok(self.repo.list_organizations()?)
    }

    /// Replaces all mutable fields of the stored organization, preserving
    /// its id.
    pub fn update_organization(
        &self,
        id: OrganizationId,
        organization: &Organization,
    ) -> ServiceResult<Organization> {
        self.require_organization(id)?;

        let mut replacement = organization.clone();
        replacement.id = id;
        self.repo.update_organization(&replacement)?;
        self.require_organization(id)
    }

    /// Deletes one organization; blocked while it endows a prize.
    pub fn delete_organization(&self, id: OrganizationId) -> ServiceResult<()> {
        self.require_organization(id)?;
        if self.repo.prize_for_organization(id)?.is_some() {
            return Err(ServiceError::invalid_relation(
                "unable to delete organization because it endows a prize",
            ));
        }
        self.repo.delete_organization(id)?;
        Ok(())
    }

    /// The prize endowed by the organization, if any.
    pub fn prize(&self, id: OrganizationId) -> ServiceResult<Option<Prize>> {
        self.require_organization(id)?;
        Ok(self.repo.prize_for_organization(id)?)
    }

    fn require_organization(&self, id: OrganizationId) -> ServiceResult<Organization> {
        self.repo
            .get_organization(id)?
            .ok_or_else(|| ServiceError::not_found(RecordKind::Organization, id))
    }
}
