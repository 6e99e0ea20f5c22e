//! Prize domain model.
//!
//! # Invariants
//! - A prize cannot be persisted without an existing organization that does
//!   not already endow another prize.
//! - `author_id` is nullable; a prize with an author cannot be deleted.

use crate::model::author::AuthorId;
use crate::model::organization::OrganizationId;
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for prize records.
pub type PrizeId = RecordId;

/// Canonical prize record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prize {
    /// Store-assigned id; `0` until first persist.
    pub id: PrizeId,
    pub name: String,
    pub description: Option<String>,
    /// Unix epoch milliseconds.
    pub premiation_date: Option<i64>,
    /// Endowing organization; mandatory for persistence.
    pub organization_id: Option<OrganizationId>,
    /// Awarded author, if any.
    pub author_id: Option<AuthorId>,
}

impl Prize {
    /// Creates an unpersisted prize endowed by the given organization.
    pub fn new(name: impl Into<String>, organization_id: OrganizationId) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            premiation_date: None,
            organization_id: Some(organization_id),
            author_id: None,
        }
    }
}
