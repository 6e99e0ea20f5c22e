//! Organization domain model.

use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for organization records.
pub type OrganizationId = RecordId;

/// Canonical organization record. The one-to-one prize link is held on the
/// prize side (`prizes.organization_id`) and resolved by lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organization {
    /// Store-assigned id; `0` until first persist.
    pub id: OrganizationId,
    pub name: String,
    pub description: String,
}

impl Organization {
    /// Creates an unpersisted organization.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
        }
    }
}
