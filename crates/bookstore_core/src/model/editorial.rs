//! Editorial domain model.

use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for editorial records.
pub type EditorialId = RecordId;

/// Canonical editorial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Editorial {
    /// Store-assigned id; `0` until first persist.
    pub id: EditorialId,
    pub name: String,
}

impl Editorial {
    /// Creates an unpersisted editorial.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}
