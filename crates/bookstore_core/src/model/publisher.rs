//! Publisher domain model.

use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for publisher records.
pub type PublisherId = RecordId;

/// Canonical publisher record. The one-to-one book link is held on the
/// book side (`books.publisher_id`) and resolved by lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publisher {
    /// Store-assigned id; `0` until first persist.
    pub id: PublisherId,
    pub name: String,
    pub address: String,
}

impl Publisher {
    /// Creates an unpersisted publisher.
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
        }
    }
}
