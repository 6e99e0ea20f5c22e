//! Author domain model.

use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for author records.
pub type AuthorId = RecordId;

/// Canonical author record. Book and prize associations live in their own
/// tables and are resolved through repository lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Store-assigned id; `0` until first persist.
    pub id: AuthorId,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Unix epoch milliseconds.
    pub birth_date: Option<i64>,
}

impl Author {
    /// Creates an unpersisted author.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: None,
            image: None,
            birth_date: None,
        }
    }
}
