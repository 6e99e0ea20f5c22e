//! Book domain model.
//!
//! # Invariants
//! - `isbn` must not be blank on any write path.
//! - `editorial_id` is mandatory for persistence; `publisher_id` is an
//!   optional one-to-one link (a publisher publishes at most one book).

use crate::model::editorial::EditorialId;
use crate::model::publisher::PublisherId;
use crate::model::{RecordId, ValidationError};
use serde::{Deserialize, Serialize};

/// Stable identifier for book records.
pub type BookId = RecordId;

/// Canonical book record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Store-assigned id; `0` until first persist.
    pub id: BookId,
    pub title: String,
    pub isbn: String,
    pub description: Option<String>,
    pub image: Option<String>,
    /// Unix epoch milliseconds.
    pub publishing_date: Option<i64>,
    /// Owning editorial; validated as present and persisted on create/update.
    pub editorial_id: Option<EditorialId>,
    /// Optional one-to-one publisher link.
    pub publisher_id: Option<PublisherId>,
}

impl Book {
    /// Creates an unpersisted book attached to the given editorial.
    pub fn new(
        title: impl Into<String>,
        isbn: impl Into<String>,
        editorial_id: EditorialId,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            isbn: isbn.into(),
            description: None,
            image: None,
            publishing_date: None,
            editorial_id: Some(editorial_id),
            publisher_id: None,
        }
    }

    /// Checks model-level rules that do not require storage access.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.isbn.trim().is_empty() {
            return Err(ValidationError::EmptyIsbn);
        }
        Ok(())
    }
}
