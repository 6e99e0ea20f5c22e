//! Review domain model.
//!
//! Reviews are aggregate-scoped: their identity is always qualified by the
//! owning book, and lookups outside that scope report not-found.

use crate::model::book::BookId;
use crate::model::RecordId;
use serde::{Deserialize, Serialize};

/// Stable identifier for review records, meaningful only together with the
/// owning book id.
pub type ReviewId = RecordId;

/// Canonical review record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Store-assigned id; `0` until first persist.
    pub id: ReviewId,
    /// Owning book; assigned by the scoped create operation.
    pub book_id: BookId,
    pub name: String,
    pub source: Option<String>,
    pub description: Option<String>,
    pub rating: Option<i64>,
}

impl Review {
    /// Creates an unpersisted review; the owning book is assigned when the
    /// review is created through the book-scoped service operation.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            book_id: 0,
            name: name.into(),
            source: None,
            description: None,
            rating: None,
        }
    }
}
