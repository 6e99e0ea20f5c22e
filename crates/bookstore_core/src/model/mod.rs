//! Domain model for the bookstore catalog.
//!
//! # Responsibility
//! - Define canonical record structs used by repository and service layers.
//! - Name every record kind for error reporting.
//!
//! # Invariants
//! - Every record is identified by a store-assigned `RecordId`; `id == 0`
//!   means "not yet persisted".
//! - Association fields are plain foreign-key ids, never embedded graphs.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod author;
pub mod book;
pub mod editorial;
pub mod organization;
pub mod prize;
pub mod publisher;
pub mod review;

/// Store-assigned numeric identifier shared by all record kinds.
pub type RecordId = i64;

/// Record kinds known by the catalog, used to qualify not-found errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Book,
    Author,
    Editorial,
    Publisher,
    Prize,
    Organization,
    Review,
}

impl Display for RecordKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Book => "book",
            Self::Author => "author",
            Self::Editorial => "editorial",
            Self::Publisher => "publisher",
            Self::Prize => "prize",
            Self::Organization => "organization",
            Self::Review => "review",
        };
        f.write_str(name)
    }
}

/// Model-level validation failure raised before any SQL mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Book ISBN is empty or whitespace-only.
    EmptyIsbn,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyIsbn => write!(f, "isbn is not valid: must not be empty"),
        }
    }
}

impl Error for ValidationError {}
