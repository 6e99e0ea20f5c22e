//! Core domain logic for the bookstore catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::author::{Author, AuthorId};
pub use model::book::{Book, BookId};
pub use model::editorial::{Editorial, EditorialId};
pub use model::organization::{Organization, OrganizationId};
pub use model::prize::{Prize, PrizeId};
pub use model::publisher::{Publisher, PublisherId};
pub use model::review::{Review, ReviewId};
pub use model::{RecordId, RecordKind, ValidationError};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::book_repo::{BookRepository, SqliteBookRepository};
pub use repo::editorial_repo::{EditorialRepository, SqliteEditorialRepository};
pub use repo::organization_repo::{OrganizationRepository, SqliteOrganizationRepository};
pub use repo::prize_repo::{PrizeRepository, SqlitePrizeRepository};
pub use repo::publisher_repo::{PublisherRepository, SqlitePublisherRepository};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use repo::{RepoError, RepoResult};
pub use service::author_service::AuthorService;
pub use service::book_service::BookService;
pub use service::editorial_service::EditorialService;
pub use service::organization_service::OrganizationService;
pub use service::prize_service::PrizeService;
pub use service::publisher_service::PublisherService;
pub use service::review_service::ReviewService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
