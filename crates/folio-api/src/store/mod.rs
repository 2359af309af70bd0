//! # Submission Store
//!
//! Two collections: project listings (read-only here) and contact
//! submissions (append-only). The service talks to them through
//! [`SubmissionStore`] so the Postgres backend can be swapped for the
//! in-memory one in development and tests.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use folio_core::{ContactSubmission, ProjectListing};
use uuid::Uuid;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors from a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence boundary for listings and submissions.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Every project listing, in whatever order the backend yields them.
    async fn list_projects(&self) -> Result<Vec<ProjectListing>, StoreError>;

    /// Append a submission and return the identifier it was stored under.
    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError>;

    /// Cheap connectivity probe for the readiness endpoint.
    async fn health_check(&self) -> Result<(), StoreError>;
}
