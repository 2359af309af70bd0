//! In-memory backend for development and tests.
//!
//! Locks are `parking_lot` and never held across an `.await`.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use folio_core::{ContactSubmission, ProjectListing};
use parking_lot::RwLock;
use uuid::Uuid;

use super::{StoreError, SubmissionStore};

/// Process-local store. Contents are lost on restart.
#[derive(Debug)]
pub struct MemoryStore {
    projects: RwLock<Vec<ProjectListing>>,
    contacts: RwLock<Vec<ContactSubmission>>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_projects(Vec::new())
    }

    pub fn with_projects(projects: Vec<ProjectListing>) -> Self {
        Self {
            projects: RwLock::new(projects),
            contacts: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Snapshot of every stored submission, in insertion order.
    pub fn contacts(&self) -> Vec<ContactSubmission> {
        self.contacts.read().clone()
    }

    /// Simulate losing (or regaining) the connection to the store.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store switched off".into()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SubmissionStore for MemoryStore {
    async fn list_projects(&self) -> Result<Vec<ProjectListing>, StoreError> {
        self.check_available()?;
        Ok(self.projects.read().clone())
    }

    async fn insert_contact(&self, submission: &ContactSubmission) -> Result<Uuid, StoreError> {
        self.check_available()?;
        self.contacts.write().push(submission.clone());
        Ok(submission.id)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
