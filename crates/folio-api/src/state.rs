//! # Application State
//!
//! Shared state passed to every handler through the `State` extractor.
//! Cheap to clone: everything behind an `Arc`.

use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::middleware::metrics::ApiMetrics;
use crate::notify::{MailRelay, NotifyError};
use crate::store::{MemoryStore, PgStore, StoreError, SubmissionStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SubmissionStore>,
    /// `None` when email notification is not configured.
    pub mail: Option<Arc<MailRelay>>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// State over an explicit store, without email notification.
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            store,
            mail: None,
            metrics: ApiMetrics::new(),
        }
    }

    pub fn with_mail(mut self, relay: MailRelay) -> Self {
        self.mail = Some(Arc::new(relay));
        self
    }

    /// Build the state described by `config`, connecting to the store.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StateError> {
        let store: Arc<dyn SubmissionStore> = match &config.store {
            StoreBackend::Postgres { url } => Arc::new(PgStore::connect(url).await?),
            StoreBackend::Memory => {
                tracing::warn!("FOLIO_STORE=memory: submissions will not survive restarts");
                Arc::new(MemoryStore::new())
            }
        };

        let mut state = Self::new(store);
        match &config.mail {
            Some(mail) => {
                state = state.with_mail(MailRelay::new(mail)?);
                tracing::info!(address = %mail.address, "email notification enabled");
            }
            None => tracing::info!("email notification disabled"),
        }
        Ok(state)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mail", &self.mail.is_some())
            .field("metrics", &self.metrics.snapshot())
            .finish_non_exhaustive()
    }
}

/// Failure to assemble the state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
