//! # Contact Form
//!
//! The submit flow behind the portfolio's contact page. A [`ContactForm`]
//! owns its two destinations, its queue storage and a [`DeliveryStrategy`].
//!
//! - [`ContactForm::mount`] drains the queue once. Call it when the form is
//!   shown.
//! - [`ContactForm::submit`] validates locally, then runs the strategy and
//!   resolves to exactly one [`SubmitOutcome`].
//!
//! A new submission is attempted before anything already queued. Only a
//! successful backend delivery triggers a drain; there is no timer.
//!
//! Under [`DeliveryStrategy::RelayPrimary`] the backend copy runs as a
//! background task. Its result never changes the outcome, but a process
//! that is about to exit must call [`ContactForm::settle`] or the task is
//! dropped with the runtime before it sends anything.

use std::sync::Arc;
use std::time::Duration;

use folio_core::ContactPayload;
use parking_lot::Mutex;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::delivery::{BackendClient, Deliverer, DeliveryOutcome, RelayClient};
use crate::error::{DeliveryError, QueueError};
use crate::queue::{self, DrainReport, RetryQueueState};
use crate::storage::{FileStorage, MemoryStorage, QueueStorage};
use crate::strategy::{DeliveryStrategy, RejectionPolicy};

pub const SENT_MESSAGE: &str = "Message sent successfully!";
pub const QUEUED_MESSAGE: &str =
    "You appear to be offline. Your message was saved and will be sent automatically next time.";
pub const FIELDS_REQUIRED: &str = "All fields are required";

/// What the person who pressed "send" should be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    /// The payload itself was refused. Retrying it unchanged will not help.
    Rejected { reason: String },
    /// This attempt failed and nothing was saved for later.
    Failed { reason: String },
    /// Delivery is deferred to a later drain. Not a failure.
    QueuedLocally,
}

impl SubmitOutcome {
    pub fn message(&self) -> &str {
        match self {
            Self::Sent => SENT_MESSAGE,
            Self::Rejected { reason } | Self::Failed { reason } => reason.as_str(),
            Self::QueuedLocally => QUEUED_MESSAGE,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent | Self::QueuedLocally)
    }
}

#[derive(Clone)]
pub struct ContactForm {
    backend: Arc<dyn Deliverer>,
    relay: Arc<dyn Deliverer>,
    storage: Arc<dyn QueueStorage>,
    strategy: DeliveryStrategy,
    rejection_policy: RejectionPolicy,
    /// Backend copies spawned by the relay-primary flow, not yet awaited.
    background: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("strategy", &self.strategy)
            .field("rejection_policy", &self.rejection_policy)
            .finish_non_exhaustive()
    }
}

impl ContactForm {
    pub fn new(
        backend: Arc<dyn Deliverer>,
        relay: Arc<dyn Deliverer>,
        storage: Arc<dyn QueueStorage>,
        strategy: DeliveryStrategy,
    ) -> Self {
        Self {
            backend,
            relay,
            storage,
            strategy,
            rejection_policy: RejectionPolicy::default(),
            background: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_rejection_policy(mut self, policy: RejectionPolicy) -> Self {
        self.rejection_policy = policy;
        self
    }

    /// Build the HTTP clients and the queue storage described by `config`.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FormError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let backend = BackendClient::new(&config.api_url, timeout)?;
        let relay = RelayClient::new(config.relay_url.clone(), timeout)?;
        let storage: Arc<dyn QueueStorage> = match &config.queue_dir {
            Some(dir) => Arc::new(FileStorage::open(dir)?),
            None => {
                tracing::debug!("no queue directory configured, queue kept in memory");
                Arc::new(MemoryStorage::new())
            }
        };

        Ok(Self::new(Arc::new(backend), Arc::new(relay), storage, config.strategy)
            .with_rejection_policy(config.rejection_policy))
    }

    pub fn strategy(&self) -> DeliveryStrategy {
        self.strategy
    }

    /// Retry everything queued.
    pub async fn mount(&self) -> Result<DrainReport, QueueError> {
        queue::drain(self.storage.as_ref(), self.backend.as_ref(), self.rejection_policy).await
    }

    /// Entries currently waiting for a retry.
    pub fn pending(&self) -> Result<RetryQueueState, QueueError> {
        queue::load(self.storage.as_ref())
    }

    /// Wait for every background delivery spawned so far. Their results
    /// are already logged; this only guarantees they ran to completion.
    pub async fn settle(&self) {
        let handles = std::mem::take(&mut *self.background.lock());
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "background delivery task did not finish");
            }
        }
    }

    pub async fn submit(&self, payload: ContactPayload) -> SubmitOutcome {
        if let Err(e) = payload.validate() {
            tracing::debug!(error = %e, "submission rejected before sending");
            return SubmitOutcome::Rejected {
                reason: FIELDS_REQUIRED.to_string(),
            };
        }

        match self.strategy {
            DeliveryStrategy::RelayPrimary => self.submit_via_relay(payload).await,
            DeliveryStrategy::BackendPrimary => {
                match self.backend.attempt_deliver(&payload).await {
                    DeliveryOutcome::Delivered => SubmitOutcome::Sent,
                    DeliveryOutcome::Rejected { reason } => SubmitOutcome::Rejected { reason },
                    DeliveryOutcome::Failed { reason } => SubmitOutcome::Failed { reason },
                }
            }
            DeliveryStrategy::BackendWithLocalFallback => self.submit_with_fallback(payload).await,
        }
    }

    async fn submit_via_relay(&self, payload: ContactPayload) -> SubmitOutcome {
        match self.relay.attempt_deliver(&payload).await {
            DeliveryOutcome::Delivered => {
                let backend = Arc::clone(&self.backend);
                let handle = tokio::spawn(async move {
                    match backend.attempt_deliver(&payload).await {
                        DeliveryOutcome::Delivered => tracing::info!("submission also saved to backend"),
                        DeliveryOutcome::Failed { reason } | DeliveryOutcome::Rejected { reason } => {
                            tracing::warn!(%reason, "failed to save submission to backend")
                        }
                    }
                });
                self.background.lock().push(handle);
                SubmitOutcome::Sent
            }
            DeliveryOutcome::Rejected { reason } => SubmitOutcome::Rejected { reason },
            DeliveryOutcome::Failed { reason } => SubmitOutcome::Failed { reason },
        }
    }

    async fn submit_with_fallback(&self, payload: ContactPayload) -> SubmitOutcome {
        match self.backend.attempt_deliver(&payload).await {
            DeliveryOutcome::Delivered => {
                if let Err(e) = self.mount().await {
                    tracing::warn!(error = %e, "retry queue drain after delivery failed");
                }
                SubmitOutcome::Sent
            }
            DeliveryOutcome::Rejected { reason } => SubmitOutcome::Rejected { reason },
            DeliveryOutcome::Failed { reason } => {
                tracing::info!(%reason, "backend unreachable, queueing submission");
                match queue::enqueue(self.storage.as_ref(), payload) {
                    Ok(()) => SubmitOutcome::QueuedLocally,
                    Err(e) => {
                        tracing::error!(error = %e, "could not queue submission");
                        SubmitOutcome::Failed {
                            reason: "Message could not be sent or saved. Please try again.".to_string(),
                        }
                    }
                }
            }
        }
    }
}

/// Failure to build a [`ContactForm`] from configuration.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
    #[error(transparent)]
    Queue(#[from] QueueError),
}
