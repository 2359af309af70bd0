//! # Retry Queue
//!
//! Contact payloads whose delivery failed, persisted as a single JSON array
//! under [`QUEUE_KEY`]. Every operation reads the whole block and writes the
//! whole block back; there is no per-entry access.
//!
//! ## Entry lifecycle
//!
//! ```text
//! attempt ─ Delivered ──────────────────────────────▶ (gone)
//!    └──── Failed ──▶ enqueue ──▶ drain ─ Delivered ▶ (gone)
//!                                   ├──── Failed ───▶ stays, same relative order
//!                                   └──── Rejected ─▶ RejectionPolicy
//! ```
//!
//! There is no deduplication, no backoff, no attempt limit and no size
//! limit. Two processes sharing one storage directory are not coordinated.

use folio_core::ContactPayload;

use crate::delivery::{Deliverer, DeliveryOutcome};
use crate::error::QueueError;
use crate::storage::QueueStorage;
use crate::strategy::RejectionPolicy;

/// Storage key of the persisted queue block.
pub const QUEUE_KEY: &str = "pendingContacts";

/// The persisted queue, oldest entry first.
pub type RetryQueueState = Vec<ContactPayload>;

/// Read the queue. A missing block is an empty queue.
pub fn load(storage: &dyn QueueStorage) -> Result<RetryQueueState, QueueError> {
    match storage.get(QUEUE_KEY)? {
        Some(block) => Ok(serde_json::from_str(&block)?),
        None => Ok(Vec::new()),
    }
}

/// Replace the queue with `state` in one storage write.
pub fn save(storage: &dyn QueueStorage, state: &[ContactPayload]) -> Result<(), QueueError> {
    let block = serde_json::to_string(state)?;
    storage.set(QUEUE_KEY, &block)
}

/// Append one payload to the end of the queue.
pub fn enqueue(storage: &dyn QueueStorage, payload: ContactPayload) -> Result<(), QueueError> {
    let mut state = load(storage)?;
    state.push(payload);
    save(storage, &state)?;
    tracing::info!(pending = state.len(), "submission queued for retry");
    Ok(())
}

/// Counts from one [`drain`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub attempted: usize,
    pub delivered: usize,
    /// Entries left in the queue after the pass.
    pub remaining: usize,
    /// Rejected entries removed under [`RejectionPolicy::Drop`].
    pub dropped: usize,
}

/// Attempt every queued entry once, oldest first, one at a time, then
/// write back only the entries that must stay.
///
/// An empty queue makes no delivery calls and no storage write.
pub async fn drain(
    storage: &dyn QueueStorage,
    deliverer: &dyn Deliverer,
    policy: RejectionPolicy,
) -> Result<DrainReport, QueueError> {
    let state = load(storage)?;
    if state.is_empty() {
        return Ok(DrainReport::default());
    }

    let mut report = DrainReport {
        attempted: state.len(),
        ..DrainReport::default()
    };
    let mut keep = Vec::with_capacity(state.len());

    for payload in state {
        match deliverer.attempt_deliver(&payload).await {
            DeliveryOutcome::Delivered => report.delivered += 1,
            DeliveryOutcome::Failed { .. } => keep.push(payload),
            DeliveryOutcome::Rejected { reason } => match policy {
                RejectionPolicy::Drop => {
                    tracing::warn!(%reason, "dropping queued submission refused by backend");
                    report.dropped += 1;
                }
                RejectionPolicy::Requeue => keep.push(payload),
            },
        }
    }

    report.remaining = keep.len();
    save(storage, &keep)?;
    tracing::info!(
        attempted = report.attempted,
        delivered = report.delivered,
        dropped = report.dropped,
        remaining = report.remaining,
        "retry queue drained"
    );
    Ok(report)
}
