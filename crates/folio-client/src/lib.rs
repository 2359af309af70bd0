//! # folio-client: Contact-Form Client for the Folio Service
//!
//! Sends contact form submissions to the folio backend or to a third-party
//! form relay, and keeps undeliverable submissions in a client-local retry
//! queue that is drained when the form is next shown.
//!
//! ## Modules
//!
//! - [`delivery`]: HTTP clients and the [`Deliverer`] seam.
//! - [`queue`]: the persisted retry queue (`enqueue`, `drain`).
//! - [`storage`]: where the queue block lives.
//! - [`strategy`]: delivery and rejection policies.
//! - [`form`]: [`ContactForm`], tying the above together.
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_client::{ClientConfig, ContactForm};
//! use folio_core::ContactPayload;
//!
//! let form = ContactForm::from_config(&ClientConfig::from_env()?)?;
//! form.mount().await?;
//! let outcome = form.submit(ContactPayload::new("Ada", "ada@example.com", "Hello")).await;
//! println!("{}", outcome.message());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod form;
pub mod queue;
pub mod storage;
pub mod strategy;

pub use config::ClientConfig;
pub use delivery::{BackendClient, Deliverer, DeliveryOutcome, RelayClient};
pub use error::{DeliveryError, QueueError};
pub use form::{ContactForm, FormError, SubmitOutcome};
pub use queue::{DrainReport, RetryQueueState, QUEUE_KEY};
pub use storage::{FileStorage, MemoryStorage, QueueStorage};
pub use strategy::{DeliveryStrategy, RejectionPolicy};
