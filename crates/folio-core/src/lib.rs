//! # folio-core: Foundational Types for the Folio Stack
//!
//! Shared by the HTTP service (`folio-api`), the delivery client and retry
//! queue (`folio-client`), and the `folio` CLI. Depends on nothing internal.
//!
//! ## Types
//!
//! - [`ContactPayload`]: the three-field contact form body. It is the request
//!   body of `POST /api/contact`, the form-relay body, and the shape of every
//!   retry-queue entry.
//! - [`ContactSubmission`]: a persisted payload with a store identifier and
//!   a server-assigned timestamp.
//! - [`ProjectListing`]: one portfolio project, read-only to the application.
//! - [`ContactReceipt`] / [`ErrorResponse`]: the JSON bodies the service
//!   answers with.
//!
//! ## Crate Policy
//!
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Validation is required-field only. Email format is never checked.

pub mod contact;
pub mod error;
pub mod project;

pub use contact::{ContactPayload, ContactReceipt, ContactSubmission, ErrorResponse};
pub use error::ValidationError;
pub use project::ProjectListing;
