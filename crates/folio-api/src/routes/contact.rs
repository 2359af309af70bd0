//! # Submission Service
//!
//! `POST /api/contact` validates the three required fields, persists the
//! submission, then hands it to the mail relay as a detached task. A relay
//! failure after a successful write still answers 200; a write failure
//! answers 500 and the submission is lost on this side.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use folio_core::{ContactPayload, ContactReceipt, ContactSubmission};

use crate::error::AppError;
use crate::extractors::extract_validated_json;
use crate::notify::spawn_notification;
use crate::state::AppState;

pub const PROCESS_FAILED: &str = "Failed to process message";
pub const SAVED: &str = "Message sent and saved successfully";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/contact", post(submit_contact))
}

/// POST /api/contact: Record a contact form submission.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Submission saved", body = ContactReceipt),
        (status = 400, description = "A required field is missing", body = folio_core::ErrorResponse),
        (status = 500, description = "Store unreachable", body = folio_core::ErrorResponse),
    ),
    tag = "contact"
)]
pub(crate) async fn submit_contact(
    State(state): State<AppState>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> Result<Json<ContactReceipt>, AppError> {
    let payload = extract_validated_json(body)?;
    let submission = ContactSubmission::accept(payload, Utc::now())?;

    let id = state
        .store
        .insert_contact(&submission)
        .await
        .map_err(|e| AppError::store(PROCESS_FAILED, e))?;
    state.metrics.record_submission();
    tracing::info!(contact_id = %id, "contact submission saved");

    if let Some(relay) = &state.mail {
        // Detached: the response does not wait for, or depend on, the relay.
        spawn_notification(relay.clone(), submission, state.metrics.clone());
    }

    Ok(Json(ContactReceipt {
        message: SAVED.to_string(),
        id,
    }))
}
