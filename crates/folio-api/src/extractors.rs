//! # Custom Extractors & Validation
//!
//! Maps JSON body rejections to the service's own 400 shape instead of
//! axum's plain-text rejection, then runs the payload's required-field check.
//! The decoder's message is logged only; clients always see
//! [`FIELDS_REQUIRED`].

use axum::extract::rejection::JsonRejection;
use axum::Json;
use folio_core::ContactPayload;

use crate::error::{AppError, FIELDS_REQUIRED};

/// Request types whose rules go beyond what serde checks.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

impl Validate for ContactPayload {
    fn validate(&self) -> Result<(), AppError> {
        ContactPayload::validate(self).map_err(AppError::from)
    }
}

/// Extract a JSON body, mapping every rejection to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result.map(|Json(v)| v).map_err(|err| {
        tracing::debug!(status = %err.status(), error = %err.body_text(), "rejected request body");
        AppError::BadRequest(FIELDS_REQUIRED.to_string())
    })
}

/// Extract a JSON body and validate it using the [`Validate`] trait.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T, AppError> {
    let value = extract_json(result)?;
    value.validate()?;
    Ok(value)
}
