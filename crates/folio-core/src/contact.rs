//! # Contact Submissions
//!
//! A contact form payload moves through three shapes:
//!
//! 1. [`ContactPayload`]: collected by the form, sent to the service or the
//!    relay, and held verbatim in the client retry queue.
//! 2. [`ContactSubmission`]: the payload after the store accepted it, with an
//!    identifier and a `created_at` assigned server-side.
//! 3. [`ContactReceipt`]: what the service hands back on success.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// The three-field contact form body.
///
/// Absent and `null` JSON fields deserialize to empty strings so that they
/// are rejected by the same [`validate`](Self::validate) check as an empty
/// field rather than by the JSON decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactPayload {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// Not validated for format.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl ContactPayload {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Names of fields that are empty. Content is not inspected further, so
    /// a field holding only spaces counts as present.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Required-field check. Nothing beyond non-emptiness is enforced.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::MissingFields(missing))
        }
    }
}

/// A contact payload accepted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactSubmission {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactSubmission {
    /// Stamp a validated payload with a fresh identifier and `created_at`.
    pub fn accept(payload: ContactPayload, created_at: DateTime<Utc>) -> Result<Self, ValidationError> {
        payload.validate()?;
        Ok(Self {
            id: Uuid::new_v4(),
            name: payload.name,
            email: payload.email,
            message: payload.message,
            created_at,
        })
    }

    /// The payload this submission was created from.
    pub fn payload(&self) -> ContactPayload {
        ContactPayload::new(&self.name, &self.email, &self.message)
    }
}

/// Success body of `POST /api/contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ContactReceipt {
    pub message: String,
    pub id: Uuid,
}

/// Error body shared by every failing endpoint and by the form relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
