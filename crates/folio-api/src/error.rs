//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Every failure answers with the same body shape, `{"error": "..."}`.
//! Server-side detail is logged and never crosses the boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::ErrorResponse;
use thiserror::Error;

use crate::store::StoreError;

/// Public message for any rejected contact payload.
pub const FIELDS_REQUIRED: &str = "All fields are required";

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request was rejected before reaching the store (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// A dependency failed (500). `public` is the only text the client sees.
    #[error("{public}: {detail}")]
    Internal { public: &'static str, detail: String },
}

impl AppError {
    /// Wrap a store failure behind a generic client-facing message.
    pub fn store(public: &'static str, err: StoreError) -> Self {
        Self::Internal {
            public,
            detail: err.to_string(),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::Internal { public, detail } => {
                tracing::error!(error = %detail, "{public}");
                (*public).to_string()
            }
        };
        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<folio_core::ValidationError> for AppError {
    fn from(err: folio_core::ValidationError) -> Self {
        tracing::debug!(error = %err, "contact payload rejected");
        Self::BadRequest(FIELDS_REQUIRED.to_string())
    }
}
