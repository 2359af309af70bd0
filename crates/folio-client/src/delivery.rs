//! # Delivery Clients
//!
//! Typed HTTP clients for the two places a contact payload can go:
//!
//! | Client           | Call                       | Purpose                     |
//! |------------------|----------------------------|-----------------------------|
//! | [`BackendClient`]| `POST {api}/api/contact`   | Persist in the folio store  |
//! | [`BackendClient`]| `GET {api}/api/projects`   | Read the project listings   |
//! | [`RelayClient`]  | `POST {relay}`             | Third-party form relay      |
//!
//! Both implement [`Deliverer`], which reduces a call to a
//! [`DeliveryOutcome`]: the only thing the queue and the form care about.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::{ContactPayload, ContactReceipt, ProjectListing};
use url::Url;

use crate::error::DeliveryError;

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 2xx from the destination.
    Delivered,
    /// Transport error or 5xx. Worth retrying.
    Failed { reason: String },
    /// 4xx. The destination refused the payload itself.
    Rejected { reason: String },
}

impl DeliveryOutcome {
    fn from_error(err: &DeliveryError) -> Self {
        let reason = err.user_message();
        if err.is_retryable() {
            Self::Failed { reason }
        } else {
            Self::Rejected { reason }
        }
    }
}

/// Anything that can attempt to deliver a contact payload.
#[async_trait]
pub trait Deliverer: Send + Sync {
    /// One attempt, bounded only by the HTTP client timeout.
    async fn attempt_deliver(&self, payload: &ContactPayload) -> DeliveryOutcome;
}

fn http_client(timeout: Duration) -> Result<reqwest::Client, DeliveryError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| DeliveryError::Http {
            endpoint: "client_init".into(),
            source: e,
        })
}

async fn error_for_status(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<reqwest::Response, DeliveryError> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status().as_u16();
    let body = resp.text().await.unwrap_or_default();
    Err(DeliveryError::ApiError {
        endpoint: endpoint.into(),
        status,
        body,
    })
}

/// Client for the folio service.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &Url, timeout: Duration) -> Result<Self, DeliveryError> {
        Ok(Self {
            http: http_client(timeout)?,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
        })
    }

    /// Calls `POST {base_url}/api/contact`.
    pub async fn submit(&self, payload: &ContactPayload) -> Result<ContactReceipt, DeliveryError> {
        let endpoint = "POST /api/contact";
        let url = format!("{}/api/contact", self.base_url);

        let resp = self
            .http
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = error_for_status(endpoint, resp).await?;

        resp.json().await.map_err(|e| DeliveryError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }

    /// Calls `GET {base_url}/api/projects`.
    pub async fn list_projects(&self) -> Result<Vec<ProjectListing>, DeliveryError> {
        let endpoint = "GET /api/projects";
        let url = format!("{}/api/projects", self.base_url);

        let resp = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| DeliveryError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        let resp = error_for_status(endpoint, resp).await?;

        resp.json().await.map_err(|e| DeliveryError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}

#[async_trait]
impl Deliverer for BackendClient {
    async fn attempt_deliver(&self, payload: &ContactPayload) -> DeliveryOutcome {
        match self.submit(payload).await {
            Ok(receipt) => {
                tracing::debug!(contact_id = %receipt.id, "backend accepted submission");
                DeliveryOutcome::Delivered
            }
            // The status was 2xx; the record exists whatever the body says.
            Err(DeliveryError::Deserialization { .. }) => DeliveryOutcome::Delivered,
            Err(e) => {
                tracing::debug!(error = %e, "backend delivery attempt failed");
                DeliveryOutcome::from_error(&e)
            }
        }
    }
}

/// Client for the third-party form relay.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    url: Url,
}

impl RelayClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, DeliveryError> {
        Ok(Self {
            http: http_client(timeout)?,
            url,
        })
    }

    /// POST the payload as JSON. The relay answers JSON when asked to.
    pub async fn send(&self, payload: &ContactPayload) -> Result<(), DeliveryError> {
        let endpoint = "POST relay";

        let resp = self
            .http
            .post(self.url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;
        error_for_status(endpoint, resp).await?;
        Ok(())
    }
}

#[async_trait]
impl Deliverer for RelayClient {
    async fn attempt_deliver(&self, payload: &ContactPayload) -> DeliveryOutcome {
        match self.send(payload).await {
            Ok(()) => DeliveryOutcome::Delivered,
            Err(e) => {
                tracing::debug!(error = %e, "relay delivery attempt failed");
                DeliveryOutcome::from_error(&e)
            }
        }
    }
}
