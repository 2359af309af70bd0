//! # Email Notification Relay
//!
//! Tells the site owner about a new submission by POSTing a JSON message to
//! an HTTP mail API. Sender and recipient are both the configured mailbox.
//!
//! Notification is best-effort. The persisted row is the durability
//! guarantee; [`spawn_notification`] runs the send as a detached task whose
//! result is logged and discarded, so a relay outage never changes the
//! response of `POST /api/contact`.

use std::sync::Arc;
use std::time::Duration;

use folio_core::ContactSubmission;
use serde::Serialize;
use url::Url;

use crate::config::MailConfig;
use crate::middleware::metrics::ApiMetrics;

/// Errors from the mail API.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error calling mail API: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mail API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("mail relay misconfigured: {0}")]
    Config(String),
}

/// Body accepted by the mail API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl MailMessage {
    /// Render the owner notification for one submission.
    pub fn for_submission(address: &str, submission: &ContactSubmission) -> Self {
        let text = format!(
            "Name: {}\nEmail: {}\nMessage: {}\n",
            submission.name, submission.email, submission.message
        );
        let html = format!(
            "<h2>New Contact Form Submission</h2>\n\
             <p><strong>Name:</strong> {}</p>\n\
             <p><strong>Email:</strong> {}</p>\n\
             <p><strong>Message:</strong> {}</p>\n",
            escape_html(&submission.name),
            escape_html(&submission.email),
            escape_html(&submission.message),
        );
        Self {
            from: address.to_string(),
            to: address.to_string(),
            subject: format!("New Contact Form Submission from {}", submission.name),
            text,
            html,
        }
    }
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// HTTP mail API client.
#[derive(Debug, Clone)]
pub struct MailRelay {
    http: reqwest::Client,
    api_url: Url,
    address: String,
}

impl MailRelay {
    pub fn new(config: &MailConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                headers.insert(
                    reqwest::header::AUTHORIZATION,
                    reqwest::header::HeaderValue::from_str(&format!(
                        "Bearer {}",
                        config.api_token.as_str()
                    ))
                    .map_err(|_| NotifyError::Config("invalid API token characters".into()))?,
                );
                headers
            })
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            address: config.address.clone(),
        })
    }

    /// Send the owner notification for `submission`.
    pub async fn send(&self, submission: &ContactSubmission) -> Result<(), NotifyError> {
        let message = MailMessage::for_submission(&self.address, submission);
        let resp = self
            .http
            .post(self.api_url.clone())
            .json(&message)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api { status, body });
        }
        Ok(())
    }
}

/// Fire-and-forget notification. The handle is returned for tests only;
/// request handlers drop it.
pub fn spawn_notification(
    relay: Arc<MailRelay>,
    submission: ContactSubmission,
    metrics: ApiMetrics,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        match relay.send(&submission).await {
            Ok(()) => tracing::info!(contact_id = %submission.id, "owner notified by email"),
            Err(e) => {
                metrics.record_notification_failure();
                tracing::warn!(contact_id = %submission.id, error = %e, "email notification failed");
            }
        }
    })
}
