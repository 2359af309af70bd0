//! Client error types.

/// Errors from a single HTTP call to the backend or the form relay.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    /// Transport failure: connection refused, DNS, timeout.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The endpoint answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    ApiError {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// A 2xx response whose body did not have the expected shape.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
}

impl DeliveryError {
    /// `true` for failures that may succeed on a later attempt.
    ///
    /// 4xx answers are permanent; transport failures and 5xx are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::ApiError { status, .. } => !(400..500).contains(status),
            Self::Deserialization { .. } => false,
        }
    }

    /// Text suitable for showing to the person who filled in the form.
    ///
    /// Both the backend and the relay answer errors as `{"error": "..."}`;
    /// that field is preferred over the raw body.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http { .. } => "Could not reach the server. Please try again.".to_string(),
            Self::ApiError { body, .. } => error_field(body)
                .unwrap_or_else(|| "An error occurred. Please try again.".to_string()),
            Self::Deserialization { .. } => "Unexpected response from the server.".to_string(),
        }
    }
}

fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_string)
}

/// Errors reading or writing the local retry queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("queue storage I/O failed for {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("queue block is not a valid submission list: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status: u16, body: &str) -> DeliveryError {
        DeliveryError::ApiError {
            endpoint: "POST /api/contact".into(),
            status,
            body: body.into(),
        }
    }

    #[test]
    fn client_errors_are_permanent_server_errors_are_not() {
        assert!(!api_error(400, "").is_retryable());
        assert!(!api_error(422, "").is_retryable());
        assert!(api_error(500, "").is_retryable());
        assert!(api_error(503, "").is_retryable());
    }

    #[test]
    fn user_message_prefers_error_field() {
        let err = api_error(400, r#"{"error":"All fields are required"}"#);
        assert_eq!(err.user_message(), "All fields are required");
    }

    #[test]
    fn user_message_falls_back_for_unstructured_body() {
        let err = api_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.user_message(), "An error occurred. Please try again.");
    }
}
