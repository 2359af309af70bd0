//! Client configuration.
//!
//! Every variable is optional. Defaults target a backend on the local
//! machine and the public form relay.
//!
//! | Variable                 | Default                            |
//! |--------------------------|------------------------------------|
//! | `FOLIO_API_URL`          | `http://localhost:5000`            |
//! | `FOLIO_RELAY_URL`        | `https://formspree.io/f/manoganz`  |
//! | `FOLIO_QUEUE_DIR`        | unset: queue kept in memory        |
//! | `FOLIO_STRATEGY`         | `backend-with-local-fallback`      |
//! | `FOLIO_REJECTION_POLICY` | `drop`                             |
//! | `FOLIO_TIMEOUT_SECS`     | 10                                 |

use std::path::PathBuf;

use url::Url;

use crate::strategy::{DeliveryStrategy, RejectionPolicy};

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_RELAY_URL: &str = "https://formspree.io/f/manoganz";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the folio service; `/api/...` paths are appended.
    pub api_url: Url,
    /// Full URL of the form relay endpoint.
    pub relay_url: Url,
    /// Directory holding the persisted queue. `None` keeps it in memory.
    pub queue_dir: Option<PathBuf>,
    pub strategy: DeliveryStrategy,
    pub rejection_policy: RejectionPolicy,
    pub timeout_secs: u64,
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source. Empty values
    /// are treated as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Ok(Self {
            api_url: parse_url("FOLIO_API_URL", get("FOLIO_API_URL").as_deref().unwrap_or(DEFAULT_API_URL))?,
            relay_url: parse_url("FOLIO_RELAY_URL", get("FOLIO_RELAY_URL").as_deref().unwrap_or(DEFAULT_RELAY_URL))?,
            queue_dir: get("FOLIO_QUEUE_DIR").map(PathBuf::from),
            strategy: parse_or("FOLIO_STRATEGY", get("FOLIO_STRATEGY"), DeliveryStrategy::default())?,
            rejection_policy: parse_or(
                "FOLIO_REJECTION_POLICY",
                get("FOLIO_REJECTION_POLICY"),
                RejectionPolicy::default(),
            )?,
            timeout_secs: parse_or("FOLIO_TIMEOUT_SECS", get("FOLIO_TIMEOUT_SECS"), DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn parse_or<T: std::str::FromStr>(var: &str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}
