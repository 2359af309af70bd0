//! # Service Configuration
//!
//! Loaded once at startup from environment variables. Missing required
//! variables are collected and reported together so the operator sees every
//! absent name in one diagnostic; the process does not start.
//!
//! | Variable            | Required                         | Default  |
//! |---------------------|----------------------------------|----------|
//! | `DATABASE_URL`      | unless `FOLIO_STORE=memory`      | -        |
//! | `FOLIO_STORE`       | no (`postgres` or `memory`)      | postgres |
//! | `PORT`              | no                               | 5000     |
//! | `MAIL_API_URL`      | all three or none                | -        |
//! | `MAIL_API_TOKEN`    | all three or none                | -        |
//! | `MAIL_ADDRESS`      | all three or none                | -        |
//! | `MAIL_TIMEOUT_SECS` | no                               | 30       |

use url::Url;
use zeroize::Zeroizing;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAIL_TIMEOUT_SECS: u64 = 30;
const MAIL_VARS: [&str; 3] = ["MAIL_API_URL", "MAIL_API_TOKEN", "MAIL_ADDRESS"];

/// Where submissions and listings live.
#[derive(Clone)]
pub enum StoreBackend {
    /// Postgres via sqlx. The URL usually embeds credentials.
    Postgres { url: Zeroizing<String> },
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl std::fmt::Debug for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres { .. } => f
                .debug_struct("Postgres")
                .field("url", &"[REDACTED]")
                .finish(),
            Self::Memory => f.write_str("Memory"),
        }
    }
}

/// Credentials for the HTTP mail API used to notify the site owner.
#[derive(Clone)]
pub struct MailConfig {
    /// Endpoint that accepts a JSON message (`from`, `to`, `subject`, `text`, `html`).
    pub api_url: Url,
    pub api_token: Zeroizing<String>,
    /// Mailbox used both as sender and recipient.
    pub address: String,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &"[REDACTED]")
            .field("address", &self.address)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub store: StoreBackend,
    /// `None` disables email notification.
    pub mail: Option<MailConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: StoreBackend::Memory,
            mail: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// Empty values are treated as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut missing = Vec::new();

        let store_kind = get("FOLIO_STORE").unwrap_or_else(|| "postgres".to_string());
        let database_url = get("DATABASE_URL");
        let store = match store_kind.as_str() {
            "memory" => Some(StoreBackend::Memory),
            "postgres" => match database_url {
                Some(url) => Some(StoreBackend::Postgres {
                    url: Zeroizing::new(url),
                }),
                None => {
                    missing.push("DATABASE_URL".to_string());
                    None
                }
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    var: "FOLIO_STORE".into(),
                    value: other.into(),
                })
            }
        };

        let mail_values: Vec<Option<String>> = MAIL_VARS.iter().map(|v| get(*v)).collect();
        let mail_present = mail_values.iter().filter(|v| v.is_some()).count();
        if mail_present > 0 && mail_present < MAIL_VARS.len() {
            for (name, value) in MAIL_VARS.iter().zip(&mail_values) {
                if value.is_none() {
                    missing.push((*name).to_string());
                }
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }

        let mail = match mail_values.as_slice() {
            [Some(api_url), Some(api_token), Some(address)] => Some(MailConfig {
                api_url: Url::parse(api_url).map_err(|e| {
                    ConfigError::InvalidUrl("MAIL_API_URL".into(), e.to_string())
                })?,
                api_token: Zeroizing::new(api_token.clone()),
                address: address.clone(),
                timeout_secs: parse_or("MAIL_TIMEOUT_SECS", get("MAIL_TIMEOUT_SECS"), DEFAULT_MAIL_TIMEOUT_SECS)?,
            }),
            _ => None,
        };

        Ok(Self {
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
            store: store.unwrap_or(StoreBackend::Memory),
            mail,
        })
    }
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

/// Startup configuration errors. All are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
}
