//! How a new submission travels, and what a drain does with refused entries.

use std::fmt;
use std::str::FromStr;

/// Delivery policy fixed when a [`crate::ContactForm`] is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryStrategy {
    /// Send to the form relay. On success, also post to the backend as a
    /// detached task whose result is only logged. Nothing is queued.
    RelayPrimary,
    /// Send to the backend only. Nothing is queued.
    BackendPrimary,
    /// Send to the backend; a retryable failure is queued locally and
    /// retried on the next drain.
    #[default]
    BackendWithLocalFallback,
}

impl DeliveryStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelayPrimary => "relay-primary",
            Self::BackendPrimary => "backend-primary",
            Self::BackendWithLocalFallback => "backend-with-local-fallback",
        }
    }
}

impl fmt::Display for DeliveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStrategy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "relay-primary" => Ok(Self::RelayPrimary),
            "backend-primary" => Ok(Self::BackendPrimary),
            "backend-with-local-fallback" => Ok(Self::BackendWithLocalFallback),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// What a drain does with a queued entry the backend refuses with a 4xx.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejectionPolicy {
    /// Remove the entry and log a warning. A refused payload would be
    /// refused on every later drain too.
    #[default]
    Drop,
    /// Keep the entry queued, like a transport failure.
    Requeue,
}

impl FromStr for RejectionPolicy {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "drop" => Ok(Self::Drop),
            "requeue" => Ok(Self::Requeue),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown value {0:?}")]
pub struct UnknownVariant(pub String);
