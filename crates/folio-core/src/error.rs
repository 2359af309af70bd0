//! # Error Types
//!
//! Validation is the only failure the domain types can produce.

use thiserror::Error;

/// A contact payload failed the required-field check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// One or more of `name`, `email`, `message` is missing or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

impl ValidationError {
    /// Names of the offending fields, in declaration order.
    pub fn fields(&self) -> &[&'static str] {
        match self {
            Self::MissingFields(fields) => fields,
        }
    }
}
