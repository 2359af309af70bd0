//! # Middleware
//!
//! - `metrics`: request, error, and submission counters.

pub mod metrics;
