//! # folio-cli: Command-Line Client for the Folio Service
//!
//! ## Subcommands
//!
//! - `projects`: print the project listings
//! - `contact`: retry anything queued, then send one message
//! - `drain`: retry anything queued
//! - `queue`: show what is waiting for a retry
//!
//! Argument parsing lives in `main.rs`; the handlers here take parsed
//! arguments and return a process exit code.

pub mod client_args;
pub mod contact;
pub mod projects;
pub mod queue;
