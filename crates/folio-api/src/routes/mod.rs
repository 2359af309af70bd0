//! # API Route Modules
//!
//! - `projects`: `GET /api/projects`, the listing service.
//! - `contact`: `POST /api/contact`, the submission service.

pub mod contact;
pub mod projects;
