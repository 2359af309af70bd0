//! # Listing Service
//!
//! Serves every project listing in store order. Store failures are not
//! retried; the client gets a generic 500.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use folio_core::ProjectListing;

use crate::error::AppError;
use crate::state::AppState;

pub const FETCH_FAILED: &str = "Failed to fetch projects";

pub fn router() -> Router<AppState> {
    Router::new().route("/api/projects", get(list_projects))
}

/// GET /api/projects: List all portfolio projects.
#[utoipa::path(
    get,
    path = "/api/projects",
    responses(
        (status = 200, description = "All project listings", body = [ProjectListing]),
        (status = 500, description = "Store unreachable", body = folio_core::ErrorResponse),
    ),
    tag = "projects"
)]
pub(crate) async fn list_projects(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectListing>>, AppError> {
    let projects = state
        .store
        .list_projects()
        .await
        .map_err(|e| AppError::store(FETCH_FAILED, e))?;

    tracing::debug!(count = projects.len(), "listed projects");
    Ok(Json(projects))
}
