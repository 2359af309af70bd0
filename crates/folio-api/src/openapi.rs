//! # OpenAPI Specification Assembly
//!
//! Serves the generated OpenAPI document at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Folio API",
        version = "0.1.0",
        description = "Portfolio project listings and contact-form submissions."
    ),
    paths(
        crate::routes::projects::list_projects,
        crate::routes::contact::submit_contact,
    ),
    components(schemas(
        folio_core::ProjectListing,
        folio_core::ContactPayload,
        folio_core::ContactReceipt,
        folio_core::ErrorResponse,
    )),
    tags(
        (name = "projects", description = "Portfolio project listings"),
        (name = "contact", description = "Contact form submissions"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
