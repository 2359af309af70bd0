//! # folio-api: Axum Service for the Folio Portfolio
//!
//! Two handlers wrapping a store and a mail relay.
//!
//! ## API Surface
//!
//! | Route                   | Module                 | Purpose                         |
//! |-------------------------|------------------------|---------------------------------|
//! | `GET /api/projects`     | [`routes::projects`]   | List portfolio projects         |
//! | `POST /api/contact`     | [`routes::contact`]    | Save a contact form submission  |
//! | `GET /openapi.json`     | [`openapi`]            | Generated OpenAPI document      |
//! | `GET /metrics`          | [`middleware::metrics`]| Request and submission counters |
//! | `GET /health/liveness`  | this module            | Process is up                   |
//! | `GET /health/readiness` | this module            | Store is reachable              |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! CorsLayer → TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! CORS is permissive: the portfolio frontend is served from another origin.

pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod notify;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod store;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::projects::router())
        .merge(routes::contact::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_snapshot))
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .layer(from_fn_with_state(
            state.clone(),
            middleware::metrics::metrics_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 "ready" when the store answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    match state.store.health_check().await {
        Ok(()) => (StatusCode::OK, "ready").into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "store health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "store unreachable").into_response()
        }
    }
}
