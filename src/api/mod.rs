//! HTTP dashboard API.
//!
//! The web-facing counterpart of the CLI report: callers submit a market
//! context, the optimizer runs with the active model, and the response
//! carries KPIs, the full sample table, and chart series.

pub mod envelope;
pub mod handlers;
pub mod routes;

pub use handlers::DashboardState;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the complete application router with CORS and request tracing.
pub fn create_app(state: DashboardState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes(state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
