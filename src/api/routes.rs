//! API route definitions
//!
//! Endpoints for the pricing dashboard:
//! - /api/v1/health - liveness and active model
//! - /api/v1/products - product catalog
//! - /api/v1/config - active optimizer defaults
//! - /api/v1/optimize - run a price simulation
//! - /api/v1/model/reload - hot-swap the model artifact

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{self, DashboardState};

/// Create all API routes for the dashboard
pub fn api_routes(state: DashboardState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/products", get(handlers::get_products))
        .route("/config", get(handlers::get_config))
        .route("/optimize", post(handlers::run_optimization))
        .route("/model/reload", post(handlers::reload_model))
        .with_state(state)
}
