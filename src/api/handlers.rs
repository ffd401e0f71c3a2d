//! API route handlers.
//!
//! Request handling for the pricing dashboard: running a simulation,
//! serving the product catalog and active defaults, and hot-swapping the
//! model artifact. Handlers translate between HTTP payloads and the
//! optimizer; no pricing logic lives here.

use std::sync::Arc;

use arc_swap::ArcSwap;
use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::envelope::{ApiErrorResponse, ApiResponse};
use crate::catalog::PRODUCT_CATALOG;
use crate::config::AppConfig;
use crate::model::{DemandModel, LinearDemandModel, ModelError};
use crate::optimization::{optimize_price, OptimizeError};
use crate::report::{ChartSeries, KpiSummary};
use crate::types::{MarketContext, PriceSample};

// ============================================================================
// API State
// ============================================================================

/// Shared state for API handlers.
#[derive(Clone)]
pub struct DashboardState {
    /// Active demand model; swapped atomically on reload
    pub model: Arc<ArcSwap<LinearDemandModel>>,
    /// Startup time for the health endpoint
    pub started_at: DateTime<Utc>,
}

impl DashboardState {
    pub fn new(model: LinearDemandModel) -> Self {
        Self {
            model: Arc::new(ArcSwap::from_pointee(model)),
            started_at: Utc::now(),
        }
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

/// Body of `POST /api/v1/optimize`.
///
/// The market context is required; range and step fall back to the
/// configured optimizer defaults when omitted.
#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    /// Optional product label for the report (never a model feature)
    #[serde(default)]
    pub product: Option<String>,

    #[serde(flatten)]
    pub context: MarketContext,

    /// Override for the search range as `[min, max]`
    #[serde(default)]
    pub price_range: Option<(f64, f64)>,

    /// Override for the grid spacing
    #[serde(default)]
    pub step: Option<f64>,
}

/// Body of a successful `POST /api/v1/optimize` response.
#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    pub summary: KpiSummary,
    pub samples: Vec<PriceSample>,
    pub chart: ChartSeries,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub uptime_seconds: i64,
}

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub price_min: f64,
    pub price_max: f64,
    pub step: f64,
    pub competitor_price_default: f64,
    pub inventory_default: u32,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub model: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/v1/health`
pub async fn get_health(State(state): State<DashboardState>) -> Response {
    let model = state.model.load();
    ApiResponse::ok(HealthResponse {
        status: "ok",
        model: model.model_name().to_string(),
        uptime_seconds: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// `GET /api/v1/products`
pub async fn get_products() -> Response {
    ApiResponse::ok(&PRODUCT_CATALOG[..])
}

/// `GET /api/v1/config`
pub async fn get_config() -> Response {
    let cfg = AppConfig::active();
    ApiResponse::ok(ConfigResponse {
        price_min: cfg.optimizer.price_min,
        price_max: cfg.optimizer.price_max,
        step: cfg.optimizer.step,
        competitor_price_default: cfg.market.competitor_price,
        inventory_default: cfg.market.inventory,
    })
}

/// `POST /api/v1/optimize`
///
/// Runs one grid search with the active model. Range errors map to 400,
/// model failures to 502; no partial tables are ever returned.
pub async fn run_optimization(
    State(state): State<DashboardState>,
    Json(req): Json<OptimizeRequest>,
) -> Response {
    if let Err(problems) = req.context.validate() {
        return ApiErrorResponse::bad_request(problems.join("; "));
    }

    let cfg = AppConfig::active();
    let range = req
        .price_range
        .unwrap_or((cfg.optimizer.price_min, cfg.optimizer.price_max));
    let step = req.step.unwrap_or(cfg.optimizer.step);

    let model = state.model.load_full();
    match optimize_price(&req.context, model.as_ref(), range, step) {
        Ok(result) => {
            info!(
                product = req.product.as_deref().unwrap_or("-"),
                best_price = result.best.price,
                best_revenue = result.best.revenue,
                points = result.samples.len(),
                "Simulation complete"
            );
            let summary = KpiSummary::from_result(&result);
            let chart = ChartSeries::from_result(&result);
            ApiResponse::ok(OptimizeResponse {
                product: req.product,
                summary,
                chart,
                samples: result.samples,
            })
        }
        Err(e @ OptimizeError::InvalidRange(_)) => ApiErrorResponse::bad_request(e.to_string()),
        Err(e @ OptimizeError::Prediction { .. }) => {
            warn!(error = %e, "Demand model failed during simulation");
            ApiErrorResponse::bad_gateway(e.to_string())
        }
    }
}

/// `POST /api/v1/model/reload`
///
/// Re-read the configured artifact and swap it in atomically. In-flight
/// simulations keep the model they started with.
pub async fn reload_model(State(state): State<DashboardState>) -> Response {
    let cfg = AppConfig::active();
    let Some(path) = cfg.model.artifact_path.as_deref() else {
        return ApiErrorResponse::service_unavailable(
            "no model artifact configured; running the built-in model",
        );
    };

    match LinearDemandModel::load(path) {
        Ok(model) => {
            let name = model.model_name().to_string();
            state.model.store(Arc::new(model));
            info!(model = %name, "Demand model reloaded");
            ApiResponse::ok(ReloadResponse { model: name })
        }
        Err(e) => {
            warn!(error = %e, "Model reload failed; keeping the active model");
            match &e {
                // An unreadable artifact means the capability is absent,
                // not that the service broke.
                ModelError::Io { .. } => ApiErrorResponse::service_unavailable(e.to_string()),
                _ => ApiErrorResponse::internal(e.to_string()),
            }
        }
    }
}
