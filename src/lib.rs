//! PriceWise: AI-Powered Pricing Advisor
//!
//! Turns market conditions into a revenue-maximizing price recommendation.
//!
//! ## Architecture
//!
//! - **Optimizer**: bounded grid search querying a demand model once per
//!   candidate price and reducing to the arg-max revenue sample
//! - **Demand model boundary**: a black-box `predict(features) -> demand`
//!   capability; a linear-regression artifact adapter ships in-tree
//! - **Reporting**: KPI summary, text table, and chart series derived from
//!   the sample table, decoupled from the search
//! - **Dashboard API**: axum service exposing the simulator over HTTP

pub mod api;
pub mod catalog;
pub mod config;
pub mod model;
pub mod optimization;
pub mod report;
pub mod types;

// Re-export configuration
pub use config::AppConfig;

// Re-export commonly used types
pub use types::{
    CustomerSegment, DayOfWeek, MarketContext, OptimizationResult, PriceSample, Weather,
};

// Re-export the model boundary
pub use model::{DemandInput, DemandModel, LinearDemandModel, ModelError, PredictionError};

// Re-export the optimizer entry points
pub use optimization::{optimize_on_grid, optimize_price, InvalidRangeError, OptimizeError, PriceGrid};
