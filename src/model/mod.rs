//! Demand-model boundary.
//!
//! The optimizer consumes demand prediction as a black-box capability: one
//! feature row in, one expected unit-demand estimate out. Nothing in this
//! crate trains a model or inspects its internals; the only requirement is
//! that feature names and category spellings match the training data.

mod linear;

pub use linear::{LinearArtifact, LinearDemandModel, NumericCoefficients};

use serde::Serialize;
use thiserror::Error;

use crate::types::{CustomerSegment, DayOfWeek, MarketContext, Weather};

/// One feature row sent to a demand model.
///
/// Field names mirror the training dataset columns exactly (`base_price`,
/// `competitor_price`, `inventory`, `user_type`, `weather`, `day_of_week`),
/// so a serialized row can be fed to any model trained on that dataset.
/// The product name is deliberately absent: it was never a model feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DemandInput {
    pub base_price: f64,
    pub competitor_price: f64,
    pub inventory: u32,
    pub user_type: CustomerSegment,
    pub weather: Weather,
    pub day_of_week: DayOfWeek,
}

impl DemandInput {
    /// Combine a candidate base price with the fixed market context.
    pub fn from_context(base_price: f64, context: &MarketContext) -> Self {
        Self {
            base_price,
            competitor_price: context.competitor_price,
            inventory: context.inventory,
            user_type: context.customer_segment,
            weather: context.weather,
            day_of_week: context.day_of_week,
        }
    }
}

/// Error surfaced when a model cannot produce a prediction.
///
/// The optimizer never retries or substitutes a default: a single failed
/// prediction aborts the whole run, so this carries enough detail to tell
/// the caller which model failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("demand model '{model}' failed: {message}")]
pub struct PredictionError {
    /// Name of the model that failed
    pub model: String,
    /// What went wrong
    pub message: String,
}

impl PredictionError {
    pub fn new(model: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            message: message.into(),
        }
    }
}

/// Errors loading or validating a model artifact from disk.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model artifact {path}: {source}")]
    Parse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("model artifact is missing the '{field}' weight for category {category:?}")]
    MissingCategory {
        field: &'static str,
        category: String,
    },

    #[error("model artifact contains a non-finite weight for '{field}'")]
    NonFiniteWeight { field: String },
}

/// A fitted demand model, consumed as an opaque prediction capability.
///
/// Implementations are expected to be pure: the optimizer calls `predict`
/// once per grid point and trusts the result. Output is NOT assumed
/// non-negative; clamping happens on the caller side.
pub trait DemandModel: Send + Sync {
    /// Predict expected unit demand for one feature row.
    fn predict(&self, input: &DemandInput) -> Result<f64, PredictionError>;

    /// Human-readable model name for logging and the health endpoint.
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_row_uses_training_column_names() {
        let input = DemandInput {
            base_price: 45.0,
            competitor_price: 250.0,
            inventory: 100,
            user_type: CustomerSegment::ImpulseBuyer,
            weather: Weather::Cloudy,
            day_of_week: DayOfWeek::Friday,
        };
        let v = serde_json::to_value(input).unwrap();
        assert_eq!(v["base_price"], 45.0);
        assert_eq!(v["competitor_price"], 250.0);
        assert_eq!(v["inventory"], 100);
        assert_eq!(v["user_type"], "Impulse Buyer");
        assert_eq!(v["weather"], "Cloudy");
        assert_eq!(v["day_of_week"], "Friday");
    }

    #[test]
    fn from_context_carries_every_context_field() {
        let ctx = MarketContext {
            competitor_price: 199.0,
            inventory: 42,
            customer_segment: CustomerSegment::PriceSensitive,
            weather: Weather::Snowy,
            day_of_week: DayOfWeek::Sunday,
        };
        let input = DemandInput::from_context(80.0, &ctx);
        assert_eq!(input.base_price, 80.0);
        assert_eq!(input.competitor_price, 199.0);
        assert_eq!(input.inventory, 42);
        assert_eq!(input.user_type, CustomerSegment::PriceSensitive);
        assert_eq!(input.weather, Weather::Snowy);
        assert_eq!(input.day_of_week, DayOfWeek::Sunday);
    }
}
