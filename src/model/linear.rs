//! Linear-regression demand model loaded from a JSON artifact.
//!
//! The training pipeline exports a fitted linear regression as a flat JSON
//! document: an intercept, one coefficient per numeric feature, and one
//! weight per category of each one-hot encoded feature. Prediction is a dot
//! product, which keeps inference dependency-free and fast enough to call
//! hundreds of times per optimization run.
//!
//! Artifact shape:
//!
//! ```json
//! {
//!   "intercept": 520.0,
//!   "coefficients": { "base_price": -0.9, "competitor_price": 0.35, "inventory": -0.05 },
//!   "user_type": { "Price-sensitive": -35.0, "Brand-loyal": 22.0, ... },
//!   "weather": { "Sunny": 10.0, ... },
//!   "day_of_week": { "Monday": -4.0, ... }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{DemandInput, DemandModel, ModelError, PredictionError};
use crate::types::{CustomerSegment, DayOfWeek, Weather};

/// Coefficients for the numeric features.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NumericCoefficients {
    pub base_price: f64,
    pub competitor_price: f64,
    pub inventory: f64,
}

/// Serialized form of a fitted linear demand model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearArtifact {
    pub intercept: f64,
    pub coefficients: NumericCoefficients,
    /// One-hot weight per customer segment spelling
    pub user_type: HashMap<String, f64>,
    /// One-hot weight per weather spelling
    pub weather: HashMap<String, f64>,
    /// One-hot weight per day spelling
    pub day_of_week: HashMap<String, f64>,
}

/// A validated, ready-to-query linear demand model.
///
/// Construction verifies that every category the context enums can produce
/// has a weight in the artifact, so a category miss is a load-time error
/// rather than a mid-optimization surprise.
#[derive(Debug, Clone)]
pub struct LinearDemandModel {
    name: String,
    artifact: LinearArtifact,
}

impl LinearDemandModel {
    /// Load and validate an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let artifact: LinearArtifact =
            serde_json::from_str(&contents).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let name = path
            .file_stem()
            .map_or_else(|| "linreg".to_string(), |s| s.to_string_lossy().to_string());
        let model = Self::from_artifact(name, artifact)?;
        info!(path = %path.display(), model = %model.name, "Loaded demand model artifact");
        Ok(model)
    }

    /// Validate an in-memory artifact and wrap it as a queryable model.
    pub fn from_artifact(name: impl Into<String>, artifact: LinearArtifact) -> Result<Self, ModelError> {
        for segment in CustomerSegment::ALL {
            require_weight(&artifact.user_type, "user_type", segment.as_str())?;
        }
        for weather in Weather::ALL {
            require_weight(&artifact.weather, "weather", weather.as_str())?;
        }
        for day in DayOfWeek::ALL {
            require_weight(&artifact.day_of_week, "day_of_week", day.as_str())?;
        }

        for (field, value) in [
            ("intercept", artifact.intercept),
            ("coefficients.base_price", artifact.coefficients.base_price),
            (
                "coefficients.competitor_price",
                artifact.coefficients.competitor_price,
            ),
            ("coefficients.inventory", artifact.coefficients.inventory),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteWeight {
                    field: field.to_string(),
                });
            }
        }

        // Extra spellings the enums can never produce are harmless; call
        // them out once so artifact typos don't go unnoticed.
        warn_unknown_categories("user_type", &artifact.user_type, &CustomerSegment::ALL.map(CustomerSegment::as_str));
        warn_unknown_categories("weather", &artifact.weather, &Weather::ALL.map(Weather::as_str));
        warn_unknown_categories("day_of_week", &artifact.day_of_week, &DayOfWeek::ALL.map(DayOfWeek::as_str));

        Ok(Self {
            name: name.into(),
            artifact,
        })
    }

    /// Built-in demo model with hand-tuned coefficients.
    ///
    /// Used when no artifact is configured: demand slopes down in price,
    /// up in competitor price, and carries small segment/weather/day
    /// adjustments, giving an interior revenue maximum on the default
    /// 10..500 search range.
    pub fn builtin() -> Self {
        let artifact = LinearArtifact {
            intercept: 480.0,
            coefficients: NumericCoefficients {
                base_price: -0.9,
                competitor_price: 0.35,
                inventory: -0.05,
            },
            user_type: [
                ("Price-sensitive", -35.0),
                ("Brand-loyal", 22.0),
                ("Impulse Buyer", 15.0),
                ("Average", 0.0),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
            weather: [("Sunny", 10.0), ("Rainy", -8.0), ("Cloudy", 0.0), ("Snowy", -14.0)]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            day_of_week: [
                ("Monday", -4.0),
                ("Tuesday", -2.0),
                ("Wednesday", 0.0),
                ("Thursday", 1.0),
                ("Friday", 8.0),
                ("Saturday", 12.0),
                ("Sunday", 6.0),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
        };
        // The hand-written tables above cover every enum spelling, so the
        // load-time validation pass is not needed here.
        Self {
            name: "linreg-builtin".to_string(),
            artifact,
        }
    }

    fn weight(&self, map: &HashMap<String, f64>, field: &'static str, key: &str) -> Result<f64, PredictionError> {
        map.get(key).copied().ok_or_else(|| {
            PredictionError::new(&self.name, format!("no '{field}' weight for category {key:?}"))
        })
    }
}

impl DemandModel for LinearDemandModel {
    fn predict(&self, input: &DemandInput) -> Result<f64, PredictionError> {
        let a = &self.artifact;
        let demand = a.intercept
            + a.coefficients.base_price * input.base_price
            + a.coefficients.competitor_price * input.competitor_price
            + a.coefficients.inventory * f64::from(input.inventory)
            + self.weight(&a.user_type, "user_type", input.user_type.as_str())?
            + self.weight(&a.weather, "weather", input.weather.as_str())?
            + self.weight(&a.day_of_week, "day_of_week", input.day_of_week.as_str())?;

        if !demand.is_finite() {
            return Err(PredictionError::new(
                &self.name,
                format!("non-finite prediction for base_price {}", input.base_price),
            ));
        }
        Ok(demand)
    }

    fn model_name(&self) -> &str {
        &self.name
    }
}

fn require_weight(
    map: &HashMap<String, f64>,
    field: &'static str,
    category: &str,
) -> Result<(), ModelError> {
    match map.get(category) {
        None => Err(ModelError::MissingCategory {
            field,
            category: category.to_string(),
        }),
        Some(w) if !w.is_finite() => Err(ModelError::NonFiniteWeight {
            field: format!("{field}.{category}"),
        }),
        Some(_) => Ok(()),
    }
}

fn warn_unknown_categories(field: &str, map: &HashMap<String, f64>, known: &[&str]) {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            warn!(field, category = %key, "Model artifact carries a weight for an unknown category; it will never be used");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MarketContext;

    fn demo_context() -> MarketContext {
        MarketContext {
            competitor_price: 250.0,
            inventory: 100,
            customer_segment: CustomerSegment::Average,
            weather: Weather::Sunny,
            day_of_week: DayOfWeek::Monday,
        }
    }

    #[test]
    fn builtin_model_slopes_down_in_price() {
        let model = LinearDemandModel::builtin();
        let ctx = demo_context();
        let low = model
            .predict(&DemandInput::from_context(50.0, &ctx))
            .unwrap();
        let high = model
            .predict(&DemandInput::from_context(400.0, &ctx))
            .unwrap();
        assert!(low > high, "demand should fall as price rises: {low} vs {high}");
    }

    #[test]
    fn builtin_prediction_matches_dot_product() {
        let model = LinearDemandModel::builtin();
        let ctx = demo_context();
        let demand = model
            .predict(&DemandInput::from_context(100.0, &ctx))
            .unwrap();
        // 480 - 0.9*100 + 0.35*250 - 0.05*100 + 0 (Average) + 10 (Sunny) - 4 (Monday)
        let expected = 480.0 - 90.0 + 87.5 - 5.0 + 10.0 - 4.0;
        assert!((demand - expected).abs() < 1e-9, "{demand} != {expected}");
    }

    #[test]
    fn artifact_missing_category_fails_at_load() {
        let mut artifact = LinearDemandModel::builtin().artifact;
        artifact.weather.remove("Snowy");
        let err = LinearDemandModel::from_artifact("broken", artifact).unwrap_err();
        match err {
            ModelError::MissingCategory { field, category } => {
                assert_eq!(field, "weather");
                assert_eq!(category, "Snowy");
            }
            other => panic!("expected MissingCategory, got {other:?}"),
        }
    }

    #[test]
    fn artifact_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("linreg_model.json");
        let artifact = LinearDemandModel::builtin().artifact;
        std::fs::write(&path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();

        let model = LinearDemandModel::load(&path).unwrap();
        assert_eq!(model.model_name(), "linreg_model");

        let ctx = demo_context();
        let from_file = model.predict(&DemandInput::from_context(75.0, &ctx)).unwrap();
        let from_builtin = LinearDemandModel::builtin()
            .predict(&DemandInput::from_context(75.0, &ctx))
            .unwrap();
        assert!((from_file - from_builtin).abs() < 1e-12);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = LinearDemandModel::load(Path::new("/nonexistent/model.json")).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
