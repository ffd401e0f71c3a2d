//! Output types of the price-optimization grid search.

use serde::{Deserialize, Serialize};

/// One evaluated grid point: a candidate base price, the demand the model
/// predicted for it (floored at zero), and the resulting projected revenue.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceSample {
    /// Candidate base price ($)
    pub price: f64,
    /// Predicted unit demand at this price, clamped to >= 0
    pub predicted_demand: f64,
    /// price * predicted_demand
    pub revenue: f64,
}

/// Result of one optimization run: the revenue-maximizing sample plus the
/// full ascending-price sample table it was selected from.
///
/// When several samples tie on revenue, `best` is the lowest-priced one:
/// the linear scan keeps the first maximum it sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationResult {
    /// The winning sample
    pub best: PriceSample,
    /// Every evaluated sample, ordered by ascending price
    pub samples: Vec<PriceSample>,
}
