//! Revenue-maximizing price search over a bounded grid.
//!
//! The search space is small (at most a few hundred points in the stock
//! configuration), so evaluation is a single sequential pass: one model call
//! per grid point, clamp, derive revenue, keep the running maximum. The
//! strict `>` comparison in the scan is what makes ties deterministic: the
//! first (lowest-priced) maximal sample wins.

use thiserror::Error;
use tracing::debug;

use super::grid::{InvalidRangeError, PriceGrid};
use crate::model::{DemandInput, DemandModel, PredictionError};
use crate::types::{MarketContext, OptimizationResult, PriceSample};

/// Why an optimization run produced no result.
///
/// All-or-nothing: a partial sample table is never returned, since a "best
/// price" over an incomplete table would be misleading.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// Malformed search bounds, caught before the first model call.
    #[error("invalid search range: {0}")]
    InvalidRange(#[from] InvalidRangeError),

    /// The demand model failed at one grid point; the run is aborted,
    /// not retried and not patched with a default.
    #[error("prediction failed at price {price}: {source}")]
    Prediction {
        price: f64,
        #[source]
        source: PredictionError,
    },
}

/// Search the price range for the revenue-maximizing base price.
///
/// Equivalent to [`optimize_on_grid`] with the grid built (and validated)
/// from `range` and `step`; validation failures surface before the model
/// is consulted at all.
pub fn optimize_price(
    context: &MarketContext,
    model: &dyn DemandModel,
    range: (f64, f64),
    step: f64,
) -> Result<OptimizationResult, OptimizeError> {
    let grid = PriceGrid::new(range.0, range.1, step)?;
    optimize_on_grid(context, model, &grid)
}

/// Evaluate every grid point and reduce to the arg-max sample.
///
/// For each candidate price the model sees the full feature row (price plus
/// every context field). Raw predictions are floored at zero: the model is
/// not assumed to respect non-negativity, and revenue from negative demand
/// is meaningless.
pub fn optimize_on_grid(
    context: &MarketContext,
    model: &dyn DemandModel,
    grid: &PriceGrid,
) -> Result<OptimizationResult, OptimizeError> {
    let mut samples = Vec::with_capacity(grid.point_count());
    let mut best: Option<PriceSample> = None;

    for price in grid.points() {
        let input = DemandInput::from_context(price, context);
        let raw = model
            .predict(&input)
            .map_err(|source| OptimizeError::Prediction { price, source })?;
        let predicted_demand = raw.max(0.0);
        let sample = PriceSample {
            price,
            predicted_demand,
            revenue: price * predicted_demand,
        };

        // Strictly greater keeps the first maximum, so revenue ties
        // resolve to the lowest price.
        if best.map_or(true, |b| sample.revenue > b.revenue) {
            best = Some(sample);
        }
        samples.push(sample);
    }

    // A validated grid always yields at least one point.
    let Some(best) = best else {
        return Err(InvalidRangeError::EmptyRange {
            min: grid.min(),
            max: grid.max(),
        }
        .into());
    };

    debug!(
        model = model.model_name(),
        points = samples.len(),
        best_price = best.price,
        best_revenue = best.revenue,
        "Grid search complete"
    );

    Ok(OptimizationResult { best, samples })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerSegment, DayOfWeek, Weather};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn make_context() -> MarketContext {
        MarketContext {
            competitor_price: 250.0,
            inventory: 100,
            customer_segment: CustomerSegment::Average,
            weather: Weather::Sunny,
            day_of_week: DayOfWeek::Monday,
        }
    }

    /// Stub returning demand = 100 - price, counting every call.
    struct LinearStub {
        calls: AtomicUsize,
    }

    impl LinearStub {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl DemandModel for LinearStub {
        fn predict(&self, input: &DemandInput) -> Result<f64, PredictionError> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            Ok(100.0 - input.base_price)
        }

        fn model_name(&self) -> &str {
            "linear-stub"
        }
    }

    /// Stub that always predicts negative demand.
    struct NegativeStub;

    impl DemandModel for NegativeStub {
        fn predict(&self, _input: &DemandInput) -> Result<f64, PredictionError> {
            Ok(-5.0)
        }

        fn model_name(&self) -> &str {
            "negative-stub"
        }
    }

    /// Stub that fails at one specific price.
    struct FailsAt {
        price: f64,
    }

    impl DemandModel for FailsAt {
        fn predict(&self, input: &DemandInput) -> Result<f64, PredictionError> {
            if (input.base_price - self.price).abs() < 1e-9 {
                Err(PredictionError::new("fails-at", "induced failure"))
            } else {
                Ok(50.0)
            }
        }

        fn model_name(&self) -> &str {
            "fails-at"
        }
    }

    #[test]
    fn linear_demand_scenario() {
        let model = LinearStub::new();
        let result = optimize_price(&make_context(), &model, (10.0, 30.0), 10.0).unwrap();

        assert_eq!(result.samples.len(), 3);
        let expected = [(10.0, 90.0, 900.0), (20.0, 80.0, 1600.0), (30.0, 70.0, 2100.0)];
        for (sample, (p, d, r)) in result.samples.iter().zip(expected) {
            assert_eq!(sample.price, p);
            assert_eq!(sample.predicted_demand, d);
            assert_eq!(sample.revenue, r);
        }
        assert_eq!(result.best.price, 30.0);
        assert_eq!(result.best.predicted_demand, 70.0);
        assert_eq!(result.best.revenue, 2100.0);
        assert_eq!(model.calls.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn negative_predictions_clamp_and_tie_break_to_lowest_price() {
        let result = optimize_price(&make_context(), &NegativeStub, (10.0, 30.0), 10.0).unwrap();
        for sample in &result.samples {
            assert_eq!(sample.predicted_demand, 0.0);
            assert_eq!(sample.revenue, 0.0);
        }
        // All revenues tie at zero; the lowest price must win.
        assert_eq!(result.best.price, 10.0);
    }

    #[test]
    fn prediction_failure_aborts_the_run() {
        let err =
            optimize_price(&make_context(), &FailsAt { price: 20.0 }, (10.0, 30.0), 10.0)
                .unwrap_err();
        match err {
            OptimizeError::Prediction { price, source } => {
                assert_eq!(price, 20.0);
                assert_eq!(source.model, "fails-at");
            }
            other => panic!("expected Prediction, got {other:?}"),
        }
    }

    #[test]
    fn invalid_range_fails_before_any_model_call() {
        let model = LinearStub::new();
        let err = optimize_price(&make_context(), &model, (30.0, 10.0), 10.0).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidRange(_)));
        assert_eq!(model.calls.load(Ordering::Relaxed), 0);

        let err = optimize_price(&make_context(), &model, (10.0, 30.0), 0.0).unwrap_err();
        assert!(matches!(err, OptimizeError::InvalidRange(_)));
        assert_eq!(model.calls.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn best_revenue_dominates_every_sample() {
        let model = LinearStub::new();
        let result = optimize_price(&make_context(), &model, (10.0, 90.0), 7.0).unwrap();
        for sample in &result.samples {
            assert!(result.best.revenue >= sample.revenue);
        }
    }

    #[test]
    fn revenue_is_exactly_price_times_demand() {
        let model = LinearStub::new();
        let result = optimize_price(&make_context(), &model, (5.0, 95.0), 2.5).unwrap();
        for sample in &result.samples {
            assert_eq!(sample.revenue, sample.price * sample.predicted_demand);
            assert!(sample.predicted_demand >= 0.0);
        }
    }
}
