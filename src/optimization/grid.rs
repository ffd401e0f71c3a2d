//! Evenly spaced price grid over a bounded search range.

use thiserror::Error;

/// Absolute slack added when counting whole steps in the range, so a span
/// that is an exact multiple of the step still lands on `max` despite
/// floating-point rounding (e.g. 0.1..0.3 stepped by 0.1 yields 3 points).
const STEP_COUNT_SLACK: f64 = 1e-9;

/// Malformed search bounds, rejected before any model call.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidRangeError {
    #[error("price range is empty: min {min} must be below max {max}")]
    EmptyRange { min: f64, max: f64 },

    #[error("price step must be positive, got {step}")]
    NonPositiveStep { step: f64 },

    #[error("price range bounds must be finite, got [{min}, {max}] step {step}")]
    NonFinite { min: f64, max: f64, step: f64 },
}

/// A validated ascending price grid.
///
/// Grid points are `min + i*step`. The upper bound is inclusive: the number
/// of points is `floor((max-min)/step) + 1`, so the last point is `max`
/// exactly when the span divides evenly and falls short of `max` otherwise
/// (clipped, never beyond `max`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceGrid {
    min: f64,
    max: f64,
    step: f64,
}

impl PriceGrid {
    /// Validate bounds and build a grid. Fails fast on an empty range or a
    /// non-positive step.
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, InvalidRangeError> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(InvalidRangeError::NonFinite { min, max, step });
        }
        if min >= max {
            return Err(InvalidRangeError::EmptyRange { min, max });
        }
        if step <= 0.0 {
            return Err(InvalidRangeError::NonPositiveStep { step });
        }
        Ok(Self { min, max, step })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of grid points: 1 + the number of whole steps that fit in the
    /// span. At least 1 for any valid grid (a step larger than the span
    /// leaves only `min` itself).
    pub fn point_count(&self) -> usize {
        let whole_steps = ((self.max - self.min) / self.step + STEP_COUNT_SLACK).floor();
        whole_steps as usize + 1
    }

    /// Iterate grid prices in ascending order.
    ///
    /// Each point is computed as `min + i*step` and capped at `max` so
    /// accumulated floating-point error can never push the last point past
    /// the upper bound.
    pub fn points(&self) -> impl Iterator<Item = f64> + '_ {
        let count = self.point_count();
        (0..count).map(move |i| (self.min + i as f64 * self.step).min(self.max))
    }
}
