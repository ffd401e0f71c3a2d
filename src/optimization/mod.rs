//! Price-optimization engine: bounded grid search for the
//! revenue-maximizing base price.

mod grid;
mod optimizer;

pub use grid::{InvalidRangeError, PriceGrid};
pub use optimizer::{optimize_on_grid, optimize_price, OptimizeError};
