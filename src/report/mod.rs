//! Presentation layer over optimization results.
//!
//! Everything here is a pure function of an [`OptimizationResult`]: the KPI
//! summary shown as headline metrics, the plain-text sample table for the
//! CLI, and the series payload a dashboard needs to draw the dual-axis
//! revenue/demand chart. The optimizer knows nothing about any of it, so
//! renderers can be swapped without touching the search.

use serde::{Deserialize, Serialize};

use crate::types::{OptimizationResult, PriceSample};

/// Headline metrics for one optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    /// Revenue-maximizing base price ($)
    pub optimal_price: f64,
    /// Expected demand at the optimal price, truncated to whole units
    pub expected_demand_units: u64,
    /// Projected revenue at the optimal price ($)
    pub estimated_revenue: f64,
}

impl KpiSummary {
    pub fn from_result(result: &OptimizationResult) -> Self {
        Self {
            optimal_price: result.best.price,
            // Demand is clamped >= 0 upstream, so truncation is safe.
            expected_demand_units: result.best.predicted_demand.trunc() as u64,
            estimated_revenue: result.best.revenue,
        }
    }
}

/// Series data for the dual-axis revenue/demand chart.
///
/// `prices` is the shared x-axis; `revenue` and `demand` are parallel
/// y-series; `optimal_price` marks the vertical recommendation line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub prices: Vec<f64>,
    pub revenue: Vec<f64>,
    pub demand: Vec<f64>,
    pub optimal_price: f64,
}

impl ChartSeries {
    pub fn from_result(result: &OptimizationResult) -> Self {
        Self {
            prices: result.samples.iter().map(|s| s.price).collect(),
            revenue: result.samples.iter().map(|s| s.revenue).collect(),
            demand: result.samples.iter().map(|s| s.predicted_demand).collect(),
            optimal_price: result.best.price,
        }
    }
}

/// Render the full sample table as fixed-width text, marking the winning row.
pub fn render_table(result: &OptimizationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>10}  {:>16}  {:>14}\n",
        "Price", "Predicted Demand", "Revenue"
    ));
    for sample in &result.samples {
        out.push_str(&render_row(sample, sample.price == result.best.price));
    }
    out
}

/// Render a one-shot simulation report: header, KPI block, sample table.
pub fn render_report(product: &str, result: &OptimizationResult) -> String {
    let summary = KpiSummary::from_result(result);
    let mut out = String::new();
    out.push_str(&format!("Price Optimization Simulation: {product}\n\n"));
    out.push_str(&format!("  Optimal Price:      ${:.2}\n", summary.optimal_price));
    out.push_str(&format!(
        "  Expected Demand:    {} units\n",
        summary.expected_demand_units
    ));
    out.push_str(&format!(
        "  Estimated Revenue:  ${:.2}\n\n",
        summary.estimated_revenue
    ));
    out.push_str(&render_table(result));
    out
}

fn render_row(sample: &PriceSample, is_best: bool) -> String {
    let marker = if is_best { "  <- optimal" } else { "" };
    format!(
        "{:>10.2}  {:>16.1}  {:>14.2}{}\n",
        sample.price, sample.predicted_demand, sample.revenue, marker
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_result() -> OptimizationResult {
        OptimizationResult {
            best: PriceSample {
                price: 30.0,
                predicted_demand: 70.9,
                revenue: 2127.0,
            },
            samples: vec![
                PriceSample {
                    price: 10.0,
                    predicted_demand: 90.0,
                    revenue: 900.0,
                },
                PriceSample {
                    price: 20.0,
                    predicted_demand: 80.0,
                    revenue: 1600.0,
                },
                PriceSample {
                    price: 30.0,
                    predicted_demand: 70.9,
                    revenue: 2127.0,
                },
            ],
        }
    }

    #[test]
    fn kpi_truncates_demand_to_whole_units() {
        let summary = KpiSummary::from_result(&make_result());
        assert_eq!(summary.optimal_price, 30.0);
        assert_eq!(summary.expected_demand_units, 70);
        assert_eq!(summary.estimated_revenue, 2127.0);
    }

    #[test]
    fn chart_series_are_parallel_and_ascending() {
        let chart = ChartSeries::from_result(&make_result());
        assert_eq!(chart.prices.len(), 3);
        assert_eq!(chart.revenue.len(), 3);
        assert_eq!(chart.demand.len(), 3);
        assert_eq!(chart.optimal_price, 30.0);
        assert!(chart.prices.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn table_marks_exactly_one_optimal_row() {
        let table = render_table(&make_result());
        assert_eq!(table.matches("<- optimal").count(), 1);
        assert!(table.contains("1600.00"));
    }

    #[test]
    fn report_contains_product_and_kpis() {
        let report = render_report("Espresso Machine", &make_result());
        assert!(report.contains("Espresso Machine"));
        assert!(report.contains("$30.00"));
        assert!(report.contains("70 units"));
        assert!(report.contains("$2127.00"));
    }
}
