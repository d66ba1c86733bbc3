//! The financial analytics core: streak tracking, budget alerting, trend
//! fitting, and month-end projections.
//!
//! Every function in this module is pure: it takes explicit dates and
//! transaction slices and never consults a clock or a database. The
//! [engine](crate::engine) wires these functions to the stores.

mod budget;
mod forecast;
mod streak;
mod summary;
mod trend;

pub use budget::{BudgetStatus, BudgetUsage, over_budget};
pub use forecast::{
    CategoryForecast, CategoryProjection, MIN_FORECAST_TRANSACTIONS, MonthProjection,
    project_categories, project_month,
};
pub use streak::advance_streak;
pub use summary::{CategoryTotal, SpendingSummary, category_totals, spending_summary};
pub use trend::{MIN_TREND_TRANSACTIONS, SpendTrend, TrendDirection, TrendReport, compute_trend};

/// Round a value to 2 decimal places for reporting.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod round2_tests {
    use super::round2;

    #[test]
    fn rounds_to_cents() {
        assert_eq!(round2(10.006), 10.01);
        assert_eq!(round2(33.333_333), 33.33);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(100.0), 100.0);
    }
}
