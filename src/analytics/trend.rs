//! Fits a linear trend to a user's historical daily spend.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{analytics::round2, models::Transaction};

/// The minimum number of transactions needed before a trend is reported.
pub const MIN_TREND_TRANSACTIONS: usize = 5;

/// The direction of a user's spending trend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    /// Day-over-day spend is growing on average.
    Increasing,
    /// Day-over-day spend is shrinking on average.
    Decreasing,
    /// No average day-over-day movement.
    Stable,
}

/// A fitted spending trend over a user's full transaction history.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpendTrend {
    /// The direction of the mean day-over-day change.
    pub trend: TrendDirection,
    /// The arithmetic mean of successive differences of the daily totals,
    /// rounded to 2 decimals. This is deliberately not the regression slope:
    /// the reported trend tracks actual movement while the fitted line below
    /// is for visualization.
    pub daily_change: f64,
    /// Per-date spend totals, one per distinct date, rounded to 2 decimals.
    pub actual: Vec<f64>,
    /// The least-squares fit of the totals against their 0-based index,
    /// aligned index-for-index with `actual`.
    pub predicted: Vec<f64>,
    /// The dates for each point, ascending.
    pub labels: Vec<Date>,
}

/// The result of a trend computation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TrendReport {
    /// Fewer than [MIN_TREND_TRANSACTIONS] transactions exist; not an error,
    /// the caller should prompt for more history.
    NotEnoughData,
    /// A fitted trend.
    Ok(SpendTrend),
}

/// Compute the spending trend over `transactions`, the user's complete
/// history.
///
/// Transactions are aggregated into one total per distinct calendar date;
/// dates with no transactions are not interpolated, so the series may have
/// gaps. The regression runs against each point's sequence index rather than
/// the raw date, so irregular gaps are not time-weighted.
pub fn compute_trend(transactions: &[Transaction]) -> TrendReport {
    if transactions.len() < MIN_TREND_TRANSACTIONS {
        return TrendReport::NotEnoughData;
    }

    // BTreeMap keeps the series sorted by date.
    let mut daily_totals: BTreeMap<Date, f64> = BTreeMap::new();
    for transaction in transactions {
        *daily_totals.entry(transaction.date()).or_insert(0.0) += transaction.amount();
    }

    let labels: Vec<Date> = daily_totals.keys().copied().collect();
    let totals: Vec<f64> = daily_totals.values().copied().collect();

    let (slope, intercept) = least_squares(&totals);
    let predicted = totals
        .iter()
        .enumerate()
        .map(|(index, _)| round2(intercept + slope * index as f64))
        .collect();

    let daily_change = if totals.len() > 1 {
        let change_sum: f64 = totals.windows(2).map(|pair| pair[1] - pair[0]).sum();
        round2(change_sum / (totals.len() - 1) as f64)
    } else {
        0.0
    };

    let trend = if daily_change > 0.0 {
        TrendDirection::Increasing
    } else if daily_change < 0.0 {
        TrendDirection::Decreasing
    } else {
        TrendDirection::Stable
    };

    TrendReport::Ok(SpendTrend {
        trend,
        daily_change,
        actual: totals.iter().map(|&total| round2(total)).collect(),
        predicted,
        labels,
    })
}

/// Ordinary least-squares fit of `values` against their 0-based index.
///
/// Returns `(slope, intercept)`. A single-point series fits a flat line
/// through that point.
fn least_squares(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let sum_x: f64 = (0..values.len()).map(|index| index as f64).sum();
    let sum_y: f64 = values.iter().sum();
    let sum_xy: f64 = values
        .iter()
        .enumerate()
        .map(|(index, value)| index as f64 * value)
        .sum();
    let sum_xx: f64 = (0..values.len()).map(|index| (index * index) as f64).sum();

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator == 0.0 {
        return (0.0, values.first().copied().unwrap_or(0.0));
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    (slope, intercept)
}
