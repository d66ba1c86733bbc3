//! Month-end spend projections from month-to-date history.

use std::collections::BTreeMap;

use serde::Serialize;
use time::Date;

use crate::{
    analytics::{TrendDirection, round2},
    calendar::total_days_in_month,
    models::Transaction,
};

/// The minimum number of month-to-date transactions needed before category
/// projections are reported.
pub const MIN_FORECAST_TRANSACTIONS: usize = 5;

/// The minimum number of month-to-date entries a category needs to be
/// included in the projections. Thinner categories are omitted, not
/// zero-filled.
const MIN_CATEGORY_ENTRIES: usize = 3;

/// A linear extrapolation of this month's total spend.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthProjection {
    /// Mean spend per day over the elapsed part of the month, rounded to 2
    /// decimals.
    pub daily_average: f64,
    /// `daily_average` extended over the whole month, rounded to 2 decimals.
    pub predicted_month_total: f64,
}

/// Project this month's total spend from the daily average so far.
///
/// `spent` must be the month-to-date total through `today` inclusive. Unlike
/// the trend fit there is no data-sufficiency threshold: one day of history
/// is enough for a (rough) projection.
pub fn project_month(spent: f64, today: Date) -> MonthProjection {
    let days_elapsed = today.day();

    // A day-of-month of zero is impossible on a valid date; guard anyway so
    // the division is total.
    let daily_average = if days_elapsed == 0 {
        0.0
    } else {
        spent / f64::from(days_elapsed)
    };

    MonthProjection {
        daily_average: round2(daily_average),
        predicted_month_total: round2(daily_average * f64::from(total_days_in_month(today))),
    }
}

/// A projected month-end total for one spending category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryProjection {
    /// The category label.
    pub category: String,
    /// The category's average entry amount extended over the whole month,
    /// rounded to 2 decimals.
    pub predicted_month_total: f64,
    /// Per-category direction is not modelled; always
    /// [TrendDirection::Stable].
    pub trend: TrendDirection,
}

/// The result of a per-category projection.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CategoryForecast {
    /// Fewer than [MIN_FORECAST_TRANSACTIONS] transactions this month; not
    /// an error.
    NotEnoughData,
    /// Projections for every category with enough entries this month.
    Ok {
        /// One projection per qualifying category, in category-name order.
        predictions: Vec<CategoryProjection>,
    },
}

/// Project month-end totals per category from this month's transactions.
///
/// `transactions` must already be restricted to the month-to-date window
/// ending on `today`. Categories with fewer than three entries this month are
/// silently excluded.
pub fn project_categories(transactions: &[Transaction], today: Date) -> CategoryForecast {
    if transactions.len() < MIN_FORECAST_TRANSACTIONS {
        return CategoryForecast::NotEnoughData;
    }

    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for transaction in transactions {
        grouped
            .entry(transaction.category())
            .or_default()
            .push(transaction.amount());
    }

    let days = f64::from(total_days_in_month(today));

    let predictions = grouped
        .into_iter()
        .filter(|(_, amounts)| amounts.len() >= MIN_CATEGORY_ENTRIES)
        .map(|(category, amounts)| {
            let average = amounts.iter().sum::<f64>() / amounts.len() as f64;

            CategoryProjection {
                category: category.to_owned(),
                predicted_month_total: round2(average * days),
                trend: TrendDirection::Stable,
            }
        })
        .collect();

    CategoryForecast::Ok { predictions }
}
