//! Spending summaries: rolling totals and per-category breakdowns.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{analytics::round2, models::Transaction};

/// Headline totals for a user's recent spending.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpendingSummary {
    /// Spend over the trailing seven days, today inclusive.
    pub weekly_total: f64,
    /// Month-to-date spend.
    pub monthly_total: f64,
    /// The current logging streak, 0 when the user has never logged.
    pub current_streak: u32,
}

/// Build a [SpendingSummary] from the two windowed totals and an optional
/// streak count.
pub fn spending_summary(
    weekly_total: f64,
    monthly_total: f64,
    current_streak: Option<u32>,
) -> SpendingSummary {
    SpendingSummary {
        weekly_total: round2(weekly_total),
        monthly_total: round2(monthly_total),
        current_streak: current_streak.unwrap_or(0),
    }
}

/// The all-time spend in one category.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryTotal {
    /// The category label.
    pub category: String,
    /// The summed spend for the category, rounded to 2 decimals.
    pub total: f64,
}

/// Sum `transactions` per category, in category-name order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for transaction in transactions {
        *totals.entry(transaction.category()).or_insert(0.0) += transaction.amount();
    }

    totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_owned(),
            total: round2(total),
        })
        .collect()
}

#[cfg(test)]
mod summary_tests {
    use time::macros::date;

    use crate::models::{Transaction, UserID};

    use super::{CategoryTotal, category_totals, spending_summary};

    #[test]
    fn summary_defaults_streak_to_zero() {
        let got = spending_summary(70.0, 300.0, None);

        assert_eq!(got.weekly_total, 70.0);
        assert_eq!(got.monthly_total, 300.0);
        assert_eq!(got.current_streak, 0);
    }

    #[test]
    fn category_totals_group_and_sort_by_name() {
        let transactions = vec![
            Transaction::new(
                1,
                UserID::new(1),
                12.5,
                "Travel".to_owned(),
                date!(2025 - 06 - 01),
            ),
            Transaction::new(
                2,
                UserID::new(1),
                7.5,
                "Food".to_owned(),
                date!(2025 - 06 - 02),
            ),
            Transaction::new(
                3,
                UserID::new(1),
                2.5,
                "Food".to_owned(),
                date!(2025 - 06 - 03),
            ),
        ];

        let got = category_totals(&transactions);

        assert_eq!(
            got,
            vec![
                CategoryTotal {
                    category: "Food".to_owned(),
                    total: 10.0,
                },
                CategoryTotal {
                    category: "Travel".to_owned(),
                    total: 12.5,
                },
            ]
        );
    }

    #[test]
    fn category_totals_empty_for_no_transactions() {
        assert_eq!(category_totals(&[]), vec![]);
    }
}
