//! Budget status reporting and the over-budget alert decision.

use serde::Serialize;

use crate::{analytics::round2, models::Budget};

/// Whether month-to-date spend has crossed the budget ceiling.
///
/// Strictly greater than: spending exactly the budget does not trigger an
/// alert.
pub fn over_budget(budget: &Budget, spent: f64) -> bool {
    spent > budget.monthly_budget
}

/// A user's spend measured against their budget ceiling.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BudgetUsage {
    /// The monthly budget ceiling.
    pub budget: f64,
    /// The user's total spend.
    pub spent: f64,
    /// Spend as a percentage of the budget, rounded to 2 decimals.
    pub percent: f64,
}

/// The budget status returned to the caller, e.g. for a status widget.
///
/// Serializes with a `status` field of `not_set`, `safe`, `warning`, or
/// `exceeded`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetStatus {
    /// The user has never set a budget. Alerting is opt-in, so this is not
    /// an error.
    NotSet,
    /// Below 80% of the budget.
    Safe(BudgetUsage),
    /// At or above 80% but below 100% of the budget.
    Warning(BudgetUsage),
    /// At or above 100% of the budget.
    Exceeded(BudgetUsage),
}

impl BudgetStatus {
    /// Compute the status of `spent` against an optional `budget`.
    ///
    /// The percentage is rounded to 2 decimals before the 80/100 band
    /// comparison, so a spend of 79.996% reports as a warning.
    pub fn new(budget: Option<&Budget>, spent: f64) -> Self {
        let Some(budget) = budget else {
            return Self::NotSet;
        };

        let percent = round2(spent / budget.monthly_budget * 100.0);

        let usage = BudgetUsage {
            budget: budget.monthly_budget,
            spent,
            percent,
        };

        if percent >= 100.0 {
            Self::Exceeded(usage)
        } else if percent >= 80.0 {
            Self::Warning(usage)
        } else {
            Self::Safe(usage)
        }
    }

    /// The usage figures, unless no budget is set.
    pub fn usage(&self) -> Option<&BudgetUsage> {
        match self {
            Self::NotSet => None,
            Self::Safe(usage) | Self::Warning(usage) | Self::Exceeded(usage) => Some(usage),
        }
    }
}
