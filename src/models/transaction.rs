//! This file defines the type `Transaction`, the core type of the expense
//! tracking part of the application.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::{DatabaseID, UserID};

/// A single dated, categorized expense belonging to one user.
///
/// Expenses are recorded as positive amounts. Transactions are immutable once
/// created: the ledger is append-only and the analytics code never edits or
/// deletes entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    id: DatabaseID,
    user_id: UserID,
    amount: f64,
    category: String,
    date: Date,
}

impl Transaction {
    /// Create a transaction from its stored parts.
    ///
    /// Intended for store implementations mapping database rows; application
    /// code should go through [Transaction::build].
    pub fn new(
        id: DatabaseID,
        user_id: UserID,
        amount: f64,
        category: String,
        date: Date,
    ) -> Self {
        Self {
            id,
            user_id,
            amount,
            category,
            date,
        }
    }

    /// Start building a new transaction.
    ///
    /// Shortcut for [TransactionBuilder::new] for discoverability.
    pub fn build(user_id: UserID, amount: f64, date: Date) -> TransactionBuilder {
        TransactionBuilder::new(user_id, amount, date)
    }

    /// The ID of the transaction.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The ID of the user that logged this transaction.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The amount of money spent in this transaction.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The free-text category label for this transaction.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }
}

/// The data needed to insert a new transaction into a store.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionBuilder {
    /// The ID of the user logging the expense.
    pub user_id: UserID,
    /// The amount spent.
    pub amount: f64,
    /// The category label. Defaults to "Uncategorized".
    pub category: String,
    /// The calendar date of the expense.
    pub date: Date,
}

impl TransactionBuilder {
    /// Create a builder for a transaction on `date`.
    pub fn new(user_id: UserID, amount: f64, date: Date) -> Self {
        Self {
            user_id,
            amount,
            category: "Uncategorized".to_owned(),
            date,
        }
    }

    /// Set the category label.
    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_owned();
        self
    }
}

#[cfg(test)]
mod transaction_tests {
    use time::macros::date;

    use crate::models::UserID;

    use super::Transaction;

    #[test]
    fn builder_defaults_category() {
        let builder = Transaction::build(UserID::new(1), 42.50, date!(2025 - 06 - 01));

        assert_eq!(builder.category, "Uncategorized");
    }

    #[test]
    fn builder_sets_category() {
        let builder =
            Transaction::build(UserID::new(1), 42.50, date!(2025 - 06 - 01)).category("Groceries");

        assert_eq!(builder.category, "Groceries");
    }
}
