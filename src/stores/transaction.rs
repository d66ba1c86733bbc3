//! Defines the transaction store trait.

use std::ops::RangeInclusive;

use time::Date;

use crate::{
    Error,
    models::{Transaction, TransactionBuilder, UserID},
};

/// Handles the creation and retrieval of transactions.
///
/// The store is an append-only ledger: transactions are never edited or
/// deleted once created.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error>;

    /// Retrieve transactions from the store in the way defined by `query`.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error>;

    /// The sum of a user's transaction amounts, optionally restricted to an
    /// inclusive date range.
    ///
    /// Returns 0.0 when no transactions match.
    fn sum(&self, user_id: UserID, date_range: Option<RangeInclusive<Date>>)
    -> Result<f64, Error>;
}

/// Defines how transactions should be fetched from
/// [TransactionStore::get_query].
#[derive(Clone, Debug)]
pub struct TransactionQuery {
    /// Only include transactions belonging to this user.
    pub user_id: UserID,
    /// Include transactions within `date_range` (inclusive).
    pub date_range: Option<RangeInclusive<Date>>,
    /// Orders transactions by date in the order `sort_date`. None returns
    /// transactions in the order they are stored.
    pub sort_date: Option<SortOrder>,
}

impl TransactionQuery {
    /// A query for all of `user_id`'s transactions in insertion order.
    pub fn for_user(user_id: UserID) -> Self {
        Self {
            user_id,
            date_range: None,
            sort_date: None,
        }
    }

    /// Restrict the query to `date_range` (inclusive).
    pub fn in_range(mut self, date_range: RangeInclusive<Date>) -> Self {
        self.date_range = Some(date_range);
        self
    }

    /// Order the results by date.
    pub fn sorted(mut self, order: SortOrder) -> Self {
        self.sort_date = Some(order);
        self
    }
}

/// The order to sort transactions in a [TransactionQuery].
#[derive(Clone, Copy, Debug)]
pub enum SortOrder {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    Descending,
}
