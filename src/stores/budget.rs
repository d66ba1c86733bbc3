//! Defines the budget store trait.

use crate::{
    Error,
    models::{Budget, UserID},
};

/// Handles the per-user monthly budget and its alert flag.
pub trait BudgetStore {
    /// Create or replace the monthly budget for `user_id`.
    ///
    /// Setting a budget always clears the alert flag: it is the reset
    /// transition that starts a new alert episode.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveBudget] if `monthly_budget` is not greater
    /// than zero.
    fn set_budget(&mut self, user_id: UserID, monthly_budget: f64) -> Result<Budget, Error>;

    /// Retrieve the budget for `user_id`, or `None` if the user has never set
    /// one.
    fn get(&self, user_id: UserID) -> Result<Option<Budget>, Error>;

    /// Record that an alert was dispatched for the episode identified by
    /// `(user_id, monthly_budget)`.
    ///
    /// The write is conditional on the stored budget still having the value
    /// the alert was computed against and the flag still being clear, so a
    /// concurrent budget reset never inherits a stale flag. Returns whether
    /// the flag was actually set.
    fn mark_alert_sent(&mut self, user_id: UserID, monthly_budget: f64) -> Result<bool, Error>;
}
