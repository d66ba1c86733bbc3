//! Implements a SQLite backed budget store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Budget, UserID},
    stores::BudgetStore,
};

/// Stores per-user monthly budgets in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteBudgetStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteBudgetStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl BudgetStore for SQLiteBudgetStore {
    /// Create or replace the monthly budget for `user_id`.
    ///
    /// The alert flag is always cleared, starting a new alert episode.
    ///
    /// # Errors
    /// Returns [Error::NonPositiveBudget] if `monthly_budget` is zero or
    /// negative, or [Error::SqlError] if there is a SQL error.
    fn set_budget(&mut self, user_id: UserID, monthly_budget: f64) -> Result<Budget, Error> {
        if monthly_budget <= 0.0 {
            return Err(Error::NonPositiveBudget(monthly_budget));
        }

        let budget = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "INSERT INTO budget (user_id, monthly_budget, alert_sent)
                 VALUES (?1, ?2, 0)
                 ON CONFLICT(user_id) DO UPDATE SET
                     monthly_budget = excluded.monthly_budget,
                     alert_sent = 0
                 RETURNING user_id, monthly_budget, alert_sent",
            )?
            .query_row((user_id.as_i64(), monthly_budget), Self::map_row)?;

        Ok(budget)
    }

    /// Retrieve the budget for `user_id`, if one has been set.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn get(&self, user_id: UserID) -> Result<Option<Budget>, Error> {
        let budget = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT user_id, monthly_budget, alert_sent FROM budget WHERE user_id = :user_id",
            )?
            .query_row(&[(":user_id", &user_id.as_i64())], Self::map_row)
            .optional()?;

        Ok(budget)
    }

    /// Set the alert flag for the `(user_id, monthly_budget)` episode.
    ///
    /// The update is a compare-and-swap: it only applies while the stored
    /// budget still has the value the alert was computed against and the
    /// flag is still clear.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn mark_alert_sent(&mut self, user_id: UserID, monthly_budget: f64) -> Result<bool, Error> {
        let rows_changed = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .execute(
                "UPDATE budget SET alert_sent = 1
                 WHERE user_id = ?1 AND monthly_budget = ?2 AND alert_sent = 0",
                (user_id.as_i64(), monthly_budget),
            )?;

        Ok(rows_changed == 1)
    }
}

impl CreateTable for SQLiteBudgetStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL UNIQUE,
                monthly_budget REAL NOT NULL,
                alert_sent INTEGER NOT NULL DEFAULT 0
                )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteBudgetStore {
    type ReturnType = Budget;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let user_id: i64 = row.get(offset)?;
        let monthly_budget = row.get(offset + 1)?;
        let alert_sent = row.get(offset + 2)?;

        Ok(Budget {
            user_id: UserID::new(user_id),
            monthly_budget,
            alert_sent,
        })
    }
}

#[cfg(test)]
mod sqlite_budget_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{Error, db::CreateTable, models::UserID, stores::BudgetStore};

    use super::SQLiteBudgetStore;

    fn get_test_store() -> SQLiteBudgetStore {
        let connection = Connection::open_in_memory().unwrap();
        SQLiteBudgetStore::create_table(&connection).unwrap();

        SQLiteBudgetStore::new(Arc::new(Mutex::new(connection)))
    }

    #[test]
    fn get_returns_none_when_no_budget_set() {
        let store = get_test_store();

        let got = store.get(UserID::new(1)).unwrap();

        assert_eq!(got, None);
    }

    #[test]
    fn set_budget_rejects_non_positive_amounts() {
        let mut store = get_test_store();

        assert_eq!(
            store.set_budget(UserID::new(1), 0.0),
            Err(Error::NonPositiveBudget(0.0))
        );
        assert_eq!(
            store.set_budget(UserID::new(1), -100.0),
            Err(Error::NonPositiveBudget(-100.0))
        );
    }

    #[test]
    fn set_budget_clears_alert_flag() {
        let mut store = get_test_store();
        let user_id = UserID::new(1);

        store.set_budget(user_id, 1000.0).unwrap();
        assert!(store.mark_alert_sent(user_id, 1000.0).unwrap());

        let budget = store.set_budget(user_id, 1200.0).unwrap();

        assert_eq!(budget.monthly_budget, 1200.0);
        assert!(!budget.alert_sent);
    }

    #[test]
    fn mark_alert_sent_is_conditional_on_budget_value() {
        let mut store = get_test_store();
        let user_id = UserID::new(1);
        store.set_budget(user_id, 1000.0).unwrap();

        // Stale episode: the budget changed since the alert was computed.
        assert!(!store.mark_alert_sent(user_id, 500.0).unwrap());
        assert!(!store.get(user_id).unwrap().unwrap().alert_sent);

        assert!(store.mark_alert_sent(user_id, 1000.0).unwrap());
        assert!(store.get(user_id).unwrap().unwrap().alert_sent);

        // Already sent for this episode.
        assert!(!store.mark_alert_sent(user_id, 1000.0).unwrap());
    }
}
