//! SQLite-backed implementations of the store traits.

pub mod budget;
pub mod streak;
pub mod transaction;
pub mod user;

pub use budget::SQLiteBudgetStore;
pub use streak::SQLiteStreakStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{
    Error,
    db::initialize,
    engine::Tracker,
    notify::LogNotifier,
};

/// An alias for a [Tracker] that uses SQLite for the backend and reports
/// alerts through the log.
pub type SQLiteTracker = Tracker<
    SQLiteTransactionStore,
    SQLiteBudgetStore,
    SQLiteStreakStore,
    SQLiteUserStore,
    LogNotifier,
>;

/// Creates a [Tracker] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
pub fn create_tracker(db_connection: Connection) -> Result<SQLiteTracker, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(Tracker::new(
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteBudgetStore::new(connection.clone()),
        SQLiteStreakStore::new(connection.clone()),
        SQLiteUserStore::new(connection),
        LogNotifier,
    ))
}
