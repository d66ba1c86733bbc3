//! Implements a SQLite backed streak store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Streak, UserID},
    stores::StreakStore,
};

/// Stores per-user logging streaks in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteStreakStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteStreakStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl StreakStore for SQLiteStreakStore {
    /// Retrieve the streak for `user_id`, if one exists.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn get(&self, user_id: UserID) -> Result<Option<Streak>, Error> {
        let streak = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "SELECT user_id, current_streak, last_updated FROM streak WHERE user_id = :user_id",
            )?
            .query_row(&[(":user_id", &user_id.as_i64())], Self::map_row)
            .optional()?;

        Ok(streak)
    }

    /// Create or replace the streak row for `streak.user_id`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn upsert(&mut self, streak: &Streak) -> Result<(), Error> {
        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .execute(
                "INSERT INTO streak (user_id, current_streak, last_updated)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET
                     current_streak = excluded.current_streak,
                     last_updated = excluded.last_updated",
                (
                    streak.user_id.as_i64(),
                    streak.current_streak,
                    streak.last_updated,
                ),
            )?;

        Ok(())
    }
}

impl CreateTable for SQLiteStreakStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS streak (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL UNIQUE,
                current_streak INTEGER NOT NULL,
                last_updated TEXT NOT NULL
                )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteStreakStore {
    type ReturnType = Streak;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let user_id: i64 = row.get(offset)?;
        let current_streak = row.get(offset + 1)?;
        let last_updated = row.get(offset + 2)?;

        Ok(Streak {
            user_id: UserID::new(user_id),
            current_streak,
            last_updated,
        })
    }
}
