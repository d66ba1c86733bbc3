//! Implements a SQLite backed user profile store.
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{User, UserID},
    stores::UserStore,
};

/// Stores user profiles in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create a new user profile.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if `email` is already registered, or
    /// [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, name: &str, email: &str) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "INSERT INTO user (name, email) VALUES (?1, ?2)
                 RETURNING id, name, email",
            )?
            .query_row((name, email), Self::map_row)?;

        Ok(user)
    }

    /// Retrieve the profile for `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no such user exists, or [Error::SqlError]
    /// if there is some other SQL error.
    fn get(&self, user_id: UserID) -> Result<User, Error> {
        let user = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare("SELECT id, name, email FROM user WHERE id = :id")?
            .query_row(&[(":id", &user_id.as_i64())], Self::map_row)?;

        Ok(user)
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS user (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE
                )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id: i64 = row.get(offset)?;
        let name = row.get(offset + 1)?;
        let email = row.get(offset + 2)?;

        Ok(User {
            id: UserID::new(id),
            name,
            email,
        })
    }
}
