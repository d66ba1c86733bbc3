//! Implements a SQLite backed transaction store.
use std::{
    ops::RangeInclusive,
    sync::{Arc, Mutex},
};

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::Date;

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{Transaction, TransactionBuilder, UserID},
    stores::{SortOrder, TransactionQuery, TransactionStore},
};

/// Stores transactions in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is an unexpected SQL error.
    fn create(&mut self, builder: TransactionBuilder) -> Result<Transaction, Error> {
        let transaction = self
            .connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(
                "INSERT INTO \"transaction\" (user_id, amount, category, date)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, user_id, amount, category, date",
            )?
            .query_row(
                (
                    builder.user_id.as_i64(),
                    builder.amount,
                    &builder.category,
                    builder.date,
                ),
                Self::map_row,
            )?;

        Ok(transaction)
    }

    /// Query for transactions in the database.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn get_query(&self, query: TransactionQuery) -> Result<Vec<Transaction>, Error> {
        let mut query_string_parts = vec![
            "SELECT id, user_id, amount, category, date FROM \"transaction\"".to_string(),
        ];
        let mut where_clause_parts = vec!["user_id = ?1".to_string()];
        let mut query_parameters = vec![Value::Integer(query.user_id.as_i64())];

        if let Some(date_range) = query.date_range {
            where_clause_parts.push(format!(
                "date BETWEEN ?{} AND ?{}",
                query_parameters.len() + 1,
                query_parameters.len() + 2,
            ));
            query_parameters.push(Value::Text(date_range.start().to_string()));
            query_parameters.push(Value::Text(date_range.end().to_string()));
        }

        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));

        match query.sort_date {
            Some(SortOrder::Ascending) => query_string_parts.push("ORDER BY date ASC".to_string()),
            Some(SortOrder::Descending) => {
                query_string_parts.push("ORDER BY date DESC".to_string())
            }
            None => {}
        }

        let query_string = query_string_parts.join(" ");
        let params = params_from_iter(query_parameters.iter());

        self.connection
            .lock()
            .expect("Could not acquire database lock")
            .prepare(&query_string)?
            .query_map(params, Self::map_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
            .collect()
    }

    /// Sum a user's transaction amounts, optionally within a date range.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if there is a SQL error.
    fn sum(
        &self,
        user_id: UserID,
        date_range: Option<RangeInclusive<Date>>,
    ) -> Result<f64, Error> {
        let connection = self
            .connection
            .lock()
            .expect("Could not acquire database lock");

        let total = match date_range {
            Some(range) => connection.query_row(
                "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\"
                 WHERE user_id = ?1 AND date BETWEEN ?2 AND ?3",
                (user_id.as_i64(), *range.start(), *range.end()),
                |row| row.get(0),
            )?,
            None => connection.query_row(
                "SELECT COALESCE(SUM(amount), 0.0) FROM \"transaction\" WHERE user_id = ?1",
                [user_id.as_i64()],
                |row| row.get(0),
            )?,
        };

        Ok(total)
    }
}

impl CreateTable for SQLiteTransactionStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                date TEXT NOT NULL
                )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteTransactionStore {
    type ReturnType = Transaction;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = row.get(offset)?;
        let user_id: i64 = row.get(offset + 1)?;
        let amount = row.get(offset + 2)?;
        let category = row.get(offset + 3)?;
        let date = row.get(offset + 4)?;

        Ok(Transaction::new(
            id,
            UserID::new(user_id),
            amount,
            category,
            date,
        ))
    }
}
