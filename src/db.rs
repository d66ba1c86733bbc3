//! Defines traits for bootstrapping the application's database and mapping
//! rows to domain types.

use rusqlite::{Connection, Row};

use crate::stores::sqlite::{
    SQLiteBudgetStore, SQLiteStreakStore, SQLiteTransactionStore, SQLiteUserStore,
};

/// A trait for adding an object schema to a database.
pub trait CreateTable {
    /// Create a table for the model.
    ///
    /// # Errors
    /// Returns an error if the table already exists or if there is an SQL
    /// error.
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error>;
}

/// A trait for mapping from a `rusqlite::Row` from a SQLite database to a
/// concrete rust type.
pub trait MapRow {
    /// The type that the row is mapped to.
    type ReturnType;

    /// Convert a row into a concrete type.
    ///
    /// # Errors
    /// Returns an error if a row value could not be converted to the
    /// corresponding rust type.
    fn map_row(row: &Row) -> Result<Self::ReturnType, rusqlite::Error> {
        Self::map_row_with_offset(row, 0)
    }

    /// Convert a row into a concrete type, starting from the column at
    /// `offset`.
    ///
    /// # Errors
    /// Returns an error if a row value could not be converted to the
    /// corresponding rust type.
    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error>;
}

/// Create the tables for all of the domain models.
///
/// # Errors
/// Returns an error if there was a problem executing the SQL.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    SQLiteUserStore::create_table(connection)?;
    SQLiteTransactionStore::create_table(connection)?;
    SQLiteBudgetStore::create_table(connection)?;
    SQLiteStreakStore::create_table(connection)?;

    Ok(())
}

#[cfg(test)]
mod initialize_tests {
    use rusqlite::Connection;

    use super::initialize;

    #[test]
    fn initialize_creates_all_tables() {
        let connection = Connection::open_in_memory().unwrap();

        initialize(&connection).expect("Could not initialize database");

        let mut statement = connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .unwrap();
        let table_names: Vec<String> = statement
            .query_map([], |row| row.get(0))
            .unwrap()
            .map(|name| name.unwrap())
            .collect();

        for want in ["budget", "streak", "transaction", "user"] {
            assert!(
                table_names.iter().any(|name| name == want),
                "want table {want}, got {table_names:?}"
            );
        }
    }
}
