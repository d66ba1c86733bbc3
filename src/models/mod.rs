//! This module defines the domain data types.

pub use budget::Budget;
pub use streak::Streak;
pub use transaction::{Transaction, TransactionBuilder};
pub use user::{User, UserID};

mod budget;
mod streak;
mod transaction;
mod user;

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;
