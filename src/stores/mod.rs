//! Contains traits and implementations for objects that store the domain
//! [models](crate::models).

mod budget;
mod streak;
mod transaction;
mod user;

pub mod sqlite;

pub use budget::BudgetStore;
pub use streak::StreakStore;
pub use transaction::{SortOrder, TransactionQuery, TransactionStore};
pub use user::UserStore;
