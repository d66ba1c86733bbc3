//! Spendwatch turns an append-only expense ledger into personal-finance
//! analytics: a daily logging streak, an at-most-once-per-episode over-budget
//! alert, a fitted spending trend, and month-end spend projections.
//!
//! The [engine::Tracker] is the main entry point. It is generic over the
//! [store traits](stores) and the [notifier](notify::Notifier), with SQLite
//! implementations provided in [stores::sqlite].

#![warn(missing_docs)]

pub mod analytics;
pub mod calendar;
pub mod db;
pub mod engine;
mod error;
pub mod models;
pub mod notify;
pub mod stores;

pub use db::initialize as initialize_db;
pub use engine::{RecordedExpense, Tracker};
pub use error::Error;
