//! Defines the crate-wide error type and conversions from SQLite errors.

use crate::models::UserID;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The email used to register a user is already taken by another profile.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// A budget must be a positive amount of money.
    ///
    /// Rejected at the store boundary so the analytics code can assume every
    /// stored budget divides cleanly into a percentage.
    #[error("a monthly budget must be greater than zero, got {0}")]
    NonPositiveBudget(f64),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// No profile exists for the user that an alert should be delivered to.
    #[error("no profile found for user {0}, cannot address the alert")]
    UnknownRecipient(UserID),

    /// The notifier could not deliver a budget alert.
    ///
    /// The caller must leave the alert flag unset so the alert is retried on
    /// the next qualifying transaction.
    #[error("could not deliver budget alert: {0}")]
    NotificationFailed(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {error}");
                Error::SqlError(error)
            }
        }
    }
}
