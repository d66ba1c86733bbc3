//! This file defines a user profile and its ID type.
//!
//! Authentication is handled outside this crate; the profile exists so the
//! alert path knows the name and email address to put on a notification.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A newtype wrapper for integer user IDs.
///
/// This helps disambiguate user IDs from other types of IDs, leading to
/// better compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw integer.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer, for binding to SQL parameters.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for UserID {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A user of the application.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The ID of the user.
    pub id: UserID,
    /// The display name used when addressing the user in notifications.
    pub name: String,
    /// Where budget alerts for this user are delivered.
    pub email: String,
}
