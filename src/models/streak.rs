//! This file defines the per-user daily logging streak.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::models::UserID;

/// How many consecutive calendar days a user has logged at least one expense.
///
/// Created lazily on the user's first transaction, so `current_streak` is
/// always at least 1 once a row exists.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Streak {
    /// The user this streak belongs to. One streak per user.
    pub user_id: UserID,
    /// The length of the streak in days.
    pub current_streak: u32,
    /// The most recent date that counted towards the streak.
    pub last_updated: Date,
}
