//! Defines the streak store trait.

use crate::{
    Error,
    models::{Streak, UserID},
};

/// Handles the per-user daily logging streak.
pub trait StreakStore {
    /// Retrieve the streak for `user_id`, or `None` if the user has never
    /// logged a transaction.
    fn get(&self, user_id: UserID) -> Result<Option<Streak>, Error>;

    /// Create or replace the streak row for `streak.user_id`.
    fn upsert(&mut self, streak: &Streak) -> Result<(), Error>;
}
