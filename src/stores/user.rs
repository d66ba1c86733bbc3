//! Defines the user profile store trait.

use crate::{
    Error,
    models::{User, UserID},
};

/// Handles the creation and retrieval of user profiles.
pub trait UserStore {
    /// Create a new user profile.
    ///
    /// # Errors
    /// Returns [Error::DuplicateEmail] if `email` is already registered.
    fn create(&mut self, name: &str, email: &str) -> Result<User, Error>;

    /// Retrieve the profile for `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no such user exists.
    fn get(&self, user_id: UserID) -> Result<User, Error>;
}
