//! This file defines the per-user monthly budget and its alert flag.

use serde::{Deserialize, Serialize};

use crate::models::UserID;

/// A user's monthly budget ceiling along with the state of the current alert
/// episode.
///
/// `alert_sent` is true if and only if an over-budget notification has
/// already been dispatched since the budget was last set. Setting the budget
/// is the only transition that clears the flag; dipping back under the
/// ceiling does not.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The user this budget belongs to. One budget per user.
    pub user_id: UserID,
    /// The monthly spending ceiling. Always greater than zero.
    pub monthly_budget: f64,
    /// Whether an alert has been dispatched for the current episode.
    pub alert_sent: bool,
}
