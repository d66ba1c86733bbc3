//! Maintains the consecutive-calendar-day logging streak.

use time::{Date, Duration};

use crate::models::{Streak, UserID};

/// Advance `user_id`'s streak for an expense logged on `today`.
///
/// Rules:
/// - No prior streak: start a new streak of 1.
/// - The prior streak was last updated yesterday: extend it by one day.
/// - Anything else (same-day repeat, a gap of two or more days, or a
///   backdated entry): restart at 1.
///
/// A streak rewards exactly one new calendar day of activity per day, so
/// repeated entries on one day never inflate it. Backdated entries are
/// treated the same as gaps.
pub fn advance_streak(prior: Option<&Streak>, user_id: UserID, today: Date) -> Streak {
    let current_streak = match prior {
        Some(streak) if streak.last_updated == today - Duration::days(1) => {
            streak.current_streak + 1
        }
        _ => 1,
    };

    Streak {
        user_id,
        current_streak,
        last_updated: today,
    }
}
