//! Small calendar helpers shared by the analytics code.
//!
//! Keeping date arithmetic here means the numeric components are pure
//! functions of explicit date ranges and never consult a system clock.

use std::ops::RangeInclusive;

use time::{Date, Duration, util::days_in_month};

/// The first day of `date`'s month.
pub fn month_start(date: Date) -> Date {
    Date::from_calendar_date(date.year(), date.month(), 1)
        .expect("the first of a valid date's month is always a valid date")
}

/// The number of days in `date`'s month, accounting for leap years.
pub fn total_days_in_month(date: Date) -> u8 {
    days_in_month(date.month(), date.year())
}

/// The inclusive range from the first of `date`'s month through `date`.
pub fn month_to_date(date: Date) -> RangeInclusive<Date> {
    month_start(date)..=date
}

/// The inclusive trailing seven-day window ending on `date`.
pub fn trailing_week(date: Date) -> RangeInclusive<Date> {
    date - Duration::days(6)..=date
}
