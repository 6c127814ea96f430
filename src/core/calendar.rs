//! Work-day calendar: Mon–Sat weeks, Sunday excluded.
//!
//! Pure date arithmetic. All dates and times in the engine are Manila
//! wall-clock values; instants are normalized before they get here, so
//! none of this code ever sees UTC.

use chrono::{Datelike, NaiveDate, Weekday};

/// Mon–Sat are workdays; Sunday never is.
pub fn is_workday(date: NaiveDate) -> bool {
    date.weekday() != Weekday::Sun
}

/// The Monday starting the week that contains `date`.
/// For a Sunday this is the Monday six days earlier.
pub fn monday_on_or_before(date: NaiveDate) -> NaiveDate {
    let days_back = date.weekday().num_days_from_monday() as i64;
    date - chrono::Duration::days(days_back)
}

/// The Mon–Sat span of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = monday_on_or_before(date);
    (monday, monday + chrono::Duration::days(5))
}

/// Attendance before the hire date is rejected.
pub fn is_within_hire_window(date: NaiveDate, hire_date: NaiveDate) -> bool {
    date >= hire_date
}

/// A valid pay period is exactly the Mon–Sat span of one week.
pub fn is_pay_period(start: NaiveDate, end: NaiveDate) -> bool {
    start.weekday() == Weekday::Mon && end == start + chrono::Duration::days(5)
}
