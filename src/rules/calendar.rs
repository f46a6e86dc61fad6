//! Calendar rule for formative-action start dates.
//!
//! An action may only start on a Thursday, and only with at least four
//! business days of lead time (weekends excluded; public holidays are not
//! considered). All functions take `today` explicitly so callers and tests
//! can evaluate the rule on any reference date.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Business days of lead time required before an action can start.
const LEAD_TIME_BUSINESS_DAYS: u32 = 4;

/// Advances `date` by `n` business days, skipping Saturdays and Sundays.
///
/// Each step moves forward one calendar day and only counts days that land
/// on Monday through Friday, so starting from a weekend the first counted
/// day is the following Monday.
pub fn add_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut remaining = n;
    while remaining > 0 {
        current = current + Days::new(1);
        if !is_weekend(current) {
            remaining -= 1;
        }
    }
    current
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Returns the earliest date the lead-time policy allows, Thursday or not.
fn earliest_allowed(today: NaiveDate) -> NaiveDate {
    add_business_days(today, LEAD_TIME_BUSINESS_DAYS)
}

/// Checks whether `date` is a valid start date as seen from `today`.
///
/// Valid means: `date` falls on a Thursday and is on or after
/// `today + 4 business days`. The boundary is inclusive - if the lead-time
/// cutoff itself lands on a Thursday, that Thursday qualifies.
pub fn is_valid_start_date(today: NaiveDate, date: NaiveDate) -> bool {
    date.weekday() == Weekday::Thu && date >= earliest_allowed(today)
}

/// Returns the earliest valid start date: the first Thursday on or after
/// `today + 4 business days`.
///
/// Calendar widgets use this to highlight selectable Thursdays without
/// probing every date through [`is_valid_start_date`].
pub fn minimum_start_date(today: NaiveDate) -> NaiveDate {
    let mut candidate = earliest_allowed(today);
    while candidate.weekday() != Weekday::Thu {
        candidate = candidate + Days::new(1);
    }
    candidate
}

/// Calendar days from `today` until `date` (negative once `date` is past).
pub fn days_until(today: NaiveDate, date: NaiveDate) -> i64 {
    (date - today).num_days()
}
