//! Duration and credit arithmetic for formations.
//!
//! Policy: one credit per three formation-hours, rounded up per student.
//! The end date of an action is driven by the chosen weekly dedication -
//! `ceil(total_hours / weekly_dedication)` weeks after the start. Duration
//! strings use the catalog's "N h. M min." shape.

use chrono::NaiveDate;

/// Formation-hours covered by a single credit.
const HOURS_PER_CREDIT: f64 = 3.0;

/// Inclusive bounds for the weekly dedication, in hours/week.
pub const WEEKLY_DEDICATION_RANGE: std::ops::RangeInclusive<i32> = 2..=40;

/// Credits one enrolled student consumes for a formation of `total_hours`.
///
/// `ceil(total_hours / 3)`; a zero or negative duration costs nothing.
pub fn credits_per_student(total_hours: f64) -> i64 {
    if total_hours <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let credits = (total_hours / HOURS_PER_CREDIT).ceil() as i64;
    credits
}

/// Total credits a roster of `student_count` consumes.
pub fn total_credits(per_student: i64, student_count: usize) -> i64 {
    per_student * student_count as i64
}

/// Signed credit delta when an action's roster changes size.
///
/// Positive means additional consumption, negative means the new roster
/// would consume less than what was already charged. Exposed so edit flows
/// can display over/under consumption without recomputing totals.
pub fn credits_delta(per_student: i64, current_count: usize, new_count: usize) -> i64 {
    total_credits(per_student, new_count) - total_credits(per_student, current_count)
}

/// Whether a weekly dedication is inside the allowed 2-40 hours/week range.
pub fn is_valid_weekly_dedication(hours: i32) -> bool {
    WEEKLY_DEDICATION_RANGE.contains(&hours)
}

/// Weeks an action needs to cover `total_hours` at `weekly_dedication`
/// hours per week, rounded up. Returns `None` when the dedication is
/// outside the allowed range.
pub fn weeks_needed(total_hours: f64, weekly_dedication: i32) -> Option<u64> {
    if !is_valid_weekly_dedication(weekly_dedication) || total_hours <= 0.0 {
        return None;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let weeks = (total_hours / f64::from(weekly_dedication)).ceil() as u64;
    Some(weeks)
}

/// End date of an action: `start + ceil(total_hours / weekly_dedication)`
/// weeks. Returns `None` for an out-of-range dedication.
pub fn end_date(start: NaiveDate, total_hours: f64, weekly_dedication: i32) -> Option<NaiveDate> {
    let weeks = weeks_needed(total_hours, weekly_dedication)?;
    Some(start + chrono::Days::new(weeks * 7))
}

/// Formats fractional hours as the catalog's `"N h. M min."` string.
///
/// Minutes are rounded half-up; when rounding produces 60 the minute field
/// resets to 0 and carries into the hour.
pub fn format_duration(total_hours: f64) -> String {
    let hours = total_hours.max(0.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut whole = hours.floor() as u64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut minutes = (hours.fract() * 60.0).round() as u64;
    if minutes == 60 {
        whole += 1;
        minutes = 0;
    }
    format!("{whole} h. {minutes} min.")
}

/// Parses a `"N h. M min."` duration string into fractional hours.
///
/// Both the hour and the minute field contribute ("24 h. 30 min." is 24.5);
/// a missing or malformed minute field is treated as zero, a malformed hour
/// field yields `None`.
pub fn parse_duration(text: &str) -> Option<f64> {
    let mut tokens = text.split_whitespace();
    let hours: f64 = tokens.next()?.parse().ok()?;
    if tokens.next() != Some("h.") {
        return None;
    }
    let minutes: f64 = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .unwrap_or_default();
    Some(hours + minutes / 60.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::float_cmp)]
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_credits_per_student() {
        assert_eq!(credits_per_student(20.0), 7); // ceil(20/3)
        assert_eq!(credits_per_student(9.0), 3);
        assert_eq!(credits_per_student(18.0), 6);
        assert_eq!(credits_per_student(0.5), 1);
        assert_eq!(credits_per_student(0.0), 0);
    }

    #[test]
    fn test_total_credits() {
        assert_eq!(total_credits(7, 5), 35);
        assert_eq!(total_credits(3, 2), 6);
        assert_eq!(total_credits(3, 0), 0);
    }

    #[test]
    fn test_credits_delta_is_signed() {
        assert_eq!(credits_delta(6, 3, 5), 12);
        assert_eq!(credits_delta(6, 5, 3), -12);
        assert_eq!(credits_delta(6, 4, 4), 0);
    }

    #[test]
    fn test_weekly_dedication_bounds() {
        assert!(!is_valid_weekly_dedication(1));
        assert!(is_valid_weekly_dedication(2));
        assert!(is_valid_weekly_dedication(40));
        assert!(!is_valid_weekly_dedication(41));
    }

    #[test]
    fn test_end_date_weeks() {
        // 24.5 h at 8 h/week -> ceil(3.06) = 4 weeks
        let end = end_date(date(2025, 6, 12), 24.5, 8).unwrap();
        assert_eq!(end, date(2025, 7, 10));
        // Exact division: 24 h at 8 h/week -> 3 weeks
        let end = end_date(date(2025, 6, 12), 24.0, 8).unwrap();
        assert_eq!(end, date(2025, 7, 3));
    }

    #[test]
    fn test_end_date_monotonic_in_dedication() {
        // More weekly hours never pushes the end date later
        let start = date(2025, 6, 12);
        let mut previous = end_date(start, 30.0, 2).unwrap();
        for dedication in 3..=40 {
            let current = end_date(start, 30.0, dedication).unwrap();
            assert!(current <= previous, "dedication {dedication}");
            previous = current;
        }
    }

    #[test]
    fn test_end_date_rejects_out_of_range_dedication() {
        assert!(end_date(date(2025, 6, 12), 20.0, 1).is_none());
        assert!(end_date(date(2025, 6, 12), 20.0, 41).is_none());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(24.5), "24 h. 30 min.");
        assert_eq!(format_duration(10.3), "10 h. 18 min.");
        assert_eq!(format_duration(9.0), "9 h. 0 min.");
    }

    #[test]
    fn test_format_duration_minute_carry() {
        // 2.999 h -> 59.94 min rounds to 60, carrying into the hour
        assert_eq!(format_duration(2.999), "3 h. 0 min.");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("24 h. 30 min.").unwrap(), 24.5);
        assert_eq!(parse_duration("9 h. 0 min.").unwrap(), 9.0);
        assert_eq!(parse_duration("1 h. 45 min.").unwrap(), 1.75);
        assert!(parse_duration("nonsense").is_none());
    }

    #[test]
    fn test_parse_format_round_trip() {
        for text in ["4 h. 30 min.", "5 h. 48 min.", "1 h. 3 min."] {
            let hours = parse_duration(text).unwrap();
            assert_eq!(format_duration(hours), text);
        }
    }
}
