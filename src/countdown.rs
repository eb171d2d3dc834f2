//! Day Counter
//!
//! Whole-day statistics between a start and a target date.

use chrono::NaiveDate;

/// Day statistics for one (start, target, today) triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DayStats {
    pub total_days: i64,
    pub passed_days: i64,
    pub remaining_days: i64,
}

impl DayStats {
    /// Share of the range already passed, 0..=100
    pub fn progress_percent(&self) -> f64 {
        if self.total_days == 0 {
            return 0.0;
        }
        self.passed_days as f64 / self.total_days as f64 * 100.0
    }
}

/// Calendar dates carry no time of day, so day differences are already
/// whole (midnight to midnight) and need no rounding.
pub fn day_stats(start: NaiveDate, target: NaiveDate, today: NaiveDate) -> DayStats {
    let total_days = (target - start).num_days().max(0);
    let passed_days = (today - start).num_days().clamp(0, total_days);
    DayStats {
        total_days,
        passed_days,
        remaining_days: total_days - passed_days,
    }
}

/// Parse the value of an `<input type="date">`
pub fn parse_date_input(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn format_date_input(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Days, Months};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_ago_to_next_year() {
        let today = date(2026, 10, 15);
        let start = today - Days::new(7);
        let target = today + Months::new(12);

        let stats = day_stats(start, target, today);

        assert_eq!(stats.total_days, 372);
        assert_eq!(stats.passed_days, 7);
        assert_eq!(stats.remaining_days, 365);
    }

    #[test]
    fn test_target_before_start_clamps_to_zero() {
        let stats = day_stats(date(2026, 5, 1), date(2026, 4, 1), date(2026, 4, 15));
        assert_eq!(stats, DayStats { total_days: 0, passed_days: 0, remaining_days: 0 });
        assert_eq!(stats.progress_percent(), 0.0);
    }

    #[test]
    fn test_today_outside_range() {
        let start = date(2026, 1, 1);
        let target = date(2027, 1, 1);

        let before = day_stats(start, target, date(2025, 12, 1));
        assert_eq!(before.passed_days, 0);
        assert_eq!(before.remaining_days, 365);

        let after = day_stats(start, target, date(2027, 3, 1));
        assert_eq!(after.passed_days, 365);
        assert_eq!(after.remaining_days, 0);
        assert_eq!(after.progress_percent(), 100.0);
    }

    #[test]
    fn test_invariants_hold_over_range() {
        let base = date(2026, 1, 1);
        let today = date(2026, 6, 15);
        for start_offset in (-400i64..400).step_by(37) {
            for target_offset in (-400i64..800).step_by(53) {
                let start = base + chrono::Duration::days(start_offset);
                let target = base + chrono::Duration::days(target_offset);
                let stats = day_stats(start, target, today);

                assert!(stats.total_days >= 0);
                assert!(stats.passed_days >= 0 && stats.passed_days <= stats.total_days);
                assert_eq!(stats.remaining_days, stats.total_days - stats.passed_days);
            }
        }
    }

    #[test]
    fn test_date_input_parsing() {
        assert_eq!(parse_date_input("2026-02-28"), Some(date(2026, 2, 28)));
        assert_eq!(parse_date_input(" 2026-02-28 "), Some(date(2026, 2, 28)));
        assert_eq!(parse_date_input(""), None);
        assert_eq!(parse_date_input("2026-02-30"), None);
        assert_eq!(format_date_input(date(2026, 3, 5)), "2026-03-05");
    }
}
