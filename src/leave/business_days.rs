use chrono::NaiveDate;

use super::policy::{HALF_DAY, LeavePolicy};
use super::types::LeaveType;

/// Number of non-weekend days in `[start, end]`, both ends inclusive.
/// An inverted range counts as zero.
pub fn business_days(policy: &LeavePolicy, start: NaiveDate, end: NaiveDate) -> u32 {
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !policy.is_weekend(*day))
        .count() as u32
}

/// Days a request of `leave_type` over `[start, end]` is charged.
///
/// A half day is always `0.5`; whether it lands on a weekend is the quota
/// tracker's concern, not this function's.
pub fn chargeable_days(
    policy: &LeavePolicy,
    start: NaiveDate,
    end: NaiveDate,
    leave_type: LeaveType,
) -> f64 {
    match leave_type {
        LeaveType::HalfDay => HALF_DAY,
        _ => f64::from(business_days(policy, start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_simple_week() {
        let policy = LeavePolicy::default();
        // Mon 2026-03-02 .. Fri 2026-03-06
        let days = chargeable_days(&policy, date(2026, 3, 2), date(2026, 3, 6), LeaveType::Annual);
        assert_eq!(days, 5.0);
    }

    #[test]
    fn test_full_week_skips_weekend() {
        let policy = LeavePolicy::default();
        // Mon 2026-03-02 .. Sun 2026-03-15
        assert_eq!(business_days(&policy, date(2026, 3, 2), date(2026, 3, 15)), 10);
    }

    #[test]
    fn test_weekend_only_range_is_zero() {
        let policy = LeavePolicy::default();
        let saturday = date(2026, 3, 7);
        let sunday = date(2026, 3, 8);
        for leave_type in [LeaveType::Annual, LeaveType::Sick, LeaveType::Other] {
            assert_eq!(chargeable_days(&policy, saturday, sunday, leave_type), 0.0);
        }
    }

    #[test]
    fn test_single_day() {
        let policy = LeavePolicy::default();
        let wednesday = date(2026, 3, 4);
        assert_eq!(chargeable_days(&policy, wednesday, wednesday, LeaveType::Sick), 1.0);
    }

    #[test]
    fn test_half_day_is_constant() {
        let policy = LeavePolicy::default();
        let wednesday = date(2026, 3, 4);
        let saturday = date(2026, 3, 7);
        assert_eq!(chargeable_days(&policy, wednesday, wednesday, LeaveType::HalfDay), 0.5);
        // no weekend filter at this level
        assert_eq!(chargeable_days(&policy, saturday, saturday, LeaveType::HalfDay), 0.5);
    }

    #[test]
    fn test_inverted_range_is_zero() {
        let policy = LeavePolicy::default();
        assert_eq!(business_days(&policy, date(2026, 3, 6), date(2026, 3, 2)), 0);
    }

    #[test]
    fn test_range_across_leap_day() {
        let policy = LeavePolicy::default();
        // Thu 2024-02-29 .. Fri 2024-03-01
        assert_eq!(business_days(&policy, date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_custom_weekend() {
        let policy = LeavePolicy {
            weekend_days: vec![chrono::Weekday::Fri, chrono::Weekday::Sat],
            ..LeavePolicy::default()
        };
        // Mon 2026-03-02 .. Sun 2026-03-08
        assert_eq!(business_days(&policy, date(2026, 3, 2), date(2026, 3, 8)), 5);
        assert_eq!(business_days(&policy, date(2026, 3, 6), date(2026, 3, 7)), 0);
    }
}
