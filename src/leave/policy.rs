use chrono::{Datelike, NaiveDate, Weekday};

use super::types::LeaveType;

/// Paid days an employee accrues per calendar month.
pub const MONTHLY_PAID_LEAVE_LIMIT: f64 = 1.5;

pub const PAID_ELIGIBLE_TYPES: [LeaveType; 5] = [
    LeaveType::Annual,
    LeaveType::Sick,
    LeaveType::Personal,
    LeaveType::HalfDay,
    LeaveType::Other,
];

pub const WEEKEND_DAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Chargeable value of one half-day request.
pub const HALF_DAY: f64 = 0.5;

/// The knobs of the accrual policy. `Default` is the company policy.
#[derive(Debug, Clone, PartialEq)]
pub struct LeavePolicy {
    pub monthly_limit: f64,
    pub paid_eligible: Vec<LeaveType>,
    pub weekend_days: Vec<Weekday>,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            monthly_limit: MONTHLY_PAID_LEAVE_LIMIT,
            paid_eligible: PAID_ELIGIBLE_TYPES.to_vec(),
            weekend_days: WEEKEND_DAYS.to_vec(),
        }
    }
}

impl LeavePolicy {
    /// `unpaid` and `workfromhome` are never eligible, even if a custom
    /// policy lists them.
    pub fn is_paid_eligible(&self, leave_type: LeaveType) -> bool {
        !leave_type.is_quota_exempt() && self.paid_eligible.contains(&leave_type)
    }

    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        self.weekend_days.contains(&date.weekday())
    }
}
