use std::collections::HashMap;

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::business_days::business_days;
use super::policy::{HALF_DAY, LeavePolicy};
use super::types::{LeaveRequest, LeaveStatus, LeaveType};

/// Paid-leave consumption of one employee in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct MonthlyUsage {
    /// First day of the month
    #[schema(example = "2026-03-01", format = "date", value_type = String)]
    pub month: NaiveDate,
    #[schema(example = 1.0)]
    pub used: f64,
    #[schema(example = 1.5)]
    pub limit: f64,
    #[schema(example = 0.5)]
    pub remaining: f64,
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// Days a request over `[start, end]` charges against the month containing
/// `month`.
///
/// A half day counts only when its date falls inside the month on a working
/// day. Everything else is clipped to the month and counted in business days.
pub fn days_in_month(
    policy: &LeavePolicy,
    leave_type: LeaveType,
    start: NaiveDate,
    end: NaiveDate,
    month: NaiveDate,
) -> f64 {
    let month_start = first_of_month(month);
    let month_end = last_of_month(month);

    if leave_type == LeaveType::HalfDay {
        let in_month = start >= month_start && start <= month_end;
        return if in_month && !policy.is_weekend(start) {
            HALF_DAY
        } else {
            0.0
        };
    }

    let clipped_start = start.max(month_start);
    let clipped_end = end.min(month_end);
    if clipped_start > clipped_end {
        return 0.0;
    }
    f64::from(business_days(policy, clipped_start, clipped_end))
}

/// Approved, paid-eligible history of one employee, with per-month usage
/// memoized for the lifetime of one evaluation.
///
/// Nothing is kept between evaluations: build a fresh ledger from the
/// authoritative history every time.
pub struct UsageLedger<'a> {
    policy: &'a LeavePolicy,
    history: Vec<&'a LeaveRequest>,
    months: HashMap<NaiveDate, MonthlyUsage>,
}

impl<'a> UsageLedger<'a> {
    /// Requests of other employees, non-approved requests and quota-exempt
    /// types are dropped here.
    pub fn new(policy: &'a LeavePolicy, employee_id: u64, requests: &'a [LeaveRequest]) -> Self {
        let history = requests
            .iter()
            .filter(|r| r.employee_id == employee_id)
            .filter(|r| r.status == LeaveStatus::Approved)
            .filter(|r| policy.is_paid_eligible(r.leave_type))
            .collect();

        Self {
            policy,
            history,
            months: HashMap::new(),
        }
    }

    pub fn usage(&mut self, month: NaiveDate) -> MonthlyUsage {
        let anchor = first_of_month(month);
        if let Some(usage) = self.months.get(&anchor) {
            return *usage;
        }

        let usage = self.compute(anchor);
        self.months.insert(anchor, usage);
        usage
    }

    fn compute(&self, month_start: NaiveDate) -> MonthlyUsage {
        let month_end = last_of_month(month_start);

        let used: f64 = self
            .history
            .iter()
            .filter(|r| r.start_date <= month_end && r.end_date >= month_start)
            .map(|r| days_in_month(self.policy, r.leave_type, r.start_date, r.end_date, month_start))
            .sum();

        let limit = self.policy.monthly_limit;
        MonthlyUsage {
            month: month_start,
            used,
            limit,
            remaining: (limit - used).max(0.0),
        }
    }
}

/// Paid-leave usage of `employee_id` in the month containing `month`.
///
/// `requests` may hold anyone's requests in any status; only the employee's
/// approved, paid-eligible requests are counted.
pub fn monthly_usage(
    policy: &LeavePolicy,
    employee_id: u64,
    requests: &[LeaveRequest],
    month: NaiveDate,
) -> MonthlyUsage {
    UsageLedger::new(policy, employee_id, requests).usage(month)
}
