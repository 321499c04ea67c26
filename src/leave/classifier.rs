use chrono::{Months, NaiveDate};
use serde::Serialize;
use utoipa::ToSchema;

use super::policy::LeavePolicy;
use super::quota::{UsageLedger, days_in_month, first_of_month};
use super::types::{LeaveRequest, LeaveType};

/// How a candidate request would be paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PayClass {
    Paid,
    Unpaid,
    /// Work-from-home is neither paid leave nor unpaid leave.
    NotApplicable,
}

/// Quota picture of one calendar month touched by a candidate request.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct MonthAnalysis {
    #[schema(example = "2026-03-01", format = "date", value_type = String)]
    pub month: NaiveDate,
    #[schema(example = "March 2026")]
    pub month_name: String,
    /// Usage before the candidate request
    #[schema(example = 1.0)]
    pub current_used: f64,
    #[schema(example = 0.5)]
    pub request_days_in_month: f64,
    #[schema(example = 1.5)]
    pub monthly_limit: f64,
    #[schema(example = 0.5)]
    pub remaining: f64,
    pub would_exceed: bool,
    #[schema(example = 0.0)]
    pub exceed_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Classification {
    pub would_exceed: bool,
    pub will_be_paid: bool,
    pub pay_class: PayClass,
    pub per_month_analysis: Vec<MonthAnalysis>,
}

impl Classification {
    fn exempt(leave_type: LeaveType) -> Self {
        let pay_class = match leave_type {
            LeaveType::WorkFromHome => PayClass::NotApplicable,
            _ => PayClass::Unpaid,
        };
        Self {
            would_exceed: false,
            will_be_paid: false,
            pay_class,
            per_month_analysis: Vec::new(),
        }
    }
}

/// First day of every calendar month overlapping `[start, end]`, in order.
pub fn spanned_months(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let last = first_of_month(end);
    let mut months = Vec::new();
    let mut current = Some(first_of_month(start));

    while let Some(month) = current.filter(|m| *m <= last) {
        months.push(month);
        current = month.checked_add_months(Months::new(1));
    }
    months
}

/// Whether a request is paid as a whole, given its per-month analysis.
///
/// Exceeding the cap in any month makes the entire request unpaid; there is
/// no paid/unpaid split across months.
pub fn whole_request_is_paid(per_month: &[MonthAnalysis]) -> bool {
    !per_month.iter().any(|m| m.would_exceed)
}

/// Decides whether a candidate request over `[start, end]` would be paid,
/// against `employee_id`'s approved history in `requests`.
///
/// `requests` must not contain the candidate itself as an approved request,
/// otherwise it is counted twice.
pub fn classify(
    policy: &LeavePolicy,
    employee_id: u64,
    requests: &[LeaveRequest],
    start: NaiveDate,
    end: NaiveDate,
    leave_type: LeaveType,
) -> Classification {
    if leave_type.is_quota_exempt() {
        return Classification::exempt(leave_type);
    }
    if !policy.is_paid_eligible(leave_type) {
        // not tracked by this policy, so nothing can exceed
        return Classification {
            would_exceed: false,
            will_be_paid: true,
            pay_class: PayClass::Paid,
            per_month_analysis: Vec::new(),
        };
    }

    let mut ledger = UsageLedger::new(policy, employee_id, requests);

    let per_month_analysis: Vec<MonthAnalysis> = spanned_months(start, end)
        .into_iter()
        .map(|month| {
            let current = ledger.usage(month);
            let request_days = days_in_month(policy, leave_type, start, end, month);

            MonthAnalysis {
                month,
                month_name: month.format("%B %Y").to_string(),
                current_used: current.used,
                request_days_in_month: request_days,
                monthly_limit: current.limit,
                remaining: current.remaining,
                would_exceed: current.used + request_days > current.limit,
                exceed_days: (request_days - current.remaining).max(0.0),
            }
        })
        .collect();

    let will_be_paid = whole_request_is_paid(&per_month_analysis);
    Classification {
        would_exceed: !will_be_paid,
        will_be_paid,
        pay_class: if will_be_paid {
            PayClass::Paid
        } else {
            PayClass::Unpaid
        },
        per_month_analysis,
    }
}

/// Type a request is stored with after quota enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct QuotaDecision {
    pub leave_type: LeaveType,
    /// True when a paid-eligible type was rewritten to `unpaid`
    pub downgraded: bool,
}

pub fn enforce_quota(
    policy: &LeavePolicy,
    requested: LeaveType,
    classification: &Classification,
) -> QuotaDecision {
    if classification.would_exceed && policy.is_paid_eligible(requested) {
        QuotaDecision {
            leave_type: LeaveType::Unpaid,
            downgraded: true,
        }
    } else {
        QuotaDecision {
            leave_type: requested,
            downgraded: false,
        }
    }
}
