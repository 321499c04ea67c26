//! Paid-leave accrual: business-day counting, monthly quota tracking and the
//! paid/unpaid decision for a candidate request.
//!
//! Everything in here is pure. Callers hand in the employee's authoritative
//! request history on every call; nothing is cached between calls.

pub mod business_days;
pub mod classifier;
pub mod error;
pub mod policy;
pub mod quota;
pub mod types;

pub use classifier::{Classification, MonthAnalysis, PayClass, QuotaDecision, classify, enforce_quota};
pub use error::LeaveError;
pub use policy::LeavePolicy;
pub use quota::{MonthlyUsage, UsageLedger, monthly_usage};
pub use types::{LeaveRequest, LeaveStatus, LeaveType, parse_iso_date, validate_range};
