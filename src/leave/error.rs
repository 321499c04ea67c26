use derive_more::Display;

/// Boundary errors raised before a request reaches the calculators.
///
/// The calculators themselves never fail: given well-formed dates and a known
/// leave type they always produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum LeaveError {
    #[display(fmt = "Invalid date '{}', expected YYYY-MM-DD", _0)]
    InvalidDate(String),

    #[display(fmt = "start_date cannot be after end_date")]
    EndBeforeStart,

    #[display(fmt = "A half-day leave must start and end on the same date")]
    HalfDaySpan,

    #[display(fmt = "Unknown leave type '{}'", _0)]
    UnknownLeaveType(String),

    #[display(fmt = "Unknown leave status '{}'", _0)]
    UnknownStatus(String),
}

impl std::error::Error for LeaveError {}
