use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::leave::{LeaveError, LeaveRequest, LeaveStatus, LeaveType};

/// `leave_requests` row as stored. Type and status are plain strings in the
/// table and are checked on conversion.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct LeaveRow {
    pub id: u64,
    pub employee_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub leave_type: String,
    pub status: String,
}

impl TryFrom<LeaveRow> for LeaveRequest {
    type Error = LeaveError;

    fn try_from(row: LeaveRow) -> Result<Self, Self::Error> {
        Ok(LeaveRequest {
            id: row.id,
            employee_id: row.employee_id,
            leave_type: LeaveType::parse(&row.leave_type)?,
            start_date: row.start_date,
            end_date: row.end_date,
            status: LeaveStatus::parse(&row.status)?,
        })
    }
}
