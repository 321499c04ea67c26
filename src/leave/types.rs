use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};
use utoipa::ToSchema;

use super::error::LeaveError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    AsRefStr,
    EnumIter,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveType {
    Annual,
    Sick,
    Personal,
    #[serde(rename = "halfday")]
    #[strum(serialize = "halfday")]
    HalfDay,
    Unpaid,
    Other,
    #[serde(rename = "workfromhome")]
    #[strum(serialize = "workfromhome")]
    WorkFromHome,
}

impl LeaveType {
    /// Types that never touch the paid-leave quota, whatever the policy says.
    pub fn is_quota_exempt(&self) -> bool {
        matches!(self, LeaveType::Unpaid | LeaveType::WorkFromHome)
    }

    pub fn parse(value: &str) -> Result<Self, LeaveError> {
        value
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| LeaveError::UnknownLeaveType(value.to_string()))
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    EnumString,
    AsRefStr,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn parse(value: &str) -> Result<Self, LeaveError> {
        value
            .trim()
            .to_lowercase()
            .parse()
            .map_err(|_| LeaveError::UnknownStatus(value.to_string()))
    }
}

/// A leave request as the calculators see it. Read-only: nothing in
/// `crate::leave` ever mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: u64,
    pub employee_id: u64,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: LeaveStatus,
}

/// Leave history in the shape the history-fetch API returns it: dates are
/// ISO-8601 strings and must be parsed before any comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaveRecord {
    pub id: u64,
    pub employee_id: u64,
    pub leave_type: String,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

impl TryFrom<LeaveRecord> for LeaveRequest {
    type Error = LeaveError;

    fn try_from(record: LeaveRecord) -> Result<Self, Self::Error> {
        Ok(LeaveRequest {
            id: record.id,
            employee_id: record.employee_id,
            leave_type: LeaveType::parse(&record.leave_type)?,
            start_date: parse_iso_date(&record.start_date)?,
            end_date: parse_iso_date(&record.end_date)?,
            status: LeaveStatus::parse(&record.status)?,
        })
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`
/// timestamps. Timestamps are reduced to their calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, LeaveError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(dt.date());
    }

    Err(LeaveError::InvalidDate(value.to_string()))
}

/// Rejects ranges the calculators are not defined for.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    leave_type: LeaveType,
) -> Result<(), LeaveError> {
    if leave_type == LeaveType::HalfDay {
        if start != end {
            return Err(LeaveError::HalfDaySpan);
        }
        return Ok(());
    }
    if end < start {
        return Err(LeaveError::EndBeforeStart);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_leave_type_string_forms_agree() {
        for leave_type in LeaveType::iter() {
            let json = serde_json::to_string(&leave_type).unwrap();
            assert_eq!(json, format!("\"{}\"", leave_type.as_ref()));
            assert_eq!(LeaveType::parse(leave_type.as_ref()), Ok(leave_type));
        }
        assert_eq!(LeaveType::HalfDay.to_string(), "halfday");
        assert_eq!(LeaveType::WorkFromHome.to_string(), "workfromhome");
    }

    #[test]
    fn test_leave_type_parse_is_case_insensitive() {
        assert_eq!(LeaveType::parse(" Annual "), Ok(LeaveType::Annual));
        assert_eq!(
            LeaveType::parse("vacation"),
            Err(LeaveError::UnknownLeaveType("vacation".to_string()))
        );
    }

    #[test]
    fn test_exempt_types() {
        let exempt: Vec<_> = LeaveType::iter().filter(|t| t.is_quota_exempt()).collect();
        assert_eq!(exempt, vec![LeaveType::Unpaid, LeaveType::WorkFromHome]);
    }

    #[test]
    fn test_parse_iso_date_formats() {
        assert_eq!(parse_iso_date("2026-03-02"), Ok(date(2026, 3, 2)));
        assert_eq!(parse_iso_date("2026-03-02T23:30:00Z"), Ok(date(2026, 3, 2)));
        assert_eq!(parse_iso_date("2026-03-02T08:00:00"), Ok(date(2026, 3, 2)));
        assert_eq!(
            parse_iso_date("2026-02-30"),
            Err(LeaveError::InvalidDate("2026-02-30".to_string()))
        );
        assert_eq!(
            parse_iso_date("not a date"),
            Err(LeaveError::InvalidDate("not a date".to_string()))
        );
    }

    #[test]
    fn test_record_conversion() {
        let record = LeaveRecord {
            id: 7,
            employee_id: 1000,
            leave_type: "sick".to_string(),
            start_date: "2026-01-05".to_string(),
            end_date: "2026-01-06".to_string(),
            status: "approved".to_string(),
        };

        assert_eq!(
            LeaveRequest::try_from(record),
            Ok(LeaveRequest {
                id: 7,
                employee_id: 1000,
                leave_type: LeaveType::Sick,
                start_date: date(2026, 1, 5),
                end_date: date(2026, 1, 6),
                status: LeaveStatus::Approved,
            })
        );
    }

    #[test]
    fn test_record_with_bad_date_fails_fast() {
        let record = LeaveRecord {
            id: 7,
            employee_id: 1000,
            leave_type: "annual".to_string(),
            start_date: "2026-01-05".to_string(),
            end_date: "".to_string(),
            status: "approved".to_string(),
        };

        assert_eq!(
            LeaveRequest::try_from(record),
            Err(LeaveError::InvalidDate(String::new()))
        );
    }

    #[test]
    fn test_validate_range() {
        let mon = date(2026, 3, 2);
        let fri = date(2026, 3, 6);

        assert_eq!(validate_range(mon, fri, LeaveType::Annual), Ok(()));
        assert_eq!(validate_range(mon, mon, LeaveType::Annual), Ok(()));
        assert_eq!(
            validate_range(fri, mon, LeaveType::Sick),
            Err(LeaveError::EndBeforeStart)
        );
        assert_eq!(validate_range(mon, mon, LeaveType::HalfDay), Ok(()));
        assert_eq!(
            validate_range(mon, fri, LeaveType::HalfDay),
            Err(LeaveError::HalfDaySpan)
        );
    }
}
