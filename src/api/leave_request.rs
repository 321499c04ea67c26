use crate::auth::auth::AuthUser;
use crate::config::Config;
use crate::leave::quota::{first_of_month, last_of_month};
use crate::leave::{
    Classification, LeaveError, LeavePolicy, LeaveRequest, LeaveStatus, LeaveType, MonthlyUsage,
    QuotaDecision, UsageLedger, business_days::chargeable_days, classifier::spanned_months,
    classify, enforce_quota, parse_iso_date, validate_range,
};
use crate::model::leave_request::LeaveRow;
use actix_web::{HttpResponse, Responder, ResponseError, http::StatusCode, web};
use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{MySql, MySqlPool, Transaction, prelude::FromRow};
use utoipa::{IntoParams, ToSchema};

/// Longest range the usage report covers in one call.
const MAX_USAGE_MONTHS: u32 = 12;

impl ResponseError for LeaveError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}

#[derive(Deserialize, ToSchema)]
pub struct CreateLeave {
    #[schema(example = "2026-03-30", format = "date")]
    pub start_date: String,
    #[schema(example = "2026-04-02", format = "date")]
    pub end_date: String,
    pub leave_type: LeaveType,
}

impl CreateLeave {
    /// Parsed and validated `(start, end)`.
    fn dates(&self) -> Result<(NaiveDate, NaiveDate), LeaveError> {
        let start = parse_iso_date(&self.start_date)?;
        let end = parse_iso_date(&self.end_date)?;
        validate_range(start, end, self.leave_type)?;
        Ok((start, end))
    }
}

/// What the submission form shows while the employee edits a request.
#[derive(Serialize, ToSchema)]
pub struct LeavePreview {
    pub requested_type: LeaveType,
    /// Chargeable days of the whole request
    #[schema(example = 4.0)]
    pub total_days: f64,
    /// Type the request would be stored with if submitted now
    pub decision: QuotaDecision,
    pub classification: Classification,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitLeaveResponse {
    #[schema(example = "Leave request submitted")]
    pub message: String,
    #[schema(example = 1)]
    pub leave_id: u64,
    #[schema(example = "pending")]
    pub status: String,
    pub requested_type: LeaveType,
    pub leave_type: LeaveType,
    pub downgraded: bool,
    /// Shown to the employee when the request was downgraded
    pub notice: Option<String>,
    pub classification: Classification,
}

#[derive(Serialize, ToSchema)]
pub struct ApproveLeaveResponse {
    #[schema(example = "Leave approved")]
    pub message: String,
    pub leave_type: LeaveType,
    pub downgraded: bool,
    pub notice: Option<String>,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct UsageQuery {
    /// First month of the report, `YYYY-MM`. Defaults to the current month.
    #[schema(example = "2026-03")]
    pub month: Option<String>,
    /// Number of consecutive months, 1 to 12
    #[schema(example = 3)]
    pub months: Option<u32>,
    /// Employee to report on (HR/Admin only). Defaults to the caller.
    #[schema(example = 1000)]
    pub employee_id: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct UsageResponse {
    #[schema(example = 1000)]
    pub employee_id: u64,
    pub data: Vec<MonthlyUsage>,
}

#[derive(Serialize, ToSchema)]
#[schema(example = json!({
    "data": [
        {
            "id": 1,
            "employee_id": 1000,
            "start_date": "2026-01-01",
            "end_date": "2026-01-03",
            "leave_type": "sick",
            "status": "pending",
            "created_at": "2026-01-01T00:00:00Z"
        }
    ],
    "page": 1,
    "per_page": 10,
    "total": 1
}))]
pub struct LeaveListResponse {
    pub data: Vec<LeaveResponse>,
    #[schema(example = 1)]
    pub page: u32,
    #[schema(example = 10)]
    pub per_page: u32,
    #[schema(example = 1)]
    pub total: i64,
}

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct LeaveFilter {
    #[schema(example = 123)]
    /// Filter by employee ID
    pub employee_id: Option<u64>,
    #[schema(example = "pending")]
    /// Filter by leave status
    pub status: Option<String>,
    #[schema(example = 1)]
    /// Pagination page number (start with 1)
    pub page: Option<u64>, // 1-based
    #[schema(example = 3)]
    /// Pagination per page number
    pub per_page: Option<u64>, // items per page
}

// Helper enum for typed SQLx binding
enum FilterValue<'a> {
    U64(u64),
    Str(&'a str),
}

#[derive(Serialize, Deserialize, FromRow, ToSchema)]
pub struct LeaveResponse {
    #[schema(example = 1)]
    /// leave application id
    pub id: u64,
    /// employee id for whom the leave is applied
    #[schema(example = 1000)]
    pub employee_id: u64,
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    /// leave start date
    pub start_date: NaiveDate,
    // leave end date
    #[schema(example = "2026-01-01", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    #[schema(example = "sick", value_type = String)]
    // leave type
    pub leave_type: String,
    #[schema(example = "pending", value_type = String)]
    // leave status
    pub status: Option<String>,
    // leave creation date time
    #[schema(example = "2026-01-01T00:00:00Z", format = "date-time", value_type = String)]
    pub created_at: Option<DateTime<Utc>>,
}

fn internal_error() -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("Internal Server Error")
}

/// Approved requests of `employee_id` overlapping `[from, to]`.
///
/// Every month the caller evaluates must lie inside `[from, to]`, otherwise
/// its usage is undercounted.
async fn load_approved_history<'e, E>(
    executor: E,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
    locking: bool,
) -> actix_web::Result<Vec<LeaveRequest>>
where
    E: sqlx::Executor<'e, Database = MySql>,
{
    // A locking read always sees the latest committed rows, not the
    // transaction snapshot.
    let sql = format!(
        r#"
        SELECT id, employee_id, start_date, end_date, leave_type, status
        FROM leave_requests
        WHERE employee_id = ?
        AND status = 'approved'
        AND start_date <= ?
        AND end_date >= ?
        {}
        "#,
        if locking { "LOCK IN SHARE MODE" } else { "" }
    );

    let rows = sqlx::query_as::<_, LeaveRow>(&sql)
        .bind(employee_id)
        .bind(to)
        .bind(from)
        .fetch_all(executor)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to fetch leave history");
            internal_error()
        })?;

    rows.into_iter()
        .map(LeaveRequest::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Stored leave request is malformed");
            internal_error()
        })
}

/// Serializes quota decisions per employee until the transaction ends.
async fn lock_employee(tx: &mut Transaction<'_, MySql>, employee_id: u64) -> actix_web::Result<()> {
    let found = sqlx::query_scalar::<_, u64>("SELECT id FROM employees WHERE id = ? FOR UPDATE")
        .bind(employee_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, "Failed to lock employee");
            internal_error()
        })?;

    match found {
        Some(_) => Ok(()),
        None => Err(actix_web::error::ErrorForbidden("No employee profile")),
    }
}

/// Message for the submitter when a paid request became unpaid.
fn downgrade_notice(
    policy: &LeavePolicy,
    requested: LeaveType,
    classification: &Classification,
) -> String {
    let months = classification
        .per_month_analysis
        .iter()
        .filter(|m| m.would_exceed)
        .map(|m| m.month_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Your {} leave exceeds the monthly paid leave limit of {} days in {}, so it was recorded as unpaid leave.",
        requested, policy.monthly_limit, months
    )
}

/// Live paid/unpaid preview for the submission form
#[utoipa::path(
    post,
    path = "/api/leave/preview",
    request_body(
        content = CreateLeave,
        description = "Candidate leave request",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Quota analysis of the candidate request", body = LeavePreview),
        (status = 400, description = "Invalid dates", body = Object, example = json!({
            "message": "start_date cannot be after end_date"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn preview_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let (start, end) = payload.dates()?;
    let policy = &config.leave_policy;

    let history = load_approved_history(
        pool.get_ref(),
        employee_id,
        first_of_month(start),
        last_of_month(end),
        false,
    )
    .await?;

    let classification = classify(policy, employee_id, &history, start, end, payload.leave_type);
    let decision = enforce_quota(policy, payload.leave_type, &classification);

    Ok(HttpResponse::Ok().json(LeavePreview {
        requested_type: payload.leave_type,
        total_days: chargeable_days(policy, start, end, payload.leave_type),
        decision,
        classification,
    }))
}

/// Submit a leave request. Paid leave beyond the monthly limit is recorded
/// as unpaid.
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = CreateLeave,
        description = "Leave request payload",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Leave request submitted", body = SubmitLeaveResponse),
        (status = 400, description = "Invalid dates", body = Object, example = json!({
            "message": "A half-day leave must start and end on the same date"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn create_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<CreateLeave>,
) -> actix_web::Result<impl Responder> {
    let employee_id = auth.require_employee_id()?;
    let (start, end) = payload.dates()?;
    let policy = &config.leave_policy;
    let requested = payload.leave_type;

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to open transaction");
        internal_error()
    })?;

    lock_employee(&mut tx, employee_id).await?;

    let history = load_approved_history(
        &mut *tx,
        employee_id,
        first_of_month(start),
        last_of_month(end),
        true,
    )
    .await?;

    let classification = classify(policy, employee_id, &history, start, end, requested);
    let decision = enforce_quota(policy, requested, &classification);

    let result = sqlx::query(
        r#"
        INSERT INTO leave_requests
            (employee_id, start_date, end_date, leave_type)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(start)
    .bind(end)
    .bind(decision.leave_type.as_ref())
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to create leave request");
        internal_error()
    })?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, employee_id, "Failed to commit leave request");
        internal_error()
    })?;

    let leave_id = result.last_insert_id();
    let notice = decision.downgraded.then(|| {
        tracing::info!(
            leave_id,
            employee_id,
            requested = %requested,
            "Leave request exceeds monthly paid limit, recorded as unpaid"
        );
        downgrade_notice(policy, requested, &classification)
    });

    Ok(HttpResponse::Ok().json(SubmitLeaveResponse {
        message: "Leave request submitted".to_string(),
        leave_id,
        status: "pending".to_string(),
        requested_type: requested,
        leave_type: decision.leave_type,
        downgraded: decision.downgraded,
        notice,
        classification,
    }))
}

/// Paid leave usage per month
#[utoipa::path(
    get,
    path = "/api/leave/usage",
    params(UsageQuery),
    responses(
        (status = 200, description = "Monthly paid leave usage", body = UsageResponse),
        (status = 400, description = "Invalid month", body = Object, example = json!({
            "message": "Invalid date '2026-13-01', expected YYYY-MM-DD"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_usage(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    query: web::Query<UsageQuery>,
) -> actix_web::Result<impl Responder> {
    let employee_id = match query.employee_id {
        Some(id) if auth.employee_id != Some(id) => {
            auth.require_hr_or_admin()?;
            id
        }
        Some(id) => id,
        None => auth.require_employee_id()?,
    };

    let first = match query.month.as_deref() {
        Some(month) => parse_iso_date(&format!("{}-01", month.trim()))?,
        None => first_of_month(Utc::now().date_naive()),
    };
    let months = query.months.unwrap_or(1).clamp(1, MAX_USAGE_MONTHS);
    let last = first
        .checked_add_months(Months::new(months - 1))
        .map(last_of_month)
        .ok_or_else(|| LeaveError::InvalidDate(first.to_string()))?;

    let history = load_approved_history(pool.get_ref(), employee_id, first, last, false).await?;

    let mut ledger = UsageLedger::new(&config.leave_policy, employee_id, &history);
    let data = spanned_months(first, last)
        .into_iter()
        .map(|month| ledger.usage(month))
        .collect();

    Ok(HttpResponse::Ok().json(UsageResponse { employee_id, data }))
}

/* =========================
Approve leave (HR/Admin)
========================= */
/// Approve a pending leave request. The quota is re-checked against the
/// approved history at approval time.
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/approve",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to approve")
    ),
    responses(
        (status = 200, description = "Leave approved successfully", body = ApproveLeaveResponse),
        (status = 400, description = "Leave request not found or already processed", body = Object, example = json!({
            "message": "Leave request not found or already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn approve_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();
    let policy = &config.leave_policy;
    let not_processable = || {
        HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave request not found or already processed"
        }))
    };

    let owner = sqlx::query_scalar::<_, u64>("SELECT employee_id FROM leave_requests WHERE id = ?")
        .bind(leave_id)
        .fetch_optional(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
            internal_error()
        })?;

    let Some(employee_id) = owner else {
        return Ok(not_processable());
    };

    let mut tx = pool.begin().await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to open transaction");
        internal_error()
    })?;

    // employee first, then the request: same order as submission
    lock_employee(&mut tx, employee_id).await?;

    let row = sqlx::query_as::<_, LeaveRow>(
        r#"
        SELECT id, employee_id, start_date, end_date, leave_type, status
        FROM leave_requests
        WHERE id = ?
        FOR UPDATE
        "#,
    )
    .bind(leave_id)
    .fetch_optional(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to lock leave request");
        internal_error()
    })?;

    let request = match row.map(LeaveRequest::try_from) {
        Some(Ok(request)) if request.status == LeaveStatus::Pending => request,
        Some(Err(e)) => {
            tracing::error!(error = %e, leave_id, "Stored leave request is malformed");
            return Err(internal_error());
        }
        _ => return Ok(not_processable()),
    };

    let history = load_approved_history(
        &mut *tx,
        employee_id,
        first_of_month(request.start_date),
        last_of_month(request.end_date),
        true,
    )
    .await?;

    let classification = classify(
        policy,
        employee_id,
        &history,
        request.start_date,
        request.end_date,
        request.leave_type,
    );
    let decision = enforce_quota(policy, request.leave_type, &classification);

    sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'approved', leave_type = ?
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(decision.leave_type.as_ref())
    .bind(leave_id)
    .execute(&mut *tx)
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Approve leave failed");
        internal_error()
    })?;

    tx.commit().await.map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to commit approval");
        internal_error()
    })?;

    let notice = decision.downgraded.then(|| {
        tracing::info!(
            leave_id,
            employee_id,
            requested = %request.leave_type,
            "Approved leave exceeds monthly paid limit, recorded as unpaid"
        );
        downgrade_notice(policy, request.leave_type, &classification)
    });

    Ok(HttpResponse::Ok().json(ApproveLeaveResponse {
        message: "Leave approved".to_string(),
        leave_type: decision.leave_type,
        downgraded: decision.downgraded,
        notice,
    }))
}

/* =========================
Reject leave (HR/Admin)
========================= */
/// Swagger doc for reject_leave endpoint
#[utoipa::path(
    put,
    path = "/api/leave/{leave_id}/reject",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to reject")
    ),
    responses(
        (status = 200, description = "Leave rejected successfully", body = Object, example = json!({
            "message": "Leave rejected"
        })),
        (status = 400, description = "Leave request not found or already processed", body = Object, example = json!({
            "message": "Leave request not found or already processed"
        })),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn reject_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();

    let result = sqlx::query(
        r#"
        UPDATE leave_requests
        SET status = 'rejected'
        WHERE id = ?
        AND status = 'pending'
        "#,
    )
    .bind(leave_id)
    .execute(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Reject leave failed");
        internal_error()
    })?;

    if result.rows_affected() == 0 {
        return Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "message": "Leave request not found or already processed"
        })));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Leave rejected"
    })))
}

/// for getting a leave application details endpoint
#[utoipa::path(
    get,
    path = "/api/leave/{leave_id}",
    params(
        ("leave_id" = u64, Path, description = "ID of the leave request to fetch")
    ),
    responses(
        (status = 200, description = "Leave request found", body = LeaveResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Leave request not found", body = Object, example = json!({
            "message": "Leave request not found"
        }))
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn get_leave(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    let leave_id = path.into_inner();

    let leave = sqlx::query_as::<_, LeaveResponse>(
        r#"
        SELECT id, employee_id, start_date, end_date, leave_type, status, created_at
        FROM leave_requests
        WHERE id = ?
        "#,
    )
    .bind(leave_id)
    .fetch_optional(pool.get_ref())
    .await
    .map_err(|e| {
        tracing::error!(error = %e, leave_id, "Failed to fetch leave request");
        internal_error()
    })?;

    match leave {
        Some(data) => Ok(HttpResponse::Ok().json(data)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "message": "Leave request not found"
        }))),
    }
}

/// for getting leave applications endpoint
#[utoipa::path(
    get,
    path = "/api/leave",
    params(LeaveFilter),
    responses(
        (status = 200, description = "Paginated leave list", body = LeaveListResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Leave"
)]
pub async fn leave_list(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    query: web::Query<LeaveFilter>,
) -> actix_web::Result<impl Responder> {
    auth.require_hr_or_admin()?;

    // -------------------------
    // Pagination
    // -------------------------
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let offset = (page - 1) * per_page;

    // -------------------------
    // WHERE clause
    // -------------------------
    let mut where_sql = String::from(" WHERE 1=1");
    let mut args: Vec<FilterValue> = Vec::new();

    if let Some(emp_id) = query.employee_id {
        where_sql.push_str(" AND employee_id = ?");
        args.push(FilterValue::U64(emp_id));
    }

    if let Some(status) = query.status.as_deref() {
        where_sql.push_str(" AND status = ?");
        args.push(FilterValue::Str(status));
    }

    // -------------------------
    // COUNT query
    // -------------------------
    let count_sql = format!("SELECT COUNT(*) FROM leave_requests{}", where_sql);

    let mut count_q = sqlx::query_scalar::<_, i64>(&count_sql);
    for arg in &args {
        count_q = match arg {
            FilterValue::U64(v) => count_q.bind(*v),
            FilterValue::Str(s) => count_q.bind(*s),
        };
    }

    let total = count_q.fetch_one(pool.get_ref()).await.map_err(|e| {
        tracing::error!(error=%e, "Failed to count leave requests");
        internal_error()
    })?;

    // -------------------------
    // DATA query
    // -------------------------
    let data_sql = format!(
        r#"
        SELECT id, employee_id, start_date, end_date, leave_type, status, created_at
        FROM leave_requests
        {}
        ORDER BY created_at DESC
        LIMIT ? OFFSET ?
        "#,
        where_sql
    );

    let mut data_q = sqlx::query_as::<_, LeaveResponse>(&data_sql);
    for arg in args {
        data_q = match arg {
            FilterValue::U64(v) => data_q.bind(v),
            FilterValue::Str(s) => data_q.bind(s),
        };
    }

    let leaves = data_q
        .bind(per_page)
        .bind(offset)
        .fetch_all(pool.get_ref())
        .await
        .map_err(|e| {
            tracing::error!(error=%e, "Failed to fetch leave list");
            internal_error()
        })?;

    Ok(HttpResponse::Ok().json(LeaveListResponse {
        data: leaves,
        page: page as u32,
        per_page: per_page as u32,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use pretty_assertions::assert_eq;

    fn payload(start: &str, end: &str, leave_type: LeaveType) -> CreateLeave {
        CreateLeave {
            start_date: start.to_string(),
            end_date: end.to_string(),
            leave_type,
        }
    }

    #[test]
    fn test_payload_dates() {
        let dates = payload("2026-03-30", "2026-04-02", LeaveType::Annual).dates();
        assert_eq!(
            dates,
            Ok((
                NaiveDate::from_ymd_opt(2026, 3, 30).unwrap(),
                NaiveDate::from_ymd_opt(2026, 4, 2).unwrap()
            ))
        );
    }

    #[test]
    fn test_payload_rejects_bad_input() {
        assert_eq!(
            payload("2026-04-02", "2026-03-30", LeaveType::Annual).dates(),
            Err(LeaveError::EndBeforeStart)
        );
        assert_eq!(
            payload("2026-03-30", "2026-03-31", LeaveType::HalfDay).dates(),
            Err(LeaveError::HalfDaySpan)
        );
        assert_eq!(
            payload("30/03/2026", "2026-03-31", LeaveType::Sick).dates(),
            Err(LeaveError::InvalidDate("30/03/2026".to_string()))
        );
    }

    #[test]
    fn test_create_leave_payload_deserializes() {
        let parsed: CreateLeave = serde_json::from_str(
            r#"{"start_date": "2026-03-06", "end_date": "2026-03-06", "leave_type": "halfday"}"#,
        )
        .unwrap();
        assert_eq!(parsed.leave_type, LeaveType::HalfDay);

        let unknown = serde_json::from_str::<CreateLeave>(
            r#"{"start_date": "2026-03-06", "end_date": "2026-03-06", "leave_type": "sabbatical"}"#,
        );
        assert!(unknown.is_err());
    }

    #[actix_web::test]
    async fn test_leave_error_maps_to_bad_request() {
        let response = LeaveError::EndBeforeStart.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "start_date cannot be after end_date");
    }

    #[test]
    fn test_downgrade_notice_names_exceeding_months() {
        let policy = LeavePolicy::default();
        // Tue 2026-03-31 .. Thu 2026-04-02: 1 day in March, 2 in April
        let classification = classify(
            &policy,
            1000,
            &[],
            NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
            LeaveType::Annual,
        );

        assert_eq!(
            downgrade_notice(&policy, LeaveType::Annual, &classification),
            "Your annual leave exceeds the monthly paid leave limit of 1.5 days in April 2026, so it was recorded as unpaid leave."
        );
    }
}
