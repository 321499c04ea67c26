use crate::api::leave_request::{
    ApproveLeaveResponse, CreateLeave, LeaveFilter, LeaveListResponse, LeavePreview,
    LeaveResponse, SubmitLeaveResponse, UsageQuery, UsageResponse,
};
use crate::leave::{Classification, LeaveStatus, LeaveType, MonthAnalysis, MonthlyUsage, PayClass, QuotaDecision};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HRM Leave API",
        version = "1.0.0",
        description = r#"
## Leave management with monthly paid-leave accrual

Employees accrue **1.5 paid leave days per calendar month**. Weekends are not
charged, a half day counts as 0.5, and a request spanning several months is
charged against each month separately.

### 🔹 Key Features
- **Live preview**
  - Paid/Unpaid badge and per-month breakdown while the request is edited
- **Submission**
  - Requests beyond the monthly limit are recorded as unpaid, with a notice
- **Approval**
  - HR/Admin approval re-checks the limit atomically
- **Usage report**
  - Used and remaining paid days per month

### 🔐 Security
All endpoints require a **JWT Bearer** access token.
Only **Admin** or **HR** can approve, reject, or list requests of others.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::preview_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::leave_usage,
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave
    ),
    components(
        schemas(
            CreateLeave,
            LeavePreview,
            SubmitLeaveResponse,
            ApproveLeaveResponse,
            UsageQuery,
            UsageResponse,
            LeaveFilter,
            LeaveResponse,
            LeaveListResponse,
            LeaveType,
            LeaveStatus,
            Classification,
            MonthAnalysis,
            MonthlyUsage,
            PayClass,
            QuotaDecision
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave management APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}
