use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

use crate::api::attendance::{
    AttendanceListResponse, CreateAttendance, UpdateAttendance,
};
use crate::api::employee::{CreateEmployee, EmployeeListResponse, UpdateEmployee};
use crate::api::report::AttendanceSummaryResponse;
use crate::auth::handlers::{AuthResponse, LoginRequest, RegisterRequest};
use crate::model::attendance::Attendance;
use crate::model::employee::Employee;
use crate::model::hr_user::PublicUser;
use crate::service::report::AttendanceSummaryRow;
use crate::utils::pagination::PageMeta;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "HR Admin API",
        version = "1.0.0",
        description = r#"
## HR Administration Backend

Authenticates HR staff, maintains the employee roster, records daily
attendance check-ins, and produces a monthly attendance summary.

- Employees are soft-deleted: history stays, listings hide them.
- Attendance creation upserts on `(employee_id, date)`.
- Check-ins after 09:45:00 count as late in the monthly report.

All `/api` endpoints require a JWT bearer token from `/auth/login`.
"#,
    ),
    paths(
        crate::auth::handlers::register,
        crate::auth::handlers::login,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::create_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::attendance::list_attendance,
        crate::api::attendance::get_attendance,
        crate::api::attendance::create_attendance,
        crate::api::attendance::update_attendance,
        crate::api::attendance::delete_attendance,

        crate::api::report::attendance_summary,
    ),
    components(
        schemas(
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            PublicUser,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            EmployeeListResponse,
            Attendance,
            CreateAttendance,
            UpdateAttendance,
            AttendanceListResponse,
            AttendanceSummaryRow,
            AttendanceSummaryResponse,
            PageMeta,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "HR staff registration and login"),
        (name = "Employee", description = "Employee roster management"),
        (name = "Attendance", description = "Daily check-in records"),
        (name = "Report", description = "Monthly attendance reporting"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
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
}
