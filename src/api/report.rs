use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::service;
use crate::service::report::AttendanceSummaryRow;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Calendar month as YYYY-MM
    pub month: String,
    pub employee_id: Option<u64>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceSummaryResponse {
    #[schema(example = "2026-03")]
    pub month: String,
    pub data: Vec<AttendanceSummaryRow>,
}

/// Monthly attendance summary per employee
#[utoipa::path(
    get,
    path = "/api/reports/attendance-summary",
    params(ReportQuery),
    responses(
        (status = 200, description = "Days present and late arrivals per employee",
         body = AttendanceSummaryResponse),
        (status = 400, description = "Malformed month parameter")
    ),
    security(("bearer_auth" = [])),
    tag = "Report"
)]
pub async fn attendance_summary(
    pool: web::Data<MySqlPool>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    let month = query.month.trim().to_string();
    let data =
        service::report::attendance_summary(pool.get_ref(), &month, query.employee_id).await?;
    Ok(HttpResponse::Ok().json(AttendanceSummaryResponse { month, data }))
}
