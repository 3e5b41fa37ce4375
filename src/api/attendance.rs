use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::model::attendance::Attendance;
use crate::service;
use crate::utils::pagination::PageMeta;

#[derive(Deserialize, ToSchema)]
pub struct CreateAttendance {
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub date: NaiveDate,
    /// Either a bare time combined with `date`, or a full timestamp
    #[schema(example = "09:30")]
    pub check_in_time: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = "2026-03-10", format = "date", value_type = String)]
    pub date: Option<NaiveDate>,
    #[schema(example = "09:30")]
    pub check_in_time: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct AttendanceQuery {
    pub employee_id: Option<u64>,
    /// Exact date; takes precedence over from/to
    pub date: Option<NaiveDate>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct AttendanceListResponse {
    pub data: Vec<Attendance>,
    pub meta: PageMeta,
}

/// List attendance records
#[utoipa::path(
    get,
    path = "/api/attendance",
    params(AttendanceQuery),
    responses(
        (status = 200, description = "Paginated attendance list", body = AttendanceListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn list_attendance(
    pool: web::Data<MySqlPool>,
    query: web::Query<AttendanceQuery>,
) -> Result<HttpResponse, AppError> {
    let (data, meta) = service::attendance::get_all(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(AttendanceListResponse { data, meta }))
}

/// Get attendance record by ID
#[utoipa::path(
    get,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Attendance record", body = Attendance),
        (status = 404, description = "Attendance record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn get_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let record = service::attendance::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Record a check-in (upsert on employee and date)
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = CreateAttendance,
    responses(
        (status = 201, description = "Created or merged attendance record", body = Attendance),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn create_attendance(
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateAttendance>,
) -> Result<HttpResponse, AppError> {
    let record = service::attendance::create(pool.get_ref(), payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(record))
}

/// Update attendance record
#[utoipa::path(
    put,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    request_body = UpdateAttendance,
    responses(
        (status = 200, description = "Updated attendance record", body = Attendance),
        (status = 404, description = "Attendance record not found"),
        (status = 409, description = "Another record already covers that date")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn update_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateAttendance>,
) -> Result<HttpResponse, AppError> {
    let record =
        service::attendance::update(pool.get_ref(), path.into_inner(), payload.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(record))
}

/// Delete attendance record (hard delete)
#[utoipa::path(
    delete,
    path = "/api/attendance/{id}",
    params(("id", Path, description = "Attendance record ID")),
    responses(
        (status = 200, description = "Deleted", body = Object, example = json!({
            "success": true
        })),
        (status = 404, description = "Attendance record not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Attendance"
)]
pub async fn delete_attendance(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    service::attendance::delete(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
