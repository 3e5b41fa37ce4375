use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::auth::auth::AuthUser;
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::service;
use crate::utils::pagination::PageMeta;

#[derive(Deserialize, ToSchema)]
pub struct CreateEmployee {
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = 29)]
    pub age: u32,
    #[schema(example = "Software Engineer")]
    pub designation: String,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub hiring_date: NaiveDate,
    #[schema(example = "1997-04-02", format = "date", value_type = String)]
    pub date_of_birth: NaiveDate,
    #[schema(example = 85000.0)]
    pub salary: f64,
    /// Filename already stored by the upload layer; never raw bytes.
    #[schema(example = "1f3a9c-photo.png", nullable = true)]
    pub photo_path: Option<String>,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateEmployee {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub designation: Option<String>,
    #[schema(example = "2024-01-15", format = "date", value_type = String)]
    pub hiring_date: Option<NaiveDate>,
    #[schema(example = "1997-04-02", format = "date", value_type = String)]
    pub date_of_birth: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub photo_path: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EmployeeQuery {
    /// Case-insensitive substring match on name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    pub meta: PageMeta,
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeQuery),
    responses(
        (status = 200, description = "Paginated employee list", body = EmployeeListResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn list_employees(
    pool: web::Data<MySqlPool>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, AppError> {
    let (data, meta) = service::employee::get_all(pool.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(EmployeeListResponse { data, meta }))
}

/// Get employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee not found"
        }))
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn get_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let employee = service::employee::get_by_id(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = CreateEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation failed")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn create_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    payload: web::Json<CreateEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = service::employee::create(pool.get_ref(), payload.into_inner()).await?;
    info!(user_id = auth.user_id, employee_id = employee.id, "Employee created");
    Ok(HttpResponse::Created().json(employee))
}

/// Update employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn update_employee(
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
    payload: web::Json<UpdateEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee =
        service::employee::update(pool.get_ref(), path.into_inner(), payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

/// Soft-delete employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id", Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee deleted", body = Object, example = json!({
            "success": true
        })),
        (status = 404, description = "Employee not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Employee"
)]
pub async fn delete_employee(
    auth: AuthUser,
    pool: web::Data<MySqlPool>,
    path: web::Path<u64>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    service::employee::delete(pool.get_ref(), id).await?;
    info!(user_id = auth.user_id, employee_id = id, "Employee soft-deleted");
    Ok(HttpResponse::Ok().json(json!({ "success": true })))
}
