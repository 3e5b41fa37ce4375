use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use utoipa::ToSchema;

use crate::config::Config;
use crate::error::AppError;
use crate::model::hr_user::PublicUser;
use crate::service;

#[derive(Deserialize, ToSchema)]
pub struct RegisterRequest {
    #[schema(example = "HR Admin")]
    pub name: String,
    #[schema(example = "hr@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "hr@company.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
    pub user: PublicUser,
}

/// Register a new HR user
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "HR user registered", body = AuthResponse),
        (status = 400, description = "Validation failed"),
        (status = 409, description = "Email already registered", body = Object, example = json!({
            "message": "Email already registered"
        }))
    ),
    tag = "Auth"
)]
pub async fn register(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let result = service::auth::register(pool.get_ref(), &config, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(result))
}

/// HR login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "JWT token", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = Object, example = json!({
            "message": "Invalid credentials"
        }))
    ),
    tag = "Auth"
)]
pub async fn login(
    pool: web::Data<MySqlPool>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let result = service::auth::login(pool.get_ref(), &config, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
