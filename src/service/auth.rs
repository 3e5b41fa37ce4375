use sqlx::MySqlPool;
use tracing::{debug, info, instrument};

use crate::auth::handlers::{AuthResponse, LoginRequest, RegisterRequest};
use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::config::Config;
use crate::error::AppError;
use crate::model::hr_user::HrUser;

fn validate_registration(payload: &RegisterRequest) -> Result<(), AppError> {
    let mut details = Vec::new();
    if payload.name.trim().len() < 2 {
        details.push("name: must be at least 2 characters".to_string());
    }
    if payload.email.trim().is_empty() || !payload.email.contains('@') {
        details.push("email: must be a valid email address".to_string());
    }
    if payload.password.len() < 6 {
        details.push("password: must be at least 6 characters".to_string());
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Validation failed", details))
    }
}

pub async fn register(
    pool: &MySqlPool,
    config: &Config,
    payload: RegisterRequest,
) -> Result<AuthResponse, AppError> {
    validate_registration(&payload)?;

    let password_hash = hash_password(
        &payload.password,
        config.hash_memory_kib,
        config.hash_time_cost,
    )?;

    let result = sqlx::query("INSERT INTO hr_users (email, password_hash, name) VALUES (?, ?, ?)")
        .bind(payload.email.trim())
        .bind(&password_hash)
        .bind(payload.name.trim())
        .execute(pool)
        .await
        .map_err(|e| {
            // unique email, also covers the concurrent-register race
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.code().as_deref() == Some("23000") {
                    return AppError::conflict("Email already registered");
                }
            }
            AppError::from(e)
        })?;

    let user = fetch_user(pool, result.last_insert_id()).await?;
    let token = generate_token(user.id, &user.email, &config.jwt_secret, config.jwt_ttl)?;

    info!(user_id = user.id, "HR user registered");

    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

#[instrument(name = "auth_login", skip(pool, config, payload), fields(email = %payload.email))]
pub async fn login(
    pool: &MySqlPool,
    config: &Config,
    payload: LoginRequest,
) -> Result<AuthResponse, AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::validation(
            "Validation failed",
            vec!["email and password are required".to_string()],
        ));
    }

    debug!("Fetching user");

    // Unknown email and wrong password answer identically so callers
    // cannot enumerate accounts.
    let user = sqlx::query_as::<_, HrUser>("SELECT * FROM hr_users WHERE email = ?")
        .bind(payload.email.trim())
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid credentials"))?;

    if !verify_password(&payload.password, &user.password_hash) {
        return Err(AppError::unauthorized("Invalid credentials"));
    }

    let token = generate_token(user.id, &user.email, &config.jwt_secret, config.jwt_ttl)?;

    info!(user_id = user.id, "Login successful");

    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

async fn fetch_user(pool: &MySqlPool, id: u64) -> Result<HrUser, AppError> {
    sqlx::query_as::<_, HrUser>("SELECT * FROM hr_users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(AppError::internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn registration_accepts_well_formed_input() {
        assert!(validate_registration(&request("HR Admin", "hr@x.com", "secret1")).is_ok());
    }

    #[test]
    fn registration_reports_every_bad_field() {
        let err = validate_registration(&request("a", "nope", "short")).unwrap_err();
        match err {
            AppError::Validation { details, .. } => assert_eq!(details.len(), 3),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
