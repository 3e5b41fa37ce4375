use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use derive_more::Display;
use serde_json::json;
use tracing::error;

/// Application error rendered as a JSON body with a `message` field;
/// validation failures additionally carry a `details` list.
#[derive(Debug, Display)]
pub enum AppError {
    #[display(fmt = "{}", message)]
    Validation {
        message: String,
        details: Vec<String>,
    },
    #[display(fmt = "{}", _0)]
    Unauthorized(String),
    #[display(fmt = "{}", _0)]
    NotFound(String),
    #[display(fmt = "{}", _0)]
    Conflict(String),
    #[display(fmt = "Internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Vec<String>) -> Self {
        AppError::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        AppError::Conflict(message.into())
    }

    pub fn internal() -> Self {
        AppError::Internal
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({ "message": self.to_string() });
        if let AppError::Validation { details, .. } = self {
            body["details"] = json!(details);
        }
        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // SQLSTATE 23000 covers every MySQL integrity-constraint breach,
        // unique keys included
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.code().as_deref() == Some("23000") {
                return AppError::conflict("Duplicate record");
            }
        }
        error!(error = %err, "Database error");
        AppError::internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_the_error_kind() {
        assert_eq!(
            AppError::validation("bad", vec![]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::unauthorized("no").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::not_found("gone").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::conflict("dup").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::internal().status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn validation_body_lists_field_details() {
        let resp = AppError::validation("Validation failed", vec!["name: too short".to_string()])
            .error_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["details"][0], "name: too short");
    }

    #[actix_web::test]
    async fn plain_errors_carry_only_a_message() {
        let resp = AppError::not_found("Employee not found").error_response();
        let bytes = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["message"], "Employee not found");
        assert!(body.get("details").is_none());
    }

    #[test]
    fn non_constraint_database_errors_stay_internal() {
        let err = AppError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Internal));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
