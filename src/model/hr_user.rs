use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, FromRow)]
pub struct HrUser {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User shape exposed through the API; never carries the password hash.
#[derive(Debug, Serialize, ToSchema)]
pub struct PublicUser {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "hr@company.com")]
    pub email: String,
    #[schema(example = "HR Admin")]
    pub name: String,
}

impl From<HrUser> for PublicUser {
    fn from(user: HrUser) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}
