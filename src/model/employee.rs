use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// Soft deletion: `deleted_at` stays NULL while the employee is live.
/// Every service-layer read filters on it; the row itself is never removed
/// so attendance history keeps its foreign key.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = "Jane Doe")]
    pub name: String,

    #[schema(example = 29)]
    pub age: u32,

    #[schema(example = "Software Engineer")]
    pub designation: String,

    #[schema(example = "2024-01-15", value_type = String, format = "date")]
    pub hiring_date: NaiveDate,

    #[schema(example = "1997-04-02", value_type = String, format = "date")]
    pub date_of_birth: NaiveDate,

    #[schema(example = 85000.0)]
    pub salary: f64,

    #[schema(example = "1f3a9c-photo.png", nullable = true)]
    pub photo_path: Option<String>,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,

    #[schema(value_type = String, format = "date-time")]
    pub updated_at: DateTime<Utc>,

    #[schema(value_type = Option<String>, format = "date-time", nullable = true)]
    pub deleted_at: Option<DateTime<Utc>>,
}
