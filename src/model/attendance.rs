use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

/// One row per `(employee_id, date)`; the unique key makes check-in
/// creation an upsert.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Attendance {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 7)]
    pub employee_id: u64,

    #[schema(example = "2026-03-10", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "2026-03-10T09:30:00", value_type = String, format = "date-time")]
    pub check_in_time: NaiveDateTime,

    #[schema(value_type = String, format = "date-time")]
    pub created_at: DateTime<Utc>,
}
