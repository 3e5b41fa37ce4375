use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use sqlx::MySqlPool;
use tracing::debug;

use crate::api::attendance::{AttendanceQuery, CreateAttendance, UpdateAttendance};
use crate::error::AppError;
use crate::model::attendance::Attendance;
use crate::utils::db_utils::{SqlValue, mysql_args};
use crate::utils::pagination::{PageMeta, clamp_page_limit, offset};

const SELECT_COLUMNS: &str = "a.id, a.employee_id, a.date, a.check_in_time, a.created_at";
const FROM_JOINED: &str = "FROM attendance a INNER JOIN employees e ON e.id = a.employee_id";

// A second check-in for the same (employee_id, date) pair must merge into
// the existing row; LAST_INSERT_ID(id) keeps the merged row's id visible
// on the duplicate path too.
const UPSERT_SQL: &str =
    "INSERT INTO attendance (employee_id, date, check_in_time) VALUES (?, ?, ?) \
     ON DUPLICATE KEY UPDATE check_in_time = VALUES(check_in_time), id = LAST_INSERT_ID(id)";

/// A bare `HH:MM` or `HH:MM:SS` combines with `date`; anything else must
/// be a full timestamp. Runs identically on create and update.
fn normalize_check_in(date: NaiveDate, raw: &str) -> Result<NaiveDateTime, AppError> {
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M:%S") {
        return Ok(date.and_time(time));
    }
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(date.and_time(time));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt);
    }
    Err(AppError::validation(
        "Validation failed",
        vec!["check_in_time: expected HH:MM[:SS] or a full timestamp".to_string()],
    ))
}

fn filter_conditions(query: &AttendanceQuery) -> (Vec<&'static str>, Vec<SqlValue>) {
    let mut conditions = vec!["e.deleted_at IS NULL"];
    let mut bindings: Vec<SqlValue> = Vec::new();

    if let Some(employee_id) = query.employee_id {
        conditions.push("a.employee_id = ?");
        bindings.push(SqlValue::U64(employee_id));
    }

    // exact date wins over the range
    if let Some(date) = query.date {
        conditions.push("a.date = ?");
        bindings.push(SqlValue::Date(date));
    } else {
        match (query.from, query.to) {
            (Some(from), Some(to)) => {
                conditions.push("a.date BETWEEN ? AND ?");
                bindings.push(SqlValue::Date(from));
                bindings.push(SqlValue::Date(to));
            }
            (Some(from), None) => {
                conditions.push("a.date >= ?");
                bindings.push(SqlValue::Date(from));
            }
            (None, Some(to)) => {
                conditions.push("a.date <= ?");
                bindings.push(SqlValue::Date(to));
            }
            (None, None) => {}
        }
    }

    (conditions, bindings)
}

pub async fn get_all(
    pool: &MySqlPool,
    query: &AttendanceQuery,
) -> Result<(Vec<Attendance>, PageMeta), AppError> {
    let (page, limit) = clamp_page_limit(query.page, query.limit);
    let (conditions, mut bindings) = filter_conditions(query);
    let where_clause = format!("WHERE {}", conditions.join(" AND "));

    let count_sql = format!("SELECT COUNT(*) {} {}", FROM_JOINED, where_clause);
    debug!(sql = %count_sql, "Counting attendance records");

    let total = sqlx::query_scalar_with::<_, i64, _>(&count_sql, mysql_args(bindings.iter().cloned()))
        .fetch_one(pool)
        .await?;

    let data_sql = format!(
        "SELECT {} {} {} ORDER BY a.id DESC LIMIT ? OFFSET ?",
        SELECT_COLUMNS, FROM_JOINED, where_clause
    );
    debug!(sql = %data_sql, page, limit, "Fetching attendance records");

    bindings.push(SqlValue::I64(limit as i64));
    bindings.push(SqlValue::I64(offset(page, limit)));
    let data = sqlx::query_as_with::<_, Attendance, _>(&data_sql, mysql_args(bindings))
        .fetch_all(pool)
        .await?;

    Ok((data, PageMeta::new(page, limit, total)))
}

pub async fn get_by_id(pool: &MySqlPool, id: u64) -> Result<Attendance, AppError> {
    let sql = format!(
        "SELECT {} {} WHERE e.deleted_at IS NULL AND a.id = ?",
        SELECT_COLUMNS, FROM_JOINED
    );
    sqlx::query_as::<_, Attendance>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Attendance record not found"))
}

pub async fn create(pool: &MySqlPool, payload: CreateAttendance) -> Result<Attendance, AppError> {
    let employee_exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS(SELECT 1 FROM employees WHERE id = ? AND deleted_at IS NULL)",
    )
    .bind(payload.employee_id)
    .fetch_one(pool)
    .await?;

    if !employee_exists {
        return Err(AppError::not_found("Employee not found"));
    }

    let check_in_time = normalize_check_in(payload.date, &payload.check_in_time)?;

    let result = sqlx::query(UPSERT_SQL)
        .bind(payload.employee_id)
        .bind(payload.date)
        .bind(check_in_time)
        .execute(pool)
        .await?;

    get_by_id(pool, result.last_insert_id()).await
}

pub async fn update(
    pool: &MySqlPool,
    id: u64,
    patch: UpdateAttendance,
) -> Result<Attendance, AppError> {
    if patch.date.is_none() && patch.check_in_time.is_none() {
        return Err(AppError::validation("No fields provided for update", vec![]));
    }

    let existing = get_by_id(pool, id).await?;

    let mut assignments = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(date) = patch.date {
        assignments.push("date = ?");
        values.push(SqlValue::Date(date));
    }
    if let Some(raw) = &patch.check_in_time {
        // a bare time resolves against the new date when one is supplied,
        // otherwise against the stored one
        let date = patch.date.unwrap_or(existing.date);
        assignments.push("check_in_time = ?");
        values.push(SqlValue::DateTime(normalize_check_in(date, raw)?));
    }

    let sql = format!("UPDATE attendance SET {} WHERE id = ?", assignments.join(", "));
    debug!(sql = %sql, id, "Updating attendance record");

    values.push(SqlValue::U64(id));
    // a date collision on the unique key surfaces as Conflict
    sqlx::query_with(&sql, mysql_args(values)).execute(pool).await?;

    get_by_id(pool, id).await
}

pub async fn delete(pool: &MySqlPool, id: u64) -> Result<(), AppError> {
    get_by_id(pool, id).await?;

    sqlx::query("DELETE FROM attendance WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn bare_minutes_combine_with_date() {
        let normalized = normalize_check_in(date(2026, 3, 10), "09:30").unwrap();
        assert_eq!(normalized.to_string(), "2026-03-10 09:30:00");
    }

    #[test]
    fn bare_seconds_are_kept() {
        let normalized = normalize_check_in(date(2026, 3, 10), "09:30:15").unwrap();
        assert_eq!(normalized.to_string(), "2026-03-10 09:30:15");
    }

    #[test]
    fn full_timestamp_overrides_the_date() {
        let normalized = normalize_check_in(date(2026, 3, 10), "2026-03-11T08:00:00").unwrap();
        assert_eq!(normalized.to_string(), "2026-03-11 08:00:00");

        let spaced = normalize_check_in(date(2026, 3, 10), "2026-03-11 08:00:00").unwrap();
        assert_eq!(spaced, normalized);
    }

    #[test]
    fn malformed_time_is_a_validation_error() {
        let err = normalize_check_in(date(2026, 3, 10), "9am").unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[test]
    fn second_check_in_for_a_day_merges_into_the_existing_row() {
        assert!(UPSERT_SQL.contains("ON DUPLICATE KEY UPDATE"));
        assert!(UPSERT_SQL.contains("(employee_id, date, check_in_time)"));
        assert!(UPSERT_SQL.contains("check_in_time = VALUES(check_in_time)"));
        assert!(UPSERT_SQL.contains("id = LAST_INSERT_ID(id)"));
    }

    #[test]
    fn exact_date_takes_precedence_over_range() {
        let query = AttendanceQuery {
            employee_id: Some(7),
            date: Some(date(2026, 3, 10)),
            from: Some(date(2026, 1, 1)),
            to: Some(date(2026, 12, 31)),
            page: None,
            limit: None,
        };
        let (conditions, bindings) = filter_conditions(&query);
        assert!(conditions.contains(&"a.date = ?"));
        assert!(!conditions.iter().any(|c| c.contains("BETWEEN")));
        assert_eq!(bindings.len(), 2); // employee_id + exact date
    }

    #[test]
    fn open_ended_ranges_use_single_bounds() {
        let from_only = AttendanceQuery {
            employee_id: None,
            date: None,
            from: Some(date(2026, 3, 1)),
            to: None,
            page: None,
            limit: None,
        };
        let (conditions, _) = filter_conditions(&from_only);
        assert!(conditions.contains(&"a.date >= ?"));

        let to_only = AttendanceQuery {
            from: None,
            to: Some(date(2026, 3, 31)),
            ..from_only
        };
        let (conditions, _) = filter_conditions(&to_only);
        assert!(conditions.contains(&"a.date <= ?"));
    }
}
