use sqlx::MySqlPool;
use tracing::debug;

use crate::api::employee::{CreateEmployee, EmployeeQuery, UpdateEmployee};
use crate::error::AppError;
use crate::model::employee::Employee;
use crate::utils::db_utils::{SqlValue, mysql_args};
use crate::utils::pagination::{PageMeta, clamp_page_limit, offset};

pub async fn get_all(
    pool: &MySqlPool,
    query: &EmployeeQuery,
) -> Result<(Vec<Employee>, PageMeta), AppError> {
    let (page, limit) = clamp_page_limit(query.page, query.limit);

    let mut conditions = vec!["deleted_at IS NULL"];
    let mut bindings: Vec<SqlValue> = Vec::new();

    if let Some(search) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        conditions.push("LOWER(name) LIKE ?");
        bindings.push(SqlValue::String(format!(
            "%{}%",
            search.trim().to_lowercase()
        )));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));

    // count scoped to the same predicate as the page
    let count_sql = format!("SELECT COUNT(*) FROM employees {}", where_clause);
    debug!(sql = %count_sql, "Counting employees");

    let total = sqlx::query_scalar_with::<_, i64, _>(&count_sql, mysql_args(bindings.iter().cloned()))
        .fetch_one(pool)
        .await?;

    let data_sql = format!(
        "SELECT * FROM employees {} ORDER BY id DESC LIMIT ? OFFSET ?",
        where_clause
    );
    debug!(sql = %data_sql, page, limit, "Fetching employees");

    bindings.push(SqlValue::I64(limit as i64));
    bindings.push(SqlValue::I64(offset(page, limit)));
    let data = sqlx::query_as_with::<_, Employee, _>(&data_sql, mysql_args(bindings))
        .fetch_all(pool)
        .await?;

    Ok((data, PageMeta::new(page, limit, total)))
}

pub async fn get_by_id(pool: &MySqlPool, id: u64) -> Result<Employee, AppError> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ? AND deleted_at IS NULL")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::not_found("Employee not found"))
}

pub async fn create(pool: &MySqlPool, payload: CreateEmployee) -> Result<Employee, AppError> {
    validate_fields(
        Some(payload.name.as_str()),
        Some(payload.age),
        Some(payload.designation.as_str()),
        Some(payload.salary),
    )?;

    let result = sqlx::query(
        "INSERT INTO employees \
         (name, age, designation, hiring_date, date_of_birth, salary, photo_path) \
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(payload.name.trim())
    .bind(payload.age)
    .bind(payload.designation.trim())
    .bind(payload.hiring_date)
    .bind(payload.date_of_birth)
    .bind(payload.salary)
    .bind(&payload.photo_path)
    .execute(pool)
    .await?;

    // re-fetch so generated columns are present
    get_by_id(pool, result.last_insert_id()).await
}

pub async fn update(
    pool: &MySqlPool,
    id: u64,
    patch: UpdateEmployee,
) -> Result<Employee, AppError> {
    validate_fields(
        patch.name.as_deref(),
        patch.age,
        patch.designation.as_deref(),
        patch.salary,
    )?;

    let (assignments, mut values) = patch_assignments(&patch);
    if assignments.is_empty() {
        return Err(AppError::validation("No fields provided for update", vec![]));
    }

    // visibility check before writing
    get_by_id(pool, id).await?;

    let sql = format!(
        "UPDATE employees SET {}, updated_at = NOW() WHERE id = ? AND deleted_at IS NULL",
        assignments.join(", ")
    );
    debug!(sql = %sql, id, "Updating employee");

    values.push(SqlValue::U64(id));
    sqlx::query_with(&sql, mysql_args(values)).execute(pool).await?;

    get_by_id(pool, id).await
}

pub async fn delete(pool: &MySqlPool, id: u64) -> Result<(), AppError> {
    let result = sqlx::query(
        "UPDATE employees SET deleted_at = NOW(), updated_at = NOW() \
         WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Employee not found"));
    }
    Ok(())
}

/// Explicit allow-list of mutable columns; fields absent from the patch
/// struct can never reach the SET clause.
fn patch_assignments(patch: &UpdateEmployee) -> (Vec<&'static str>, Vec<SqlValue>) {
    let mut assignments = Vec::new();
    let mut values = Vec::new();

    if let Some(name) = &patch.name {
        assignments.push("name = ?");
        values.push(SqlValue::String(name.trim().to_string()));
    }
    if let Some(age) = patch.age {
        assignments.push("age = ?");
        values.push(SqlValue::U64(age as u64));
    }
    if let Some(designation) = &patch.designation {
        assignments.push("designation = ?");
        values.push(SqlValue::String(designation.trim().to_string()));
    }
    if let Some(hiring_date) = patch.hiring_date {
        assignments.push("hiring_date = ?");
        values.push(SqlValue::Date(hiring_date));
    }
    if let Some(date_of_birth) = patch.date_of_birth {
        assignments.push("date_of_birth = ?");
        values.push(SqlValue::Date(date_of_birth));
    }
    if let Some(salary) = patch.salary {
        assignments.push("salary = ?");
        values.push(SqlValue::F64(salary));
    }
    if let Some(photo_path) = &patch.photo_path {
        assignments.push("photo_path = ?");
        values.push(SqlValue::String(photo_path.clone()));
    }

    (assignments, values)
}

fn validate_fields(
    name: Option<&str>,
    age: Option<u32>,
    designation: Option<&str>,
    salary: Option<f64>,
) -> Result<(), AppError> {
    let mut details = Vec::new();
    if let Some(name) = name {
        if name.trim().len() < 2 {
            details.push("name: must be at least 2 characters".to_string());
        }
    }
    if let Some(age) = age {
        if age < 16 {
            details.push("age: must be at least 16".to_string());
        }
    }
    if let Some(designation) = designation {
        if designation.trim().len() < 2 {
            details.push("designation: must be at least 2 characters".to_string());
        }
    }
    if let Some(salary) = salary {
        if salary < 0.0 {
            details.push("salary: must not be negative".to_string());
        }
    }
    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation("Validation failed", details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn empty_patch() -> UpdateEmployee {
        UpdateEmployee {
            name: None,
            age: None,
            designation: None,
            hiring_date: None,
            date_of_birth: None,
            salary: None,
            photo_path: None,
        }
    }

    #[test]
    fn empty_patch_produces_no_assignments() {
        let (assignments, values) = patch_assignments(&empty_patch());
        assert!(assignments.is_empty());
        assert!(values.is_empty());
    }

    #[test]
    fn patch_covers_only_supplied_fields() {
        let patch = UpdateEmployee {
            name: Some("Jane Doe".to_string()),
            salary: Some(90000.0),
            ..empty_patch()
        };
        let (assignments, values) = patch_assignments(&patch);
        assert_eq!(assignments, vec!["name = ?", "salary = ?"]);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn full_patch_covers_the_allow_list() {
        let patch = UpdateEmployee {
            name: Some("Jane Doe".to_string()),
            age: Some(30),
            designation: Some("Lead Engineer".to_string()),
            hiring_date: NaiveDate::from_ymd_opt(2024, 1, 15),
            date_of_birth: NaiveDate::from_ymd_opt(1996, 4, 2),
            salary: Some(90000.0),
            photo_path: Some("photo.png".to_string()),
        };
        let (assignments, _) = patch_assignments(&patch);
        assert_eq!(assignments.len(), 7);
    }

    #[test]
    fn validation_rejects_underage_and_short_name() {
        let err = validate_fields(Some("x"), Some(15), None, None).unwrap_err();
        match err {
            AppError::Validation { details, .. } => assert_eq!(details.len(), 2),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn validation_ignores_absent_fields() {
        assert!(validate_fields(None, None, None, None).is_ok());
    }
}
