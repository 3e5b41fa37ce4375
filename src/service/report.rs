use chrono::{Days, Months, NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::{FromRow, MySqlPool};
use tracing::debug;
use utoipa::ToSchema;

use crate::error::AppError;

/// Check-ins strictly after this time of day count as late.
pub const LATE_CUTOFF: &str = "09:45:00";

/// The comparison the summary query performs on each row, with the same
/// bound cutoff: a check-in at the cutoff exactly is on time.
pub fn is_late(check_in: NaiveTime) -> bool {
    let cutoff = NaiveTime::parse_from_str(LATE_CUTOFF, "%H:%M:%S")
        .expect("cutoff literal is a valid time of day");
    check_in > cutoff
}

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct AttendanceSummaryRow {
    #[schema(example = 7)]
    pub employee_id: u64,
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[schema(example = 20)]
    pub days_present: i64,
    #[schema(example = 3)]
    pub times_late: i64,
}

/// Inclusive first and last calendar day of a `YYYY-MM` month.
fn month_bounds(month: &str) -> Result<(NaiveDate, NaiveDate), AppError> {
    let malformed = || {
        AppError::validation(
            "month query parameter is required in YYYY-MM format",
            vec!["month: expected YYYY-MM".to_string()],
        )
    };

    let bytes = month.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes[4] == b'-'
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[5..].iter().all(u8::is_ascii_digit);
    if !well_formed {
        return Err(malformed());
    }

    let year: i32 = month[..4].parse().map_err(|_| malformed())?;
    let month_number: u32 = month[5..].parse().map_err(|_| malformed())?;

    let start = NaiveDate::from_ymd_opt(year, month_number, 1).ok_or_else(malformed)?;
    let end = start + Months::new(1) - Days::new(1);
    Ok((start, end))
}

pub async fn attendance_summary(
    pool: &MySqlPool,
    month: &str,
    employee_id: Option<u64>,
) -> Result<Vec<AttendanceSummaryRow>, AppError> {
    let (start, end) = month_bounds(month)?;

    let mut sql = String::from(
        "SELECT a.employee_id, e.name, COUNT(*) AS days_present, \
         CAST(SUM(CASE WHEN TIME(a.check_in_time) > ? THEN 1 ELSE 0 END) AS SIGNED) AS times_late \
         FROM attendance a INNER JOIN employees e ON e.id = a.employee_id \
         WHERE e.deleted_at IS NULL AND a.date BETWEEN ? AND ?",
    );
    if employee_id.is_some() {
        sql.push_str(" AND a.employee_id = ?");
    }
    sql.push_str(" GROUP BY a.employee_id, e.name ORDER BY a.employee_id");

    debug!(sql = %sql, %start, %end, "Building attendance summary");

    let mut query = sqlx::query_as::<_, AttendanceSummaryRow>(&sql)
        .bind(LATE_CUTOFF)
        .bind(start)
        .bind(end);
    if let Some(id) = employee_id {
        query = query.bind(id);
    }

    Ok(query.fetch_all(pool).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_february_runs_through_the_29th() {
        let (start, end) = month_bounds("2024-02").unwrap();
        assert_eq!(start, date(2024, 2, 1));
        assert_eq!(end, date(2024, 2, 29));
    }

    #[test]
    fn plain_february_stops_at_the_28th() {
        let (_, end) = month_bounds("2026-02").unwrap();
        assert_eq!(end, date(2026, 2, 28));
    }

    #[test]
    fn april_has_exactly_thirty_days() {
        let (start, end) = month_bounds("2026-04").unwrap();
        assert_eq!(start, date(2026, 4, 1));
        assert_eq!(end, date(2026, 4, 30));
    }

    #[test]
    fn december_rolls_into_the_next_year() {
        let (_, end) = month_bounds("2026-12").unwrap();
        assert_eq!(end, date(2026, 12, 31));
    }

    fn time(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn check_in_at_the_cutoff_is_on_time() {
        assert!(!is_late(time(9, 45, 0)));
        assert!(!is_late(time(8, 0, 0)));
    }

    #[test]
    fn one_second_past_the_cutoff_is_late() {
        assert!(is_late(time(9, 45, 1)));
        assert!(is_late(time(14, 30, 0)));
    }

    #[test]
    fn malformed_months_are_rejected() {
        for bad in ["2026-2", "202602", "2026-13", "26-02", "2026-ab", ""] {
            assert!(
                matches!(month_bounds(bad), Err(AppError::Validation { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }
}
