use chrono::{NaiveDate, NaiveDateTime};
use sqlx::Arguments;
use sqlx::mysql::MySqlArguments;

/// Typed value for dynamically assembled SQL. Filter and patch builders
/// collect these so binding never round-trips through JSON.
#[derive(Debug, Clone)]
pub enum SqlValue {
    String(String),
    U64(u64),
    I64(i64),
    F64(f64),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
}

/// Packs collected values into MySQL bind arguments, in order, for
/// `sqlx::query_with` and its `_as`/`_scalar` siblings.
pub fn mysql_args<I>(values: I) -> MySqlArguments
where
    I: IntoIterator<Item = SqlValue>,
{
    let mut args = MySqlArguments::default();
    for value in values {
        match value {
            SqlValue::String(v) => args.add(v),
            SqlValue::U64(v) => args.add(v),
            SqlValue::I64(v) => args.add(v),
            SqlValue::F64(v) => args.add(v),
            SqlValue::Date(v) => args.add(v),
            SqlValue::DateTime(v) => args.add(v),
        }
    }
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_value_kind_packs_into_arguments() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let _args = mysql_args(vec![
            SqlValue::String("x".to_string()),
            SqlValue::U64(1),
            SqlValue::I64(-1),
            SqlValue::F64(1.5),
            SqlValue::Date(date),
            SqlValue::DateTime(date.and_hms_opt(9, 0, 0).unwrap()),
        ]);
        let _empty = mysql_args(Vec::new());
    }
}
