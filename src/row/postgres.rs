//! Conversion of `sqlx` Postgres rows into hydration rows.
//!
//! JSON and JSONB columns arrive already structured, so relation data
//! aggregated with `json_agg`/`row_to_json` is dispatched without a second
//! decode. UUID and temporal columns are rendered as text.

use super::{ColumnValue, Row};
use crate::error::{HydrationError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{Column as _, Row as _, TypeInfo as _};

impl Row {
    /// Build a row from every column of a Postgres result row
    pub fn from_pg_row(pg_row: &PgRow) -> Result<Self> {
        let mut row = Row::new();
        for column in pg_row.columns() {
            let value = decode_column(pg_row, column.ordinal(), column.type_info().name())
                .map_err(|err| match err {
                    HydrationError::UnsupportedColumnType { type_name, .. } => {
                        HydrationError::unsupported_column_type(column.name(), type_name)
                    }
                    other => other,
                })?;
            row.insert(column.name(), value);
        }
        Ok(row)
    }
}

impl TryFrom<&PgRow> for Row {
    type Error = HydrationError;

    fn try_from(pg_row: &PgRow) -> Result<Self> {
        Row::from_pg_row(pg_row)
    }
}

fn decode_column(row: &PgRow, index: usize, type_name: &str) -> Result<ColumnValue> {
    let value: ColumnValue = match type_name {
        "BOOL" => row.try_get::<Option<bool>, _>(index)?.into(),
        "INT2" => row.try_get::<Option<i16>, _>(index)?.map(i64::from).into(),
        "INT4" => row.try_get::<Option<i32>, _>(index)?.into(),
        "INT8" => row.try_get::<Option<i64>, _>(index)?.into(),
        "FLOAT4" => row.try_get::<Option<f32>, _>(index)?.map(f64::from).into(),
        "FLOAT8" => row.try_get::<Option<f64>, _>(index)?.into(),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CHAR" => {
            row.try_get::<Option<String>, _>(index)?.into()
        }
        "JSON" | "JSONB" => row
            .try_get::<Option<serde_json::Value>, _>(index)?
            .map(ColumnValue::from)
            .unwrap_or(ColumnValue::Null),
        "UUID" => row
            .try_get::<Option<uuid::Uuid>, _>(index)?
            .map(|id| id.to_string())
            .into(),
        "TIMESTAMPTZ" => row
            .try_get::<Option<DateTime<Utc>>, _>(index)?
            .map(|ts| ts.to_rfc3339())
            .into(),
        "TIMESTAMP" => row
            .try_get::<Option<NaiveDateTime>, _>(index)?
            .map(|ts| ts.to_string())
            .into(),
        "DATE" => row
            .try_get::<Option<NaiveDate>, _>(index)?
            .map(|date| date.to_string())
            .into(),
        "TEXT[]" | "VARCHAR[]" => sequence(row.try_get::<Option<Vec<String>>, _>(index)?),
        "INT4[]" => sequence(row.try_get::<Option<Vec<i32>>, _>(index)?),
        "INT8[]" => sequence(row.try_get::<Option<Vec<i64>>, _>(index)?),
        other => return Err(HydrationError::unsupported_column_type(index.to_string(), other)),
    };
    Ok(value)
}

fn sequence<T: Into<serde_json::Value>>(items: Option<Vec<T>>) -> ColumnValue {
    match items {
        Some(items) => ColumnValue::Sequence(items.into_iter().map(Into::into).collect()),
        None => ColumnValue::Null,
    }
}
