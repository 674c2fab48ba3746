//! Row decoding helpers.
//!
//! Tables are read without a compile-time row type, so rows are decoded
//! positionally against the column list that produced the projection.

use mzdex_core::schema::ColumnInfo;
use mzdex_core::values::{CellValue, Record};

use crate::error::DatabaseError;

/// Map a libSQL value onto the store-independent cell type.
#[must_use]
pub fn cell_from_value(value: libsql::Value) -> CellValue {
    match value {
        libsql::Value::Null => CellValue::Null,
        libsql::Value::Integer(v) => CellValue::Integer(v),
        libsql::Value::Real(v) => CellValue::Real(v),
        libsql::Value::Text(v) => CellValue::Text(v),
        libsql::Value::Blob(v) => CellValue::Blob(v),
    }
}

/// Decode a row whose projection is exactly `columns`, in order.
///
/// # Errors
///
/// Returns `DatabaseError` if a column cannot be read.
pub fn row_to_record(row: &libsql::Row, columns: &[ColumnInfo]) -> Result<Record, DatabaseError> {
    let mut record = Record::with_capacity(columns.len());
    for (idx, column) in columns.iter().enumerate() {
        let idx = i32::try_from(idx)
            .map_err(|_| DatabaseError::Query(format!("too many columns: {}", columns.len())))?;
        record.push(column.name.clone(), cell_from_value(row.get_value(idx)?));
    }
    Ok(record)
}

/// Read a non-negative `COUNT(*)` from the first column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the value is negative or not an integer.
pub fn get_count(row: &libsql::Row) -> Result<u64, DatabaseError> {
    let count = row.get::<i64>(0)?;
    u64::try_from(count).map_err(|_| DatabaseError::Query(format!("negative count: {count}")))
}

/// Clamp a `u64` into SQLite's signed integer range for LIMIT/OFFSET.
#[must_use]
pub fn sql_int(value: u64) -> libsql::Value {
    libsql::Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}
