//! CSV mass lists for batch annotation.

use std::io::Read;

use crate::error::SearchError;

/// Default column holding observed masses.
pub const DEFAULT_MASS_COLUMN: &str = "mz";

/// Read the `column` values of a headed CSV as masses, in row order.
///
/// Cells that do not parse as a number (including empty cells) come back as
/// NaN, so they still produce an annotation item, with an error, in place.
///
/// # Errors
///
/// Returns [`SearchError::ColumnNotFound`] when the header lacks `column`, or
/// [`SearchError::Csv`] for malformed input.
pub fn read_masses<R: Read>(reader: R, column: &str) -> Result<Vec<f64>, SearchError> {
    let mut csv = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let index = headers
        .iter()
        .position(|h| h == column)
        .ok_or_else(|| SearchError::ColumnNotFound {
            column: column.to_string(),
            available: headers.iter().map(ToString::to_string).collect(),
        })?;

    let mut masses = Vec::new();
    for record in csv.records() {
        let record = record?;
        let mass = record
            .get(index)
            .and_then(|cell| cell.parse::<f64>().ok())
            .unwrap_or(f64::NAN);
        masses.push(mass);
    }
    tracing::debug!(column, masses = masses.len(), "read mass list");
    Ok(masses)
}
