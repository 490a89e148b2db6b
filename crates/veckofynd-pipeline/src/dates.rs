//! Coercive parsing of the validity date columns.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use veckofynd_core::Value;

use crate::error::PipelineError;
use crate::table::OfferTable;

/// The three free-form date columns carried by raw offer records.
const DATE_COLUMNS: [&str; 3] = ["ValidFrom", "ValidThrough", "ValidUntil"];

/// Converts the `ValidFrom`, `ValidThrough` and `ValidUntil` columns to
/// calendar dates, dropping any time-of-day component.
///
/// Parsing is coercive, not strict: unparsable text, empty strings, and
/// non-text cells all become `Null` — ingestion noise upstream must never
/// fail a row here.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumn`] if any of the three date
/// columns is absent — a structural problem, unlike a malformed cell.
pub fn clean_dates(table: &OfferTable) -> Result<OfferTable, PipelineError> {
    let mut indices = Vec::with_capacity(DATE_COLUMNS.len());
    for column in DATE_COLUMNS {
        let idx = table
            .column_index(column)
            .ok_or_else(|| PipelineError::MissingColumn(column.to_string()))?;
        indices.push(idx);
    }

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let mut row = row.clone();
            for &idx in &indices {
                row[idx] = coerce_date(&row[idx]);
            }
            row
        })
        .collect();

    tracing::info!(rows = table.row_count(), "date columns converted to dates");
    Ok(OfferTable::from_parts(table.columns().to_vec(), rows))
}

/// Parses a single cell to a date, or `Null` if it cannot be one.
///
/// Accepted shapes, tried in order: plain `YYYY-MM-DD`, local datetimes
/// (`YYYY-MM-DDTHH:MM:SS` and with a space), and full RFC 3339 timestamps
/// as emitted by the listing's `itemprop` metadata.
fn coerce_date(value: &Value) -> Value {
    match value {
        Value::Date(d) => Value::Date(*d),
        Value::Null | Value::Number(_) => Value::Null,
        Value::Text(s) => {
            let s = s.trim();
            let parsed = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
                        .ok()
                        .map(|dt| dt.date())
                })
                .or_else(|| {
                    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
                        .ok()
                        .map(|dt| dt.date())
                })
                .or_else(|| {
                    DateTime::parse_from_rfc3339(s)
                        .ok()
                        .map(|dt| dt.date_naive())
                });
            parsed.map_or(Value::Null, Value::Date)
        }
    }
}
