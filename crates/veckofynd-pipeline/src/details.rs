//! Splitting the free-form details text into quantity and comparison price.

use veckofynd_core::Value;

use crate::error::PipelineError;
use crate::table::OfferTable;

/// The stylized bullet the listing markup uses between the quantity and
/// the comparison price, e.g. `"1 st•100 kr/kg"`.
pub const DETAILS_SEPARATOR: char = '\u{2022}';

/// Replaces the `Details` column with two new columns, `Quantity` and
/// `ComparisonPrice`, inserted at the same position.
///
/// Split policy: the text is split on the FIRST separator only — the left
/// part becomes the quantity, everything after the first bullet becomes
/// the comparison price. A details value with no separator keeps its full
/// text as the quantity and gets a `Null` comparison price; a `Null`
/// details cell yields two `Null`s. Splitting never fails a row.
///
/// # Errors
///
/// Returns [`PipelineError::MissingColumn`] if the table has no `Details`
/// column.
pub fn clean_details(table: &OfferTable) -> Result<OfferTable, PipelineError> {
    let details_idx = table
        .column_index("Details")
        .ok_or_else(|| PipelineError::MissingColumn("Details".to_string()))?;

    let mut columns = table.columns().to_vec();
    columns.splice(
        details_idx..=details_idx,
        ["Quantity".to_string(), "ComparisonPrice".to_string()],
    );

    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let (quantity, comparison) = split_details(&row[details_idx]);
            let mut row = row.clone();
            row.splice(details_idx..=details_idx, [quantity, comparison]);
            row
        })
        .collect();

    tracing::info!(
        rows = table.row_count(),
        "details column split into quantity and comparison price"
    );
    Ok(OfferTable::from_parts(columns, rows))
}

fn split_details(value: &Value) -> (Value, Value) {
    match value.to_text() {
        None => (Value::Null, Value::Null),
        Some(text) => match text.split_once(DETAILS_SEPARATOR) {
            Some((left, right)) => (Value::from(left), Value::from(right)),
            None => (Value::from(text), Value::Null),
        },
    }
}
