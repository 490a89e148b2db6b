//! Price column normalization: locale-formatted currency text to `f64`.

use veckofynd_core::Value;

use crate::error::PipelineError;
use crate::table::OfferTable;

/// The literal currency marker stripped from price text ("25 kr").
const CURRENCY_MARKER: &str = "kr";

/// Converts every cell of the `Price` column from Swedish-locale currency
/// text to a number: strip the `kr` marker, swap the decimal comma for a
/// point, parse as `f64`.
///
/// All-or-nothing per column: the first row that fails to parse fails the
/// whole stage and the input table is returned untouched through the
/// error path. There is no per-row fallback — a half-numeric price column
/// would be worse for downstream queries than a fully textual one.
///
/// # Errors
///
/// - [`PipelineError::MissingColumn`] if the table has no `Price` column.
/// - [`PipelineError::ColumnCleaning`] naming the first offending row.
pub fn clean_prices(table: &OfferTable) -> Result<OfferTable, PipelineError> {
    let price_idx = table
        .column_index("Price")
        .ok_or_else(|| PipelineError::MissingColumn("Price".to_string()))?;

    let parsed: Vec<f64> = table
        .rows()
        .iter()
        .enumerate()
        .map(|(row_idx, row)| parse_price(&row[price_idx], row_idx))
        .collect::<Result<_, _>>()?;

    let rows = table
        .rows()
        .iter()
        .zip(parsed)
        .map(|(row, price)| {
            let mut row = row.clone();
            row[price_idx] = Value::Number(price);
            row
        })
        .collect();

    tracing::info!(rows = table.row_count(), "price column converted to numeric");
    Ok(OfferTable::from_parts(table.columns().to_vec(), rows))
}

fn parse_price(value: &Value, row: usize) -> Result<f64, PipelineError> {
    let text = value.to_text().ok_or_else(|| PipelineError::ColumnCleaning {
        column: "Price".to_string(),
        row,
        reason: "price is missing".to_string(),
    })?;

    let cleaned = text.replace(CURRENCY_MARKER, "").replace(',', ".");
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::ColumnCleaning {
            column: "Price".to_string(),
            row,
            reason: format!("cannot parse {text:?} as a number"),
        })
}
