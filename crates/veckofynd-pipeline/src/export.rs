//! Delimited-text export of an offer table, for manual inspection.

use std::io::Write;
use std::path::Path;

use crate::error::PipelineError;
use crate::table::OfferTable;

/// Writes the table as CSV: a header row with the column names, then one
/// record per row. `Null` cells render as empty fields, dates as
/// `YYYY-MM-DD`.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] on serialization or I/O failure.
pub fn write_csv<W: Write>(table: &OfferTable, writer: W) -> Result<(), PipelineError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(table.columns())?;
    for row in table.rows() {
        csv_writer.write_record(row.iter().map(veckofynd_core::Value::render))?;
    }
    csv_writer.flush()?;

    Ok(())
}

/// Writes the table as CSV to a file at `path`.
///
/// # Errors
///
/// Returns [`PipelineError::Csv`] if the file cannot be created or written.
pub fn export_csv(table: &OfferTable, path: &Path) -> Result<(), PipelineError> {
    let file = std::fs::File::create(path)?;
    write_csv(table, file)?;
    tracing::info!(path = %path.display(), rows = table.row_count(), "offer table exported");
    Ok(())
}
