use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no records to normalize")]
    EmptyInput,

    #[error("failed to build table from records: {reason}")]
    Conversion { reason: String },

    #[error("expected column {0} is missing from the table")]
    MissingColumn(String),

    #[error("cleaning failed for column {column} at row {row}: {reason}")]
    ColumnCleaning {
        column: String,
        row: usize,
        reason: String,
    },

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV export failed: {0}")]
    CsvIo(#[from] std::io::Error),
}
