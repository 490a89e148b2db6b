//! The orchestrator: runs the cleaning stages in their fixed order under
//! an explicit failure policy.

use veckofynd_core::RawOfferRecord;

use crate::error::PipelineError;
use crate::table::OfferTable;
use crate::{clean_dates, clean_details, clean_prices, dedupe};

/// What to do when a cleaning stage fails for its column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Log the failure, keep the table as it stood before the failed
    /// stage, and continue with the next stage. The run always produces
    /// *some* table, possibly only partially cleaned — the right trade
    /// for a scheduled, unattended scrape where data survival beats
    /// per-column correctness.
    #[default]
    BestEffort,
    /// Abort on the first stage failure.
    Strict,
}

/// A stage failure tolerated under [`FailurePolicy::BestEffort`].
#[derive(Debug)]
pub struct StageWarning {
    pub stage: &'static str,
    pub error: PipelineError,
}

/// The outcome of a normalization run.
#[derive(Debug)]
pub struct NormalizeReport {
    pub table: OfferTable,
    pub duplicates_removed: usize,
    /// Stage failures tolerated in best-effort mode; empty on a fully
    /// clean run.
    pub warnings: Vec<StageWarning>,
}

impl NormalizeReport {
    #[must_use]
    pub fn is_fully_cleaned(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Runs the full normalization pipeline over one batch of raw records:
/// table build → dedupe → prices → details → dates.
///
/// Deduplication runs before price and date cleaning on purpose; see
/// [`dedupe`] for the ordering consequence.
///
/// # Errors
///
/// [`PipelineError::EmptyInput`] and [`PipelineError::Conversion`] always
/// abort — there is nothing useful to degrade to without a table. Under
/// [`FailurePolicy::Strict`] the first cleaning-stage failure aborts too;
/// under [`FailurePolicy::BestEffort`] cleaning failures are collected as
/// warnings and the pipeline continues with the last good table.
pub fn normalize(
    records: Vec<RawOfferRecord>,
    policy: FailurePolicy,
) -> Result<NormalizeReport, PipelineError> {
    let record_count = records.len();
    let table = OfferTable::from_records(records)?;
    tracing::info!(
        rows = table.row_count(),
        columns = table.column_count(),
        "built offer table from {record_count} records"
    );

    let (mut table, duplicates_removed) = dedupe(&table);

    let stages: [(&'static str, StageFn); 3] = [
        ("clean_prices", clean_prices),
        ("clean_details", clean_details),
        ("clean_dates", clean_dates),
    ];

    let mut warnings = Vec::new();
    for (stage, run) in stages {
        match run(&table) {
            Ok(cleaned) => table = cleaned,
            Err(error) => match policy {
                FailurePolicy::Strict => return Err(error),
                FailurePolicy::BestEffort => {
                    tracing::warn!(
                        stage,
                        %error,
                        "cleaning stage failed — keeping table from previous stage"
                    );
                    warnings.push(StageWarning { stage, error });
                }
            },
        }
    }

    Ok(NormalizeReport {
        table,
        duplicates_removed,
        warnings,
    })
}

type StageFn = fn(&OfferTable) -> Result<OfferTable, PipelineError>;

#[cfg(test)]
mod tests {
    use veckofynd_core::Value;

    use super::*;

    fn record(name: &str, price: &str, details: &str, until: &str) -> RawOfferRecord {
        let mut r = RawOfferRecord::new();
        r.set("Name", name);
        r.set("Price", price);
        r.set("Details", details);
        r.set("Store", "ICA");
        r.set("ValidFrom", "2024-09-22");
        r.set("ValidThrough", "2024-09-28");
        r.set("ValidUntil", until);
        r
    }

    #[test]
    fn empty_input_aborts_under_both_policies() {
        assert!(matches!(
            normalize(vec![], FailurePolicy::BestEffort).unwrap_err(),
            PipelineError::EmptyInput
        ));
        assert!(matches!(
            normalize(vec![], FailurePolicy::Strict).unwrap_err(),
            PipelineError::EmptyInput
        ));
    }

    #[test]
    fn clean_batch_produces_no_warnings() {
        let records = vec![record("Kaffe", "25 kr", "1 st\u{2022}100 kr/kg", "2024-09-28")];
        let report = normalize(records, FailurePolicy::BestEffort).unwrap();
        assert!(report.is_fully_cleaned());
        assert_eq!(report.table.cell(0, "Price"), Some(&Value::Number(25.0)));
        assert_eq!(report.table.cell(0, "Quantity"), Some(&Value::from("1 st")));
    }

    #[test]
    fn best_effort_keeps_previous_table_on_price_failure() {
        let records = vec![record("Korv", "25SEK", "1\u{2022}100", "2024-09-28")];
        let report = normalize(records, FailurePolicy::BestEffort).unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].stage, "clean_prices");
        // Price stays raw text, but later stages still ran.
        assert_eq!(report.table.cell(0, "Price"), Some(&Value::from("25SEK")));
        assert!(report.table.column_index("Quantity").is_some());
        assert_eq!(
            report.table.cell(0, "ValidUntil"),
            Some(&Value::Date(
                chrono::NaiveDate::from_ymd_opt(2024, 9, 28).unwrap()
            ))
        );
    }

    #[test]
    fn strict_aborts_on_price_failure() {
        let records = vec![record("Korv", "25SEK", "1\u{2022}100", "2024-09-28")];
        let err = normalize(records, FailurePolicy::Strict).unwrap_err();
        assert!(matches!(err, PipelineError::ColumnCleaning { .. }));
    }

    #[test]
    fn duplicates_are_counted() {
        let records = vec![
            record("Kaffe", "25 kr", "1\u{2022}100", "2024-09-28"),
            record("Kaffe", "25 kr", "1\u{2022}100", "2024-09-28"),
        ];
        let report = normalize(records, FailurePolicy::BestEffort).unwrap();
        assert_eq!(report.duplicates_removed, 1);
        assert_eq!(report.table.row_count(), 1);
    }
}
