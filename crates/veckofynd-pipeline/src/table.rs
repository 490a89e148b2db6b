//! The tabular representation the cleaning stages operate on.

use veckofynd_core::{NormalizedOffer, RawOfferRecord, Value};

use crate::error::PipelineError;

/// An ordered, rectangular collection of offer rows.
///
/// Columns are the union of field names seen across the input records, in
/// first-seen order; every row is exactly as wide as `columns`, with
/// [`Value::Null`] standing in for fields a record did not carry.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl OfferTable {
    /// Builds a table from raw offer records.
    ///
    /// Heterogeneous key sets are a structural table semantic, not an
    /// error: missing fields pad as `Null`.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyInput`] if `records` is empty. Downstream
    ///   stages depend on columns existing, so an empty input surfaces as
    ///   an explicit condition rather than a silent empty table.
    /// - [`PipelineError::Conversion`] if every record is empty (no
    ///   columns can be derived).
    pub fn from_records(records: Vec<RawOfferRecord>) -> Result<Self, PipelineError> {
        if records.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        // First pass: union of field names in first-seen order.
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for name in record.field_names() {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_owned());
                }
            }
        }
        if columns.is_empty() {
            return Err(PipelineError::Conversion {
                reason: "records carry no fields".to_string(),
            });
        }

        // Second pass: one row per record, padded to the full column set.
        let rows = records
            .iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|c| record.get(c).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    /// Constructs a table directly from parts. Every row must be as wide
    /// as `columns`; used by cleaning stages and tests.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if a row width does not match the column
    /// count.
    #[must_use]
    pub fn from_parts(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == columns.len()));
        Self { columns, rows }
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the cell at (`row`, `column`), or `None` if either is out
    /// of range.
    #[must_use]
    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[idx])
    }

    /// Concatenates per-store tables into one, unioning columns and
    /// padding rows that lack a column with `Null`. Row order follows the
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::EmptyInput`] if `tables` yields nothing.
    pub fn concat(tables: impl IntoIterator<Item = OfferTable>) -> Result<Self, PipelineError> {
        let tables: Vec<OfferTable> = tables.into_iter().collect();
        if tables.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        let mut columns: Vec<String> = Vec::new();
        for table in &tables {
            for c in &table.columns {
                if !columns.iter().any(|existing| existing == c) {
                    columns.push(c.clone());
                }
            }
        }

        let mut rows = Vec::new();
        for table in &tables {
            for row in &table.rows {
                let widened = columns
                    .iter()
                    .map(|c| {
                        table
                            .column_index(c)
                            .map_or(Value::Null, |idx| row[idx].clone())
                    })
                    .collect();
                rows.push(widened);
            }
        }

        Ok(Self { columns, rows })
    }

    /// Converts the table into typed offer rows for the sink.
    ///
    /// This is lossy by design: cells that never reached their final type
    /// (e.g. a price column left as text after a best-effort stage
    /// failure) come through as `None`, and columns the table does not
    /// have are absent for every row.
    #[must_use]
    pub fn to_offers(&self) -> Vec<NormalizedOffer> {
        let name_idx = self.column_index("Name");
        let price_idx = self.column_index("Price");
        let quantity_idx = self.column_index("Quantity");
        let comparison_idx = self.column_index("ComparisonPrice");
        let store_idx = self.column_index("Store");
        let from_idx = self.column_index("ValidFrom");
        let through_idx = self.column_index("ValidThrough");
        let until_idx = self.column_index("ValidUntil");

        let text_at = |row: &[Value], idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| row[i].to_text())
        };

        self.rows
            .iter()
            .map(|row| NormalizedOffer {
                name: text_at(row, name_idx).unwrap_or_default(),
                price: price_idx.and_then(|i| row[i].as_number()),
                quantity: text_at(row, quantity_idx),
                comparison_price: text_at(row, comparison_idx),
                store: text_at(row, store_idx).unwrap_or_default(),
                valid_from: from_idx.and_then(|i| row[i].as_date()),
                valid_through: through_idx.and_then(|i| row[i].as_date()),
                valid_until: until_idx.and_then(|i| row[i].as_date()),
            })
            .collect()
    }
}
