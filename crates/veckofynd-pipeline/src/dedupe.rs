//! Removal of fully identical rows.

use crate::table::OfferTable;

/// Removes rows that are exact duplicates of an earlier row, preserving
/// first-occurrence order. Returns the reduced table and the number of
/// rows dropped.
///
/// Equality is row-wise structural equality across all columns. This
/// stage runs right after table construction, before price and date
/// cleaning, so two logically identical offers whose raw price text
/// differs (say `"25 kr"` vs `"25kr"`) both survive. Moving dedupe after
/// cleaning would change which rows are considered duplicates; the
/// pre-cleaning position is kept deliberately.
#[must_use]
pub fn dedupe(table: &OfferTable) -> (OfferTable, usize) {
    let mut kept: Vec<Vec<veckofynd_core::Value>> = Vec::with_capacity(table.row_count());

    // Quadratic scan; weekly-offer tables are a few hundred rows.
    for row in table.rows() {
        if !kept.iter().any(|seen| seen == row) {
            kept.push(row.clone());
        }
    }

    let removed = table.row_count() - kept.len();
    if removed > 0 {
        tracing::info!(removed, "dropped duplicate rows");
    }

    (
        OfferTable::from_parts(table.columns().to_vec(), kept),
        removed,
    )
}

#[cfg(test)]
mod tests {
    use veckofynd_core::Value;

    use super::*;

    fn table(rows: Vec<Vec<Value>>) -> OfferTable {
        OfferTable::from_parts(vec!["Name".to_string(), "Price".to_string()], rows)
    }

    #[test]
    fn identical_rows_collapse_to_first() {
        let t = table(vec![
            vec![Value::from("Kaffe"), Value::from("25 kr")],
            vec![Value::from("Kaffe"), Value::from("25 kr")],
            vec![Value::from("Te"), Value::from("30 kr")],
        ]);
        let (deduped, removed) = dedupe(&t);
        assert_eq!(deduped.row_count(), 2);
        assert_eq!(removed, 1);
        assert_eq!(deduped.cell(0, "Name"), Some(&Value::from("Kaffe")));
        assert_eq!(deduped.cell(1, "Name"), Some(&Value::from("Te")));
    }

    #[test]
    fn differently_formatted_price_text_is_not_a_duplicate() {
        let t = table(vec![
            vec![Value::from("Kaffe"), Value::from("25 kr")],
            vec![Value::from("Kaffe"), Value::from("25kr")],
        ]);
        let (deduped, removed) = dedupe(&t);
        assert_eq!(deduped.row_count(), 2);
        assert_eq!(removed, 0);
    }

    #[test]
    fn every_output_row_exists_in_input() {
        let t = table(vec![
            vec![Value::from("A"), Value::Null],
            vec![Value::from("B"), Value::from("1 kr")],
            vec![Value::from("A"), Value::Null],
        ]);
        let (deduped, _) = dedupe(&t);
        for row in deduped.rows() {
            assert!(t.rows().contains(row));
        }
    }

    #[test]
    fn no_duplicates_means_no_change() {
        let t = table(vec![
            vec![Value::from("A"), Value::from("1 kr")],
            vec![Value::from("B"), Value::from("2 kr")],
        ]);
        let (deduped, removed) = dedupe(&t);
        assert_eq!(deduped, t);
        assert_eq!(removed, 0);
    }
}
