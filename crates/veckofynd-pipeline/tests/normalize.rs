//! End-to-end pipeline tests over a batch that mixes valid rows, a
//! duplicate pair, a malformed price, and malformed dates.

use chrono::NaiveDate;
use veckofynd_core::{RawOfferRecord, Value};
use veckofynd_pipeline::{normalize, FailurePolicy, PipelineError};

fn record(fields: &[(&str, &str)]) -> RawOfferRecord {
    let mut r = RawOfferRecord::new();
    for (name, value) in fields {
        r.set(*name, *value);
    }
    r
}

/// The classic messy batch: two identical rows, one row with an
/// unparsable price and a dotted quantity, one row with a decimal-comma
/// price and an empty expiry date.
fn messy_batch() -> Vec<RawOfferRecord> {
    vec![
        record(&[
            ("Name", "K-orv"),
            ("Price", "25 kr"),
            ("Details", "11\u{2022}00"),
            ("Store", "ICA"),
            ("ValidFrom", "20"),
            ("ValidThrough", "2024-09-22"),
            ("ValidUntil", "2024-09-25"),
        ]),
        record(&[
            ("Name", "K-orv"),
            ("Price", "25 kr"),
            ("Details", "11\u{2022}00"),
            ("Store", "ICA"),
            ("ValidFrom", "20"),
            ("ValidThrough", "2024-09-22"),
            ("ValidUntil", "2024-09-25"),
        ]),
        record(&[
            ("Name", "Grillkol"),
            ("Price", "25SEK"),
            ("Details", "1.\u{2022}100"),
            ("Store", "ICA"),
            ("ValidFrom", "2024-09-22 18:00:00"),
            ("ValidThrough", "20"),
            ("ValidUntil", "2024-X-26"),
        ]),
        record(&[
            ("Name", "T\u{e4}ndv\u{e4}tska"),
            ("Price", "123,45"),
            ("Details", "3\u{2022}300"),
            ("Store", "Coop"),
            ("ValidFrom", "2024-09-23"),
            ("ValidThrough", "2024-09-24"),
            ("ValidUntil", ""),
        ]),
    ]
}

fn date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

#[test]
fn best_effort_survives_the_messy_batch() {
    let report = normalize(messy_batch(), FailurePolicy::BestEffort).unwrap();

    // One duplicate removed.
    assert_eq!(report.duplicates_removed, 1);
    assert_eq!(report.table.row_count(), 3);

    // The price stage failed as a whole ("25SEK"); prices stay raw text.
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].stage, "clean_prices");
    assert_eq!(report.table.cell(0, "Price"), Some(&Value::from("25 kr")));

    // Details still split: "1.•100" → "1." / "100".
    assert_eq!(report.table.cell(1, "Quantity"), Some(&Value::from("1.")));
    assert_eq!(
        report.table.cell(1, "ComparisonPrice"),
        Some(&Value::from("100"))
    );
    assert!(report.table.column_index("Details").is_none());

    // Dates coerced: valid text parses, junk and empties become no-value.
    assert_eq!(report.table.cell(0, "ValidFrom"), Some(&Value::Null));
    assert_eq!(report.table.cell(1, "ValidFrom"), Some(&date(2024, 9, 22)));
    assert_eq!(report.table.cell(1, "ValidUntil"), Some(&Value::Null));
    assert_eq!(report.table.cell(2, "ValidFrom"), Some(&date(2024, 9, 23)));
    assert_eq!(report.table.cell(2, "ValidUntil"), Some(&Value::Null));
}

#[test]
fn strict_mode_rejects_the_messy_batch() {
    let err = normalize(messy_batch(), FailurePolicy::Strict).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::ColumnCleaning { ref column, .. } if column == "Price"
    ));
}

#[test]
fn fully_valid_batch_cleans_end_to_end() {
    let records = vec![
        record(&[
            ("Name", "Kaffe"),
            ("Price", "123,45 kr"),
            ("Details", "1 st\u{2022}100 kr/kg"),
            ("Store", "Hemk\u{f6}p"),
            ("ValidFrom", "2024-09-23T00:00:00+02:00"),
            ("ValidThrough", "2024-09-28"),
            ("ValidUntil", "2024-09-28"),
        ]),
    ];
    let report = normalize(records, FailurePolicy::Strict).unwrap();
    assert!(report.is_fully_cleaned());

    let offers = report.table.to_offers();
    assert_eq!(offers.len(), 1);
    assert_eq!(offers[0].name, "Kaffe");
    assert_eq!(offers[0].price, Some(123.45));
    assert_eq!(offers[0].quantity.as_deref(), Some("1 st"));
    assert_eq!(offers[0].comparison_price.as_deref(), Some("100 kr/kg"));
    assert_eq!(offers[0].store, "Hemk\u{f6}p");
    assert_eq!(offers[0].valid_from, NaiveDate::from_ymd_opt(2024, 9, 23));
    assert_eq!(offers[0].valid_through, NaiveDate::from_ymd_opt(2024, 9, 28));
}

#[test]
fn messy_batch_converts_to_offers_without_prices() {
    let report = normalize(messy_batch(), FailurePolicy::BestEffort).unwrap();
    let offers = report.table.to_offers();
    assert_eq!(offers.len(), 3);
    // Prices never parsed, so every offer carries no numeric price.
    assert!(offers.iter().all(|o| o.price.is_none()));
    // Stores still come through as text.
    assert_eq!(offers[2].store, "Coop");
}
