//! The untyped scalar cell shared by raw scraped records and cleaned tables.
//!
//! Scraped fields arrive as free-form text; cleaning stages rewrite whole
//! columns into numbers or dates in place. One `Value` enum covers both
//! sides so a table can hold half-cleaned data between stages.

use chrono::NaiveDate;
use serde::Serialize;

/// A single cell of an offer table.
///
/// `Null` is an explicit absence marker, distinct from an empty string or
/// zero. A missing key in a raw record, an unparsable date, and a missing
/// half of a split details field all become `Null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Coerces the cell to text the way the cleaning stages see it.
    ///
    /// `Null` stays absent (`None`) rather than becoming the string
    /// `"null"` — stages that require a value treat absence as a failure,
    /// stages that coerce treat it as "no value".
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Renders the cell for delimited-text export. `Null` is the empty
    /// field, dates are ISO `YYYY-MM-DD`.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Text(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_has_no_text() {
        assert!(Value::Null.to_text().is_none());
    }

    #[test]
    fn text_round_trips() {
        assert_eq!(Value::from("25 kr").to_text().as_deref(), Some("25 kr"));
    }

    #[test]
    fn number_coerces_to_text() {
        assert_eq!(Value::Number(123.45).to_text().as_deref(), Some("123.45"));
    }

    #[test]
    fn date_coerces_to_iso_text() {
        let d = NaiveDate::from_ymd_opt(2024, 9, 23).unwrap();
        assert_eq!(Value::Date(d).to_text().as_deref(), Some("2024-09-23"));
    }

    #[test]
    fn render_null_is_empty_field() {
        assert_eq!(Value::Null.render(), "");
    }

    #[test]
    fn render_whole_number_has_no_fraction() {
        assert_eq!(Value::Number(25.0).render(), "25");
    }

    #[test]
    fn null_is_distinct_from_empty_string() {
        assert_ne!(Value::Null, Value::Text(String::new()));
    }
}
