//! The cleaned, typed offer row handed to the sink.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized weekly offer, ready for storage and analysis.
///
/// `price` is optional because the pipeline's best-effort mode can hand a
/// table to the sink whose price column never parsed; such rows carry no
/// numeric price rather than a fabricated one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedOffer {
    pub name: String,
    pub price: Option<f64>,
    /// Left half of the listing's details text, e.g. `"1 st"`.
    pub quantity: Option<String>,
    /// Right half of the listing's details text, e.g. `"100 kr/kg"`.
    pub comparison_price: Option<String>,
    pub store: String,
    pub valid_from: Option<NaiveDate>,
    pub valid_through: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
}

impl NormalizedOffer {
    /// Returns `true` if `date` falls inside the offer's validity window.
    ///
    /// An absent endpoint is treated as unbounded on that side.
    #[must_use]
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        let from_ok = self.valid_from.is_none_or(|from| date >= from);
        let through_ok = self.valid_through.is_none_or(|through| date <= through);
        from_ok && through_ok
    }
}
