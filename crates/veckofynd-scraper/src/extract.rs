//! Offer extraction from rendered listing HTML.
//!
//! The listing site is a styled-components React app; the class names
//! below (including their `sc-bj82vg` hash) are the known element
//! structure this extractor targets. Each `li` listing item carries the
//! visible name/price/details nodes plus schema.org `meta` tags with the
//! store name and validity window.

use scraper::{ElementRef, Html, Selector};
use veckofynd_core::RawOfferRecord;

use crate::error::ScraperError;

const OFFER_ITEM: &str = "li.OfferList__OfferListItem-sc-bj82vg-1";
const OFFER_NAME: &str = "header.OfferList___StyledHeader-sc-bj82vg-11";
const OFFER_PRICE: &str = "span.OfferList___StyledSpan2-sc-bj82vg-14";
const OFFER_DETAILS: &str = "div.OfferList__OfferPcs-sc-bj82vg-7";
const META_STORE: &str = r#"meta[itemprop="name"]"#;
const META_VALID_FROM: &str = r#"meta[itemprop="validFrom"]"#;
const META_VALID_THROUGH: &str = r#"meta[itemprop="validThrough"]"#;
const META_VALID_UNTIL: &str = r#"meta[itemprop="priceValidUntil"]"#;

struct OfferSelectors {
    item: Selector,
    name: Selector,
    price: Selector,
    details: Selector,
    store: Selector,
    valid_from: Selector,
    valid_through: Selector,
    valid_until: Selector,
}

impl OfferSelectors {
    fn new() -> Result<Self, ScraperError> {
        Ok(Self {
            item: parse_selector(OFFER_ITEM)?,
            name: parse_selector(OFFER_NAME)?,
            price: parse_selector(OFFER_PRICE)?,
            details: parse_selector(OFFER_DETAILS)?,
            store: parse_selector(META_STORE)?,
            valid_from: parse_selector(META_VALID_FROM)?,
            valid_through: parse_selector(META_VALID_THROUGH)?,
            valid_until: parse_selector(META_VALID_UNTIL)?,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::Selector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

/// Parses rendered listing HTML into one raw record per offer element.
///
/// A listing item missing any expected node is logged and skipped rather
/// than failing the page — partially broken markup on one card should
/// not cost the whole scrape.
///
/// # Errors
///
/// - [`ScraperError::NoOffersFound`] if the page contains no offer list
///   items at all (wrong page, or the markup has changed under us).
/// - [`ScraperError::Selector`] if a selector constant fails to parse.
pub fn extract_offers(html: &str) -> Result<Vec<RawOfferRecord>, ScraperError> {
    let selectors = OfferSelectors::new()?;
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    let mut listing_count = 0usize;

    for element in document.select(&selectors.item) {
        listing_count += 1;
        match extract_one(element, &selectors) {
            Some(record) => records.push(record),
            None => {
                tracing::warn!(
                    listing = listing_count,
                    "skipping offer listing with missing elements"
                );
            }
        }
    }

    if listing_count == 0 {
        return Err(ScraperError::NoOffersFound);
    }

    tracing::info!(
        offers = records.len(),
        listings = listing_count,
        "extracted offers from page"
    );
    Ok(records)
}

fn extract_one(element: ElementRef<'_>, selectors: &OfferSelectors) -> Option<RawOfferRecord> {
    let name = text_of(element, &selectors.name)?;
    let price = text_of(element, &selectors.price)?;
    let details = text_of(element, &selectors.details)?;
    let store = meta_content(element, &selectors.store)?;
    let valid_from = meta_content(element, &selectors.valid_from)?;
    let valid_through = meta_content(element, &selectors.valid_through)?;
    let valid_until = meta_content(element, &selectors.valid_until)?;

    let mut record = RawOfferRecord::new();
    record.set("Name", name);
    record.set("Price", price);
    record.set("Details", details);
    record.set("Store", store);
    record.set("ValidFrom", valid_from);
    record.set("ValidThrough", valid_through);
    record.set("ValidUntil", valid_until);
    Some(record)
}

/// Collected, whitespace-trimmed text of the first node matching
/// `selector` under `element`.
fn text_of(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|node| node.text().collect::<String>().trim().to_owned())
}

/// `content` attribute of the first matching `meta` node.
fn meta_content(element: ElementRef<'_>, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|node| node.value().attr("content"))
        .map(str::to_owned)
}
