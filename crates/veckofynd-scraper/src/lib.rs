pub mod error;
pub mod extract;
pub mod fetch;

pub use error::ScraperError;
pub use extract::extract_offers;
pub use fetch::{HttpFetcher, PageFetcher};
