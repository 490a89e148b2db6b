//! The offer normalization pipeline: raw scraped records in, a clean
//! typed table out.
//!
//! Stages run in a fixed order — build, dedupe, prices, details, dates —
//! each as an explicit transformation from one [`OfferTable`] to the next.
//! No stage mutates shared state; the orchestrator in [`pipeline`] decides
//! what happens when a stage fails.

pub mod dates;
pub mod dedupe;
pub mod details;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod prices;
pub mod table;

pub use dates::clean_dates;
pub use dedupe::dedupe;
pub use details::clean_details;
pub use error::PipelineError;
pub use export::{export_csv, write_csv};
pub use pipeline::{normalize, FailurePolicy, NormalizeReport, StageWarning};
pub use prices::clean_prices;
pub use table::OfferTable;
