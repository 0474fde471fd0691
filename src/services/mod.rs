//! Report pipeline services.

pub mod aggregation;
pub mod extraction;
pub mod fetcher;
pub mod pipeline;
pub mod workbook;

pub use aggregation::aggregate;
pub use extraction::extract;
pub use fetcher::{FetchSettings, ReportFetcher};
pub use pipeline::{RunSummary, run};
pub use workbook::ReportWriter;
