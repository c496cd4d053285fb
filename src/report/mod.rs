//! Report module - request handling and chart specification generation

mod generator;
mod request;
mod spec;

pub use generator::{Report, ReportGenerator, PLACEHOLDER_MESSAGE};
pub use request::{is_year_selector_disabled, ReportRequest, ReportType, YEARS};
pub use spec::{Category, ChartKind, ChartSpec};
#[cfg(test)]
pub use spec::DataPoint;
