//! Data module - CSV loading and processing

mod dataset;
mod loader;
mod processor;
pub mod record;

pub use dataset::SalesDataset;
pub use loader::{DataLoader, DataSource};
pub use processor::{Aggregation, DataProcessor};
#[cfg(test)]
pub use record::SalesRecord;
