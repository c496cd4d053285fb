//! CSV Data Loader Module
//! Fetches the sales CSV from a URL or a local file and parses it with Polars.

use super::dataset::{NormalizeError, SalesDataset};
use log::info;
use polars::prelude::*;
use std::fmt;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to download dataset: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Invalid dataset: {0}")]
    SchemaError(#[from] NormalizeError),
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// `http://` and `https://` locations are URLs, anything else a path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        let lower = location.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            DataSource::Url(location.to_string())
        } else {
            DataSource::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => write!(f, "{}", url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Loads the sales dataset once at startup.
pub struct DataLoader;

impl DataLoader {
    /// Read and normalize the dataset from `source`.
    pub fn load(source: &DataSource) -> Result<SalesDataset, LoadError> {
        let raw = match source {
            DataSource::Url(url) => Self::read_url(url)?,
            DataSource::File(path) => Self::read_file(path)?,
        };

        info!(
            "Read {} rows, {} columns from {}",
            raw.height(),
            raw.width(),
            source
        );

        Ok(SalesDataset::from_dataframe(raw)?)
    }

    fn read_url(url: &str) -> Result<DataFrame, LoadError> {
        info!("Downloading dataset from {}", url);

        let bytes = reqwest::blocking::Client::new()
            .get(url)
            .send()?
            .error_for_status()?
            .bytes()?;

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;

        Ok(df)
    }

    fn read_file(path: &Path) -> Result<DataFrame, LoadError> {
        info!("Reading dataset from {}", path.display());

        // Use lazy evaluation for memory efficiency, then collect
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        Ok(df)
    }
}
