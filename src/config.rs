//! Configuration Module
//! Reads dashboard settings from the environment (optionally via `.env`).

use crate::data::DataSource;
use crate::report::ReportRequest;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_SOURCE: &str = "https://cf-courses-data.s3.us.cloud-object-storage.appdomain.cloud/IBMDeveloperSkillsNetwork-DV0101EN-SkillsNetwork/Data%20Files/historical_automobile_sales.csv";
pub const DEFAULT_LOG_SPEC: &str = "info";
pub const DEFAULT_LOG_DIR: &str = "logs";

const SOURCE_KEY: &str = "AUTO_SALES_SOURCE";
const LOG_SPEC_KEY: &str = "AUTO_SALES_LOG";
const LOG_DIR_KEY: &str = "AUTO_SALES_LOG_DIR";
const REPORT_KEY: &str = "AUTO_SALES_REPORT";
const YEAR_KEY: &str = "AUTO_SALES_YEAR";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("'{0}' must not be empty")]
    EmptyValue(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub source: DataSource,
    pub log_spec: String,
    pub log_dir: PathBuf,
    /// Dropdown selection shown at startup. Unknown values leave it unset.
    pub initial_request: ReportRequest,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset keys use defaults; keys
    /// set to blank strings are rejected.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |key: &'static str, default: &str| -> Result<String, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
                Some(v) => Ok(v.trim().to_string()),
                None => Ok(default.to_string()),
            }
        };

        let optional = |key: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(key) {
                Some(v) if v.trim().is_empty() => Err(ConfigError::EmptyValue(key)),
                other => Ok(other),
            }
        };
        let report = optional(REPORT_KEY)?;
        let year = optional(YEAR_KEY)?;

        Ok(Self {
            source: DataSource::parse(&value(SOURCE_KEY, DEFAULT_SOURCE)?),
            log_spec: value(LOG_SPEC_KEY, DEFAULT_LOG_SPEC)?,
            log_dir: PathBuf::from(value(LOG_DIR_KEY, DEFAULT_LOG_DIR)?),
            initial_request: ReportRequest::from_selection(report.as_deref(), year.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_public_dataset() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.source, DataSource::Url(DEFAULT_SOURCE.to_string()));
        assert_eq!(config.log_spec, "info");
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.initial_request, ReportRequest::default());
    }

    #[test]
    fn overrides_are_applied() {
        let config = AppConfig::from_lookup(lookup(&[
            ("AUTO_SALES_SOURCE", "./data/sales.csv"),
            ("AUTO_SALES_LOG", "debug"),
            ("AUTO_SALES_LOG_DIR", "/tmp/dashboard"),
        ]))
        .unwrap();

        assert_eq!(config.source, DataSource::File(PathBuf::from("./data/sales.csv")));
        assert_eq!(config.log_spec, "debug");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/dashboard"));
    }

    #[test]
    fn initial_selection_follows_dropdown_labels() {
        let config = AppConfig::from_lookup(lookup(&[
            ("AUTO_SALES_REPORT", "Yearly Statistics"),
            ("AUTO_SALES_YEAR", "1995"),
        ]))
        .unwrap();
        assert_eq!(config.initial_request, ReportRequest::yearly(1995));

        let config = AppConfig::from_lookup(lookup(&[
            ("AUTO_SALES_REPORT", "Select Statistics"),
            ("AUTO_SALES_YEAR", "Select-year"),
        ]))
        .unwrap();
        assert_eq!(config.initial_request, ReportRequest::default());
    }

    #[test]
    fn blank_values_are_rejected() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("AUTO_SALES_SOURCE", "  ")])),
            Err(ConfigError::EmptyValue("AUTO_SALES_SOURCE"))
        );
    }
}
