//! Report Request Module
//! Report type selector, request value and the year selector rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Years offered by the year selector.
pub const YEARS: RangeInclusive<i32> = 1980..=2023;

/// Top-level report selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportType {
    #[serde(rename = "Yearly Statistics")]
    Yearly,
    #[serde(rename = "Recession Period Statistics")]
    Recession,
}

impl ReportType {
    pub const ALL: [ReportType; 2] = [ReportType::Yearly, ReportType::Recession];

    pub fn label(self) -> &'static str {
        match self {
            ReportType::Yearly => "Yearly Statistics",
            ReportType::Recession => "Recession Period Statistics",
        }
    }
}

impl fmt::Display for ReportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportType {
    type Err = UnknownReportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ReportType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(s))
            .or_else(|| match s.to_ascii_lowercase().as_str() {
                "yearly" => Some(ReportType::Yearly),
                "recession" => Some(ReportType::Recession),
                _ => None,
            })
            .ok_or_else(|| UnknownReportType(s.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("Unknown report type: {0}")]
pub struct UnknownReportType(pub String);

/// Current dropdown selection. Built fresh on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    pub report_type: Option<ReportType>,
    pub year: Option<i32>,
}

impl ReportRequest {
    pub fn new(report_type: Option<ReportType>, year: Option<i32>) -> Self {
        Self { report_type, year }
    }

    /// Build a request from raw dropdown values. Unknown report types and
    /// unparsable years count as unset.
    pub fn from_selection(report_type: Option<&str>, year: Option<&str>) -> Self {
        Self {
            report_type: report_type.and_then(|s| s.parse().ok()),
            year: year.and_then(|s| s.trim().parse().ok()),
        }
    }

    /// Selection is complete when a report type is set and, for yearly
    /// reports, a year as well.
    pub fn is_complete(&self) -> bool {
        match self.report_type {
            Some(ReportType::Recession) => true,
            Some(ReportType::Yearly) => self.year.is_some(),
            None => false,
        }
    }
}

#[cfg(test)]
impl ReportRequest {
    pub fn recession() -> Self {
        Self::new(Some(ReportType::Recession), None)
    }

    pub fn yearly(year: i32) -> Self {
        Self::new(Some(ReportType::Yearly), Some(year))
    }
}

/// The year selector only applies to yearly reports.
pub fn is_year_selector_disabled(report_type: Option<ReportType>) -> bool {
    report_type != Some(ReportType::Yearly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_selector_enabled_only_for_yearly() {
        assert!(!is_year_selector_disabled(Some(ReportType::Yearly)));
        assert!(is_year_selector_disabled(Some(ReportType::Recession)));
        assert!(is_year_selector_disabled(None));
    }

    #[test]
    fn year_selector_rule_from_dropdown_labels() {
        let disabled = |label: Option<&str>| {
            is_year_selector_disabled(ReportRequest::from_selection(label, None).report_type)
        };
        assert!(!disabled(Some("Yearly Statistics")));
        assert!(disabled(Some("Recession Period Statistics")));
        assert!(disabled(Some("Select Statistics")));
        assert!(disabled(None));
    }

    #[test]
    fn parses_labels_and_short_names() {
        assert_eq!("Yearly Statistics".parse::<ReportType>(), Ok(ReportType::Yearly));
        assert_eq!("recession".parse::<ReportType>(), Ok(ReportType::Recession));
        assert_eq!(
            "Select Statistics".parse::<ReportType>(),
            Err(UnknownReportType("Select Statistics".to_string()))
        );
    }

    #[test]
    fn selection_completeness() {
        assert!(ReportRequest::recession().is_complete());
        assert!(ReportRequest::yearly(1990).is_complete());
        assert!(!ReportRequest::new(Some(ReportType::Yearly), None).is_complete());
        assert!(!ReportRequest::default().is_complete());
        assert_eq!(
            ReportRequest::from_selection(Some("Yearly Statistics"), Some("Select-year")),
            ReportRequest::new(Some(ReportType::Yearly), None)
        );
    }

    #[test]
    fn year_range_matches_dropdown() {
        assert_eq!(YEARS.clone().count(), 44);
        assert!(YEARS.contains(&1980) && YEARS.contains(&2023));
    }
}
