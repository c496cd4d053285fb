//! Report Generator Module
//! Turns a report request into the four chart specifications of the dashboard.

use super::request::{ReportRequest, ReportType};
use super::spec::{Category, ChartKind, ChartSpec, DataPoint};
use crate::data::record::*;
use crate::data::{Aggregation, DataProcessor, SalesDataset};
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

/// Shown until the selection is complete.
pub const PLACEHOLDER_MESSAGE: &str = "Please select a report type and year.";

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Outcome of a report request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Report {
    Charts([ChartSpec; 4]),
    Placeholder(String),
}

impl Report {
    pub fn charts(&self) -> Option<&[ChartSpec; 4]> {
        match self {
            Report::Charts(charts) => Some(charts),
            Report::Placeholder(_) => None,
        }
    }
}

/// Builds chart specifications from the immutable dataset. Stateless: the
/// same dataset and request always give the same report.
pub struct ReportGenerator;

impl ReportGenerator {
    pub fn generate(
        dataset: &SalesDataset,
        request: &ReportRequest,
    ) -> Result<Report, ReportError> {
        match (request.report_type, request.year) {
            (Some(ReportType::Recession), _) => Ok(Report::Charts(Self::recession(dataset)?)),
            (Some(ReportType::Yearly), Some(year)) => {
                Ok(Report::Charts(Self::yearly(dataset, year)?))
            }
            _ => Ok(Report::Placeholder(PLACEHOLDER_MESSAGE.to_string())),
        }
    }

    fn recession(dataset: &SalesDataset) -> Result<[ChartSpec; 4], ReportError> {
        let rows = || DataProcessor::recession_rows(dataset);

        let sales_by_year = ChartSpec::new(
            ChartKind::Line,
            "Average Automobile Sales Fluctuation over Recession Period",
            YEAR,
            AUTOMOBILE_SALES,
        )
        .with_data(Self::points(
            rows(),
            YEAR,
            None,
            AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?);

        let sales_by_vehicle = ChartSpec::new(
            ChartKind::Bar,
            "Average Number of Vehicles Sold by Vehicle Type",
            VEHICLE_TYPE,
            AUTOMOBILE_SALES,
        )
        .with_data(Self::points(
            rows(),
            VEHICLE_TYPE,
            None,
            AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?);

        let expenditure_share = ChartSpec::new(
            ChartKind::Pie,
            "Expenditure Share by Vehicle Type During Recessions",
            VEHICLE_TYPE,
            ADVERTISING_EXPENDITURE,
        )
        .with_data(Self::points(
            rows(),
            VEHICLE_TYPE,
            None,
            ADVERTISING_EXPENDITURE,
            Aggregation::Sum,
        )?);

        let unemployment_effect = ChartSpec::new(
            ChartKind::Bar,
            "Effect of Unemployment Rate on Vehicle Type and Sales",
            UNEMPLOYMENT_RATE,
            AUTOMOBILE_SALES,
        )
        .with_color(VEHICLE_TYPE)
        .with_label(UNEMPLOYMENT_RATE, "Unemployment Rate")
        .with_label(AUTOMOBILE_SALES, "Average Automobile Sales")
        .with_data(Self::points(
            rows(),
            UNEMPLOYMENT_RATE,
            Some(VEHICLE_TYPE),
            AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?);

        Ok([
            sales_by_year,
            sales_by_vehicle,
            expenditure_share,
            unemployment_effect,
        ])
    }

    /// Charts 1 and 2 cover the whole dataset to show the long-term trend;
    /// charts 3 and 4 only the selected year.
    fn yearly(dataset: &SalesDataset, year: i32) -> Result<[ChartSpec; 4], ReportError> {
        let whole = || DataProcessor::all_rows(dataset);
        let selected = || DataProcessor::rows_for_year(dataset, year);

        let yearly_sales = ChartSpec::new(
            ChartKind::Line,
            "Yearly Automobile Sales",
            YEAR,
            AUTOMOBILE_SALES,
        )
        .with_data(Self::points(
            whole(),
            YEAR,
            None,
            AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?);

        let monthly_sales = ChartSpec::new(
            ChartKind::Line,
            "Total Monthly Automobile Sales",
            MONTH,
            AUTOMOBILE_SALES,
        )
        .with_data(Self::points(
            whole(),
            MONTH,
            None,
            AUTOMOBILE_SALES,
            Aggregation::Sum,
        )?);

        let selected_year_sales = ChartSpec::new(
            ChartKind::Bar,
            format!("Average Vehicles Sold in the Year {}", year),
            YEAR,
            AUTOMOBILE_SALES,
        )
        .with_data(Self::points(
            selected(),
            YEAR,
            None,
            AUTOMOBILE_SALES,
            Aggregation::Mean,
        )?);

        let expenditure = ChartSpec::new(
            ChartKind::Pie,
            "Total Advertisement Expenditure for Each Vehicle",
            VEHICLE_TYPE,
            ADVERTISING_EXPENDITURE,
        )
        .with_data(Self::points(
            selected(),
            VEHICLE_TYPE,
            None,
            ADVERTISING_EXPENDITURE,
            Aggregation::Sum,
        )?);

        Ok([yearly_sales, monthly_sales, selected_year_sales, expenditure])
    }

    /// Aggregate `value` by `key` (and `series`, when set) and convert the
    /// result into data points. Groups with a null key or a null aggregate
    /// are skipped.
    fn points(
        rows: LazyFrame,
        key: &str,
        series: Option<&str>,
        value: &str,
        aggregation: Aggregation,
    ) -> Result<Vec<DataPoint>, ReportError> {
        // Series first so the output is ordered by (series, key)
        let keys: Vec<&str> = series.into_iter().chain(std::iter::once(key)).collect();
        let df = DataProcessor::aggregate(rows, &keys, value, aggregation)?;

        let key_col = df.column(key)?;
        let series_col = series.map(|s| df.column(s)).transpose()?;
        let values = df.column(value)?.cast(&DataType::Float64)?;
        let values = values.f64()?;

        let mut points = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(category) = Self::category(key_col.get(i)?) else {
                continue;
            };
            let series = match &series_col {
                Some(c) => match Self::category(c.get(i)?) {
                    Some(s) => Some(s.to_string()),
                    None => continue,
                },
                None => None,
            };
            let Some(value) = values.get(i) else {
                continue;
            };
            points.push(DataPoint {
                category,
                series,
                value,
            });
        }

        Ok(points)
    }

    fn category(value: AnyValue) -> Option<Category> {
        match value {
            AnyValue::Null => None,
            AnyValue::Int8(v) => Some(Category::Integer(v as i64)),
            AnyValue::Int16(v) => Some(Category::Integer(v as i64)),
            AnyValue::Int32(v) => Some(Category::Integer(v as i64)),
            AnyValue::Int64(v) => Some(Category::Integer(v)),
            AnyValue::UInt8(v) => Some(Category::Integer(v as i64)),
            AnyValue::UInt16(v) => Some(Category::Integer(v as i64)),
            AnyValue::UInt32(v) => Some(Category::Integer(v as i64)),
            AnyValue::Float32(v) => Some(Category::Number(v as f64)),
            AnyValue::Float64(v) => Some(Category::Number(v)),
            AnyValue::String(s) => Some(Category::Label(s.to_string())),
            AnyValue::StringOwned(s) => Some(Category::Label(s.to_string())),
            other => Some(Category::Label(other.to_string().trim_matches('"').to_string())),
        }
    }
}
