//! Sales Dataset Module
//! Immutable, normalized view over the loaded sales table.

use super::record::*;
use polars::prelude::*;

/// The full dataset with canonical column names and types.
///
/// Built once (by the loader or from records) and only read afterwards.
/// Every query clones the frame lazily, which is cheap for polars since
/// columns are reference counted.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    df: DataFrame,
}

impl SalesDataset {
    /// Normalize a raw frame: resolve the required columns case-insensitively,
    /// cast them to canonical types and drop everything else.
    ///
    /// Fails on the first required column that is missing, or on a column
    /// holding empty or non-numeric cells.
    pub fn from_dataframe(raw: DataFrame) -> Result<Self, NormalizeError> {
        let available: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut exprs: Vec<Expr> = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for canonical in REQUIRED_COLUMNS {
            let actual = available
                .iter()
                .find(|name| name.trim().eq_ignore_ascii_case(canonical))
                .ok_or_else(|| NormalizeError::MissingColumn(canonical.to_string()))?;

            let expr = match canonical {
                YEAR => col(actual.as_str()).cast(DataType::Int32),
                RECESSION => col(actual.as_str()).cast(DataType::Int32).eq(lit(1)),
                MONTH | VEHICLE_TYPE => col(actual.as_str()).cast(DataType::String),
                _ => col(actual.as_str()).cast(DataType::Float64),
            };
            exprs.push(expr.alias(canonical));
        }

        let df = raw.lazy().select(exprs).collect()?;

        // Empty or unparsable cells come out of the casts as nulls
        for column in df.get_columns() {
            let count = column.null_count();
            if count > 0 {
                return Err(NormalizeError::InvalidValues {
                    column: column.name().to_string(),
                    count,
                });
            }
        }

        Ok(Self { df })
    }

    /// Lazy handle over the full table for query building.
    pub fn lazy(&self) -> LazyFrame {
        self.df.clone().lazy()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Smallest and largest year present, if any rows are loaded.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let years = self.df.column(YEAR).ok()?.i32().ok()?;
        Some((years.min()?, years.max()?))
    }
}

/// Typed-row construction and readback used by the unit tests.
#[cfg(test)]
impl SalesDataset {
    /// Build a dataset from typed rows.
    pub fn from_records(records: &[SalesRecord]) -> Result<Self, NormalizeError> {
        let df = DataFrame::new(vec![
            Column::new(
                YEAR.into(),
                records.iter().map(|r| r.year).collect::<Vec<i32>>(),
            ),
            Column::new(
                MONTH.into(),
                records.iter().map(|r| r.month.clone()).collect::<Vec<String>>(),
            ),
            Column::new(
                RECESSION.into(),
                records
                    .iter()
                    .map(|r| r.is_recession_period)
                    .collect::<Vec<bool>>(),
            ),
            Column::new(
                VEHICLE_TYPE.into(),
                records
                    .iter()
                    .map(|r| r.vehicle_type.clone())
                    .collect::<Vec<String>>(),
            ),
            Column::new(
                AUTOMOBILE_SALES.into(),
                records
                    .iter()
                    .map(|r| r.automobile_sales)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                ADVERTISING_EXPENDITURE.into(),
                records
                    .iter()
                    .map(|r| r.advertising_expenditure)
                    .collect::<Vec<f64>>(),
            ),
            Column::new(
                UNEMPLOYMENT_RATE.into(),
                records
                    .iter()
                    .map(|r| r.unemployment_rate)
                    .collect::<Vec<f64>>(),
            ),
        ])?;

        Self::from_dataframe(df)
    }

    /// Materialize the table back into typed rows.
    pub fn records(&self) -> PolarsResult<Vec<SalesRecord>> {
        let years = self.df.column(YEAR)?.i32()?;
        let months = self.df.column(MONTH)?.str()?;
        let recession = self.df.column(RECESSION)?.bool()?;
        let vehicle_types = self.df.column(VEHICLE_TYPE)?.str()?;
        let sales = self.df.column(AUTOMOBILE_SALES)?.f64()?;
        let advertising = self.df.column(ADVERTISING_EXPENDITURE)?.f64()?;
        let unemployment = self.df.column(UNEMPLOYMENT_RATE)?.f64()?;

        let records = (0..self.df.height())
            .filter_map(|i| {
                Some(SalesRecord {
                    year: years.get(i)?,
                    month: months.get(i)?.to_string(),
                    vehicle_type: vehicle_types.get(i)?.to_string(),
                    automobile_sales: sales.get(i)?,
                    advertising_expenditure: advertising.get(i)?,
                    unemployment_rate: unemployment.get(i)?,
                    is_recession_period: recession.get(i)?,
                })
            })
            .collect();

        Ok(records)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum NormalizeError {
    #[error("Missing required column: {0}")]
    MissingColumn(String),
    #[error("Column {column} has {count} empty or invalid values")]
    InvalidValues { column: String, count: usize },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, month: &str, recession: bool, sales: f64) -> SalesRecord {
        SalesRecord {
            year,
            month: month.to_string(),
            vehicle_type: "Supperminicar".to_string(),
            automobile_sales: sales,
            advertising_expenditure: 1000.0,
            unemployment_rate: 5.5,
            is_recession_period: recession,
        }
    }

    #[test]
    fn from_records_keeps_rows_in_order() {
        let rows = vec![
            record(1980, "Jan", true, 10.0),
            record(1981, "Feb", false, 30.0),
        ];
        let ds = SalesDataset::from_records(&rows).unwrap();

        assert_eq!(ds.row_count(), 2);
        assert_eq!(ds.records().unwrap(), rows);
        assert_eq!(ds.year_span(), Some((1980, 1981)));
    }

    #[test]
    fn empty_dataset_has_no_year_span() {
        let ds = SalesDataset::from_records(&[]).unwrap();
        assert_eq!(ds.row_count(), 0);
        assert_eq!(ds.year_span(), None);
    }

    #[test]
    fn normalize_resolves_columns_case_insensitively_and_drops_extras() {
        let raw = DataFrame::new(vec![
            Column::new("Date".into(), vec!["1/31/1980"]),
            Column::new("Year".into(), vec![1980i64]),
            Column::new("Month".into(), vec!["Jan"]),
            Column::new("Recession".into(), vec![1i64]),
            Column::new("GDP".into(), vec![60.2]),
            Column::new("unemployment_rate".into(), vec![5.4]),
            Column::new("Automobile_Sales".into(), vec![456i64]),
            Column::new("Advertising_Expenditure".into(), vec![1558i64]),
            Column::new("Vehicle_Type".into(), vec!["Mediumfamilycar"]),
        ])
        .unwrap();

        let ds = SalesDataset::from_dataframe(raw).unwrap();
        let records = ds.records().unwrap();

        assert_eq!(
            records,
            vec![SalesRecord {
                year: 1980,
                month: "Jan".to_string(),
                vehicle_type: "Mediumfamilycar".to_string(),
                automobile_sales: 456.0,
                advertising_expenditure: 1558.0,
                unemployment_rate: 5.4,
                is_recession_period: true,
            }]
        );
    }

    #[test]
    fn normalize_rejects_unparsable_sales() {
        let raw = DataFrame::new(vec![
            Column::new("Year".into(), vec![1980i64, 1981]),
            Column::new("Month".into(), vec!["Jan", "Jan"]),
            Column::new("Recession".into(), vec![1i64, 1]),
            Column::new("Vehicle_Type".into(), vec!["Sports", "Sports"]),
            Column::new("Automobile_Sales".into(), vec!["n/a", "30"]),
            Column::new("Advertising_Expenditure".into(), vec![100.0, 200.0]),
            Column::new("Unemployment_Rate".into(), vec![5.0, 6.0]),
        ])
        .unwrap();

        match SalesDataset::from_dataframe(raw) {
            Err(NormalizeError::InvalidValues { column, count }) => {
                assert_eq!(column, AUTOMOBILE_SALES);
                assert_eq!(count, 1);
            }
            other => panic!("expected invalid values, got {:?}", other.map(|d| d.row_count())),
        }
    }

    #[test]
    fn normalize_reports_missing_column() {
        let raw = DataFrame::new(vec![
            Column::new("Year".into(), vec![1980i64]),
            Column::new("Month".into(), vec!["Jan"]),
        ])
        .unwrap();

        match SalesDataset::from_dataframe(raw) {
            Err(NormalizeError::MissingColumn(name)) => assert_eq!(name, RECESSION),
            other => panic!("expected missing column, got {:?}", other),
        }
    }
}
