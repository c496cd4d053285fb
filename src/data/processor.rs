//! Data Processor Module
//! Filtering and group-by aggregation over the sales dataset.

use super::dataset::SalesDataset;
use super::record::{RECESSION, YEAR};
use polars::prelude::*;

/// How the values of a group are reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    Mean,
    Sum,
}

impl Aggregation {
    fn expr(self, value_col: &str) -> Expr {
        match self {
            Aggregation::Mean => col(value_col).mean(),
            Aggregation::Sum => col(value_col).sum(),
        }
    }
}

/// Filtering and aggregation helpers. All operations are pure queries over
/// the immutable dataset.
pub struct DataProcessor;

impl DataProcessor {
    /// Every row of the dataset.
    pub fn all_rows(dataset: &SalesDataset) -> LazyFrame {
        dataset.lazy()
    }

    /// Rows flagged as recession periods.
    pub fn recession_rows(dataset: &SalesDataset) -> LazyFrame {
        dataset.lazy().filter(col(RECESSION))
    }

    /// Rows of a single year.
    pub fn rows_for_year(dataset: &SalesDataset, year: i32) -> LazyFrame {
        dataset.lazy().filter(col(YEAR).eq(lit(year)))
    }

    /// Group `rows` by `keys`, reduce `value_col` and sort ascending by the keys.
    ///
    /// Output columns: [keys..., value_col]. An empty input yields an empty frame.
    pub fn aggregate(
        rows: LazyFrame,
        keys: &[&str],
        value_col: &str,
        aggregation: Aggregation,
    ) -> PolarsResult<DataFrame> {
        let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();

        rows.group_by(key_exprs.clone())
            .agg([aggregation.expr(value_col)])
            .sort_by_exprs(key_exprs, SortMultipleOptions::default())
            .collect()
    }
}
