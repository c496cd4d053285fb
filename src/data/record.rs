//! Sales Record Module
//! Canonical column names of the automobile sales dataset.

pub const YEAR: &str = "Year";
pub const MONTH: &str = "Month";
pub const RECESSION: &str = "Recession";
pub const VEHICLE_TYPE: &str = "Vehicle_Type";
pub const AUTOMOBILE_SALES: &str = "Automobile_Sales";
pub const ADVERTISING_EXPENDITURE: &str = "Advertising_Expenditure";
pub const UNEMPLOYMENT_RATE: &str = "Unemployment_Rate";

/// Columns every dataset must provide, in canonical order.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    YEAR,
    MONTH,
    RECESSION,
    VEHICLE_TYPE,
    AUTOMOBILE_SALES,
    ADVERTISING_EXPENDITURE,
    UNEMPLOYMENT_RATE,
];

/// One row of the dataset, used to build small in-memory datasets in tests.
#[cfg(test)]
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    pub year: i32,
    pub month: String,
    pub vehicle_type: String,
    pub automobile_sales: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    pub is_recession_period: bool,
}
