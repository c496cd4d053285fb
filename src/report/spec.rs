//! Chart Specification Module
//! Renderer-independent description of a chart: kind, field mapping, title and data.

use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// Group key of a data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Category {
    Integer(i64),
    Number(f64),
    Label(String),
}

impl Category {
    /// Numeric categories sort before labels; numbers compare by value.
    pub fn compare(&self, other: &Category) -> Ordering {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.to_string().cmp(&other.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Category::Integer(v) => Some(*v as f64),
            Category::Number(v) => Some(*v),
            Category::Label(_) => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Integer(v) => write!(f, "{}", v),
            Category::Number(v) => write!(f, "{}", v),
            Category::Label(s) => write!(f, "{}", s),
        }
    }
}

/// A single aggregated value. `series` is set for color-split charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    pub value: f64,
}

/// Abstract chart handed to a rendering layer.
///
/// For pie charts `x_field` names the slice labels and `y_field` the slice values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub x_field: String,
    pub y_field: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_field: Option<String>,
    pub axis_labels: BTreeMap<String, String>,
    pub data: Vec<DataPoint>,
}

impl ChartSpec {
    pub fn new(kind: ChartKind, title: impl Into<String>, x_field: &str, y_field: &str) -> Self {
        Self {
            kind,
            title: title.into(),
            x_field: x_field.to_string(),
            y_field: y_field.to_string(),
            color_field: None,
            axis_labels: BTreeMap::new(),
            data: Vec::new(),
        }
    }

    pub fn with_color(mut self, field: &str) -> Self {
        self.color_field = Some(field.to_string());
        self
    }

    pub fn with_label(mut self, field: &str, label: &str) -> Self {
        self.axis_labels.insert(field.to_string(), label.to_string());
        self
    }

    pub fn with_data(mut self, data: Vec<DataPoint>) -> Self {
        self.data = data;
        self
    }

    /// Display label of a field, falling back to the field name.
    pub fn label_for<'a>(&'a self, field: &'a str) -> &'a str {
        self.axis_labels
            .get(field)
            .map(|s| s.as_str())
            .unwrap_or(field)
    }

    pub fn x_label(&self) -> &str {
        self.label_for(&self.x_field)
    }

    pub fn y_label(&self) -> &str {
        self.label_for(&self.y_field)
    }

    /// Distinct categories, sorted.
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = Vec::new();
        for point in &self.data {
            if !categories.contains(&point.category) {
                categories.push(point.category.clone());
            }
        }
        categories.sort_by(|a, b| a.compare(b));
        categories
    }

    /// Distinct series names in order of first appearance. Empty for
    /// single-series charts.
    pub fn series(&self) -> Vec<String> {
        let mut series: Vec<String> = Vec::new();
        for name in self.data.iter().filter_map(|p| p.series.as_ref()) {
            if !series.contains(name) {
                series.push(name.clone());
            }
        }
        series
    }

    /// Points of one series (or all points when `series` is None).
    pub fn points_of<'a>(&'a self, series: Option<&'a str>) -> impl Iterator<Item = &'a DataPoint> {
        self.data
            .iter()
            .filter(move |p| series.is_none() || p.series.as_deref() == series)
    }

    /// Total of all values; used for pie shares.
    pub fn total(&self) -> f64 {
        self.data.iter().map(|p| p.value).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(category: Category, series: Option<&str>, value: f64) -> DataPoint {
        DataPoint {
            category,
            series: series.map(|s| s.to_string()),
            value,
        }
    }

    #[test]
    fn categories_are_distinct_and_sorted_numerically() {
        let spec = ChartSpec::new(ChartKind::Bar, "t", "x", "y").with_data(vec![
            point(Category::Number(10.5), Some("A"), 1.0),
            point(Category::Number(2.5), Some("A"), 2.0),
            point(Category::Number(10.5), Some("B"), 3.0),
        ]);

        assert_eq!(
            spec.categories(),
            vec![Category::Number(2.5), Category::Number(10.5)]
        );
        assert_eq!(spec.series(), vec!["A".to_string(), "B".to_string()]);
        assert_eq!(spec.points_of(Some("B")).count(), 1);
        assert_eq!(spec.points_of(None).count(), 3);
    }

    #[test]
    fn label_falls_back_to_field_name() {
        let spec = ChartSpec::new(ChartKind::Line, "t", "Year", "Automobile_Sales")
            .with_label("Automobile_Sales", "Average Automobile Sales");

        assert_eq!(spec.x_label(), "Year");
        assert_eq!(spec.y_label(), "Average Automobile Sales");
    }

    #[test]
    fn serializes_categories_untagged() {
        let spec = ChartSpec::new(ChartKind::Pie, "Share", "Vehicle_Type", "Advertising_Expenditure")
            .with_data(vec![point(Category::Label("Sports".into()), None, 4.0)]);

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["kind"], "Pie");
        assert_eq!(json["data"][0]["category"], "Sports");
        assert!(json["data"][0].get("series").is_none());
    }
}
