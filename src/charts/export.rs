//! Report Export Module
//! Writes the four charts of a report as PNG files plus a JSON description.

use super::StaticChartRenderer;
use crate::report::{ChartSpec, ReportRequest};
use anyhow::Context;
use log::info;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPORT_WIDTH: u32 = 1200;
pub const EXPORT_HEIGHT: u32 = 800;
pub const REPORT_JSON: &str = "report.json";

#[derive(Serialize)]
struct ExportedReport<'a> {
    request: &'a ReportRequest,
    charts: &'a [ChartSpec; 4],
}

/// Exports chart specifications to a directory.
pub struct ReportExporter;

impl ReportExporter {
    /// Render all charts in parallel and write them next to `report.json`.
    /// Returns the written files, JSON first.
    pub fn export(
        request: &ReportRequest,
        charts: &[ChartSpec; 4],
        directory: &Path,
    ) -> anyhow::Result<Vec<PathBuf>> {
        fs::create_dir_all(directory).with_context(|| {
            format!(
                "[ReportExporter->export] cannot create {}",
                directory.display()
            )
        })?;

        let mut files = vec![Self::write_json(request, charts, directory)?];

        let images: Vec<PathBuf> = charts
            .par_iter()
            .enumerate()
            .map(|(i, spec)| {
                let path = directory.join(Self::file_name(i, spec));
                StaticChartRenderer::render(spec, EXPORT_WIDTH, EXPORT_HEIGHT)
                    .and_then(|image| Ok(image.save(&path)?))
                    .with_context(|| {
                        format!("[ReportExporter->export] failed to write {}", path.display())
                    })?;
                Ok(path)
            })
            .collect::<anyhow::Result<Vec<PathBuf>>>()?;

        files.extend(images);
        info!(
            "Exported {} files to {}",
            files.len(),
            directory.display()
        );
        Ok(files)
    }

    /// JSON description of the request and its charts.
    pub fn write_json(
        request: &ReportRequest,
        charts: &[ChartSpec; 4],
        directory: &Path,
    ) -> anyhow::Result<PathBuf> {
        let path = directory.join(REPORT_JSON);
        let json = serde_json::to_string_pretty(&ExportedReport { request, charts })?;
        fs::write(&path, json)
            .with_context(|| format!("[ReportExporter->write_json] failed to write {}", path.display()))?;
        Ok(path)
    }

    /// `chart_<n>_<title slug>.png`, numbered from 1.
    pub fn file_name(index: usize, spec: &ChartSpec) -> String {
        let mut slug = String::new();
        for c in spec.title.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('_') {
                slug.push('_');
            }
        }
        let slug = slug.trim_end_matches('_');
        format!("chart_{}_{}.png", index + 1, slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{SalesDataset, SalesRecord};
    use crate::report::{ChartKind, ReportGenerator};

    #[test]
    fn file_names_are_numbered_slugs() {
        let spec = ChartSpec::new(
            ChartKind::Bar,
            "Average Vehicles Sold in the Year 1980",
            "Year",
            "Automobile_Sales",
        );
        assert_eq!(
            ReportExporter::file_name(2, &spec),
            "chart_3_average_vehicles_sold_in_the_year_1980.png"
        );
    }

    #[test]
    fn json_describes_request_and_charts() {
        let ds = SalesDataset::from_records(&[SalesRecord {
            year: 1980,
            month: "Jan".to_string(),
            vehicle_type: "Sports".to_string(),
            automobile_sales: 10.0,
            advertising_expenditure: 100.0,
            unemployment_rate: 6.0,
            is_recession_period: true,
        }])
        .unwrap();
        let request = ReportRequest::recession();
        let report = ReportGenerator::generate(&ds, &request).unwrap();

        let dir = std::env::temp_dir().join(format!("auto_sales_export_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = ReportExporter::write_json(&request, report.charts().unwrap(), &dir).unwrap();

        let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(json["request"]["report_type"], "Recession Period Statistics");
        assert_eq!(json["charts"].as_array().unwrap().len(), 4);
        assert_eq!(json["charts"][0]["data"][0]["category"], 1980);
        assert_eq!(json["charts"][0]["data"][0]["value"], 10.0);
    }
}
