//! Automobile Sales Statistics Dashboard
//!
//! Loads the historical automobile sales dataset and shows yearly or
//! recession-period reports as interactive charts.

mod charts;
mod config;
mod data;
mod gui;
mod logger;
mod report;

use anyhow::anyhow;
use config::AppConfig;
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use log::{error, info};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let _logger = logger::set_global_logger(&config)?;

    info!("Loading sales data from {}", config.source);
    let dataset = match DataLoader::load(&config.source) {
        Ok(dataset) => dataset,
        Err(e) => {
            error!("Failed to load dataset from {}: {}", config.source, e);
            return Err(e.into());
        }
    };
    if let Some((first, last)) = dataset.year_span() {
        info!("Dataset covers {}..={} ({} rows)", first, last, dataset.row_count());
    }

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("Automobile Sales Statistics Dashboard"),
        ..Default::default()
    };

    let source = config.source.to_string();
    let initial_request = config.initial_request;
    eframe::run_native(
        "Automobile Sales Statistics Dashboard",
        options,
        Box::new(move |cc| {
            Ok(Box::new(DashboardApp::new(
                cc,
                dataset,
                source,
                initial_request,
            )))
        }),
    )
    .map_err(|e| anyhow!("Dashboard window failed: {}", e))?;

    info!("Dashboard closed");
    Ok(())
}
