//! Dashboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::ReportExporter;
use crate::data::SalesDataset;
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::report::{ReportGenerator, ReportRequest};
use egui::SidePanel;
use log::{error, info};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};
use std::thread;

/// Export result from background thread
enum ExportResult {
    Complete(Vec<PathBuf>),
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    dataset: SalesDataset,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Request behind the report on screen
    current_request: Option<ReportRequest>,

    // Async export
    export_rx: Option<Receiver<ExportResult>>,
    is_exporting: bool,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        dataset: SalesDataset,
        source: String,
        initial_request: ReportRequest,
    ) -> Self {
        let summary = format!("{} rows from {}", dataset.row_count(), source);
        let mut app = Self {
            dataset,
            control_panel: ControlPanel::new(summary, initial_request),
            chart_viewer: ChartViewer::new(),
            current_request: None,
            export_rx: None,
            is_exporting: false,
        };
        app.refresh_report();
        app
    }

    /// Regenerate the report when the selection differs from the one on screen
    fn refresh_report(&mut self) {
        let request = self.control_panel.request();
        if self.current_request == Some(request) {
            return;
        }
        self.current_request = Some(request);

        match ReportGenerator::generate(&self.dataset, &request) {
            Ok(report) => {
                info!(
                    "Generated report: type={:?}, year={:?}, complete={}",
                    request.report_type,
                    request.year,
                    request.is_complete()
                );
                self.control_panel.export_enabled = report.charts().is_some();
                self.chart_viewer.set_report(report);
            }
            Err(e) => {
                error!("Report generation failed for {:?}: {}", request, e);
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
                self.chart_viewer.set_failure(format!("Report failed: {}", e));
            }
        }
    }

    /// Handle PNG export - pick a folder and render in background
    fn handle_export(&mut self) {
        if self.is_exporting {
            return;
        }

        let (Some(request), Some(charts)) = (self.current_request, self.chart_viewer.charts())
        else {
            self.control_panel.set_status("No charts to export");
            return;
        };
        let charts = charts.clone();

        let Some(directory) = rfd::FileDialog::new().pick_folder() else {
            return; // User cancelled
        };

        self.control_panel.set_status("Exporting charts...");
        self.is_exporting = true;

        let (tx, rx) = channel();
        self.export_rx = Some(rx);

        thread::spawn(move || {
            let result = match ReportExporter::export(&request, &charts, &directory) {
                Ok(files) => ExportResult::Complete(files),
                Err(e) => ExportResult::Error(format!("{:#}", e)),
            };
            let _ = tx.send(result);
        });
    }

    /// Check for export results
    fn check_export_results(&mut self) {
        let rx = self.export_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    ExportResult::Complete(files) => {
                        let directory = files
                            .first()
                            .and_then(|f| f.parent())
                            .map(|d| d.display().to_string())
                            .unwrap_or_default();
                        self.control_panel.set_status(&format!(
                            "Exported {} files to {}",
                            files.len(),
                            directory
                        ));
                        self.is_exporting = false;
                        should_keep_receiver = false;
                    }
                    ExportResult::Error(e) => {
                        error!("Export failed: {}", e);
                        self.control_panel.set_status(&format!("Error: {}", e));
                        self.is_exporting = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.export_rx = Some(rx);
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_export_results();

        // Request repaint while exporting
        if self.is_exporting {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(320.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::SelectionChanged => self.refresh_report(),
                        ControlPanelAction::ExportPng => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
