//! Chart Viewer Widget
//! Right side scrollable panel showing the four charts of a report in a 2x2 grid.

use crate::charts::ChartPlotter;
use crate::report::{ChartKind, ChartSpec, Report, PLACEHOLDER_MESSAGE};
use egui::{Color32, RichText, ScrollArea};

/// Chart card configuration
const CHART_SPACING: f32 = 15.0;
const CHART_HEIGHT: f32 = 320.0;

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    pub report: Option<Report>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_report(&mut self, report: Report) {
        self.report = Some(report);
    }

    /// Replace whatever is on screen with a failure message.
    pub fn set_failure(&mut self, message: String) {
        self.report = Some(Report::Placeholder(message));
    }

    /// Charts currently on screen, if the report is complete.
    pub fn charts(&self) -> Option<&[ChartSpec; 4]> {
        self.report.as_ref().and_then(|r| r.charts())
    }

    /// Draw the chart viewer
    pub fn show(&self, ui: &mut egui::Ui) {
        match &self.report {
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(PLACEHOLDER_MESSAGE).size(20.0));
                });
            }
            Some(Report::Placeholder(message)) => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new(message).size(20.0));
                });
            }
            Some(Report::Charts(charts)) => {
                ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        // Two rows of two charts
                        for (row, pair) in charts.chunks(2).enumerate() {
                            ui.columns(2, |columns| {
                                for (col, spec) in pair.iter().enumerate() {
                                    Self::draw_chart_card(&mut columns[col], spec, row * 2 + col);
                                }
                            });
                            ui.add_space(CHART_SPACING);
                        }
                    });
            }
        }
    }

    /// Draw a single chart card
    fn draw_chart_card(ui: &mut egui::Ui, spec: &ChartSpec, id: usize) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_gray(90)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&spec.title).size(16.0).strong());
                    if spec.kind == ChartKind::Pie && !spec.is_empty() {
                        ui.label(
                            RichText::new(format!("Total: {:.0}", spec.total()))
                                .size(11.0)
                                .color(Color32::GRAY),
                        );
                    }
                    ui.add_space(8.0);
                    ChartPlotter::draw_chart(ui, spec, id, CHART_HEIGHT);
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ChartKind;

    #[test]
    fn failure_replaces_charts_on_screen() {
        let chart = |title: &str| ChartSpec::new(ChartKind::Line, title, "Year", "Automobile_Sales");
        let mut viewer = ChartViewer::new();
        viewer.set_report(Report::Charts([chart("a"), chart("b"), chart("c"), chart("d")]));
        assert!(viewer.charts().is_some());

        viewer.set_failure("Report failed: boom".to_string());
        assert!(viewer.charts().is_none());
        assert_eq!(
            viewer.report,
            Some(Report::Placeholder("Report failed: boom".to_string()))
        );
    }
}
