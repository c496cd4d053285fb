//! Control Panel Widget
//! Left side panel with the report type and year selectors.

use crate::report::{is_year_selector_disabled, ReportRequest, ReportType, YEARS};
use egui::{Color32, ComboBox, RichText};

/// Left side control panel with the dropdown selectors and export controls.
pub struct ControlPanel {
    pub report_type: Option<ReportType>,
    pub year: Option<i32>,
    pub dataset_summary: String,
    pub export_enabled: bool,
    pub status: String,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            report_type: None,
            year: None,
            dataset_summary: String::new(),
            export_enabled: false,
            status: "Ready".to_string(),
        }
    }
}

impl ControlPanel {
    pub fn new(dataset_summary: String, initial: ReportRequest) -> Self {
        Self {
            report_type: initial.report_type,
            year: initial.year,
            dataset_summary,
            ..Self::default()
        }
    }

    /// Current selection as a report request
    pub fn request(&self) -> ReportRequest {
        ReportRequest::new(self.report_type, self.year)
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Automobile Sales Statistics Dashboard")
                    .size(20.0)
                    .color(Color32::from_rgb(80, 61, 54)),
            );
            ui.label(
                RichText::new(&self.dataset_summary)
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Report Selection Section =====
        ui.label(RichText::new("📊 Report").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 190.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Statistics:"));
            ComboBox::from_id_salt("dropdown_statistics")
                .width(combo_width)
                .selected_text(
                    self.report_type
                        .map(|t| t.label())
                        .unwrap_or("Select a report type"),
                )
                .show_ui(ui, |ui| {
                    for report_type in ReportType::ALL {
                        if ui
                            .selectable_label(
                                self.report_type == Some(report_type),
                                report_type.label(),
                            )
                            .clicked()
                        {
                            self.report_type = Some(report_type);
                            action = ControlPanelAction::SelectionChanged;
                        }
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Select Year:"));
            ui.add_enabled_ui(!is_year_selector_disabled(self.report_type), |ui| {
                ComboBox::from_id_salt("select_year")
                    .width(combo_width)
                    .selected_text(
                        self.year
                            .map(|y| y.to_string())
                            .unwrap_or_else(|| "Select-year".to_string()),
                    )
                    .show_ui(ui, |ui| {
                        for year in YEARS {
                            if ui
                                .selectable_label(self.year == Some(year), year.to_string())
                                .clicked()
                            {
                                self.year = Some(year);
                                action = ControlPanelAction::SelectionChanged;
                            }
                        }
                    });
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("🖼 Export PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportPng;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    ExportPng,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_mirrors_selection() {
        let mut panel = ControlPanel::new("3 rows".to_string(), ReportRequest::default());
        assert_eq!(panel.request(), ReportRequest::default());

        panel.report_type = Some(ReportType::Yearly);
        panel.year = Some(1995);
        assert_eq!(panel.request(), ReportRequest::yearly(1995));
        assert_eq!(panel.status, "Ready");
    }

    #[test]
    fn starts_from_initial_selection() {
        let panel = ControlPanel::new(String::new(), ReportRequest::recession());
        assert_eq!(panel.report_type, Some(ReportType::Recession));
        assert!(is_year_selector_disabled(panel.report_type));
    }
}
