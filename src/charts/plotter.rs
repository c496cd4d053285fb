//! Chart Plotter Module
//! Draws chart specifications as interactive egui_plot charts.

use super::layout::{self, CategoryAxis};
use crate::report::{ChartKind, ChartSpec};
use egui::{Color32, RichText, Stroke};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points, Polygon};

/// Largest angle of a single pie polygon; egui only fills convex shapes.
const MAX_WEDGE_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Creates dashboard charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Get color for a series.
    pub fn series_color(index: usize) -> Color32 {
        let [r, g, b] = layout::palette_color(index);
        Color32::from_rgb(r, g, b)
    }

    /// Draw a chart of any kind. `id` must be unique among visible charts.
    pub fn draw_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: usize, height: f32) {
        if spec.is_empty() {
            ui.allocate_ui(egui::vec2(ui.available_width(), height), |ui| {
                ui.centered_and_justified(|ui| {
                    ui.label(
                        RichText::new("No data for this selection")
                            .size(14.0)
                            .color(Color32::GRAY),
                    );
                });
            });
            return;
        }

        match spec.kind {
            ChartKind::Line => Self::draw_line_chart(ui, spec, id, height),
            ChartKind::Bar => Self::draw_bar_chart(ui, spec, id, height),
            ChartKind::Pie => Self::draw_pie_chart(ui, spec, id, height),
        }
    }

    fn draw_line_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: usize, height: f32) {
        let axis = CategoryAxis::from_spec(spec);
        let series = spec.series();

        // Categorical x axis with one label per category position
        let labels = axis.clone();
        Plot::new(format!("chart_{}", id))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(spec.x_label().to_string())
            .y_axis_label(spec.y_label().to_string())
            .x_axis_formatter(move |mark, _range| labels.label_at(mark.value))
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                let names: Vec<Option<&str>> = if series.is_empty() {
                    vec![None]
                } else {
                    series.iter().map(|s| Some(s.as_str())).collect()
                };

                for (i, name) in names.into_iter().enumerate() {
                    let color = Self::series_color(i);
                    let points = layout::line_points(spec, &axis, name);
                    let legend = name.unwrap_or(spec.y_label()).to_string();

                    plot_ui.line(
                        Line::new(PlotPoints::from(points.clone()))
                            .color(color)
                            .width(2.0)
                            .name(&legend),
                    );
                    plot_ui.points(
                        Points::new(PlotPoints::from(points))
                            .radius(3.0)
                            .color(color)
                            .name(&legend),
                    );
                }
            });
    }

    fn draw_bar_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: usize, height: f32) {
        let axis = CategoryAxis::from_spec(spec);
        let series = spec.series();
        let slots = layout::bar_slots(spec, &axis);

        let labels = axis.clone();
        Plot::new(format!("chart_{}", id))
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(spec.x_label().to_string())
            .y_axis_label(spec.y_label().to_string())
            .x_axis_formatter(move |mark, _range| labels.label_at(mark.value))
            .legend(Legend::default())
            .include_y(0.0)
            .show(ui, |plot_ui| {
                let n_series = series.len().max(1);
                for series_index in 0..n_series {
                    let color = Self::series_color(series_index);
                    let bars: Vec<Bar> = slots
                        .iter()
                        .filter(|s| s.series_index == series_index)
                        .map(|s| Bar::new(s.center, s.value).width(s.width).fill(color))
                        .collect();

                    let name = series
                        .get(series_index)
                        .map(|s| s.as_str())
                        .unwrap_or(spec.y_label())
                        .to_string();

                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(name));
                }
            });
    }

    fn draw_pie_chart(ui: &mut egui::Ui, spec: &ChartSpec, id: usize, height: f32) {
        let slices = layout::pie_slices(spec);

        Plot::new(format!("chart_{}", id))
            .height(height)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .include_x(-1.1)
            .include_x(1.1)
            .include_y(-1.1)
            .include_y(1.1)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (i, slice) in slices.iter().enumerate() {
                    let color = Self::series_color(i);
                    let name = slice.legend_label();

                    // Wedges share a name so the legend shows one entry per slice
                    for wedge in slice.wedges([0.0, 0.0], 1.0, MAX_WEDGE_ANGLE) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(wedge))
                                .fill_color(color)
                                .stroke(Stroke::new(1.0, color))
                                .name(&name),
                        );
                    }
                }
            });
    }
}
