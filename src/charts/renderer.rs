//! Static Chart Renderer
//! Renders chart specifications to images with plotters.
//!
//! Layout:
//! 1. Title centered on top
//! 2. Line / bar charts: categorical x axis, value y axis, series legend
//! 3. Pie charts: slices with percentage labels

use super::layout::{self, CategoryAxis};
use crate::report::{ChartKind, ChartSpec};
use anyhow::anyhow;
use image::RgbImage;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::element::Pie;
use plotters::prelude::*;

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

const TEXT_COLOR: RGBColor = RGBColor(50, 50, 50);
const GRID_COLOR: RGBColor = RGBColor(220, 220, 220);

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart into an RGB image of the given size.
    pub fn render(spec: &ChartSpec, width: u32, height: u32) -> anyhow::Result<RgbImage> {
        let mut buffer = vec![0u8; (width as usize) * (height as usize) * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let area = root.titled(
                &spec.title,
                ("sans-serif", 26).into_font().color(&TEXT_COLOR),
            )?;

            if spec.is_empty() {
                Self::draw_empty(&area)?;
            } else {
                match spec.kind {
                    ChartKind::Line => Self::draw_line(&area, spec)?,
                    ChartKind::Bar => Self::draw_bars(&area, spec)?,
                    ChartKind::Pie => Self::draw_pie(&area, spec)?,
                }
            }

            root.present()?;
        }

        RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
            anyhow!(
                "[StaticChartRenderer->render] buffer does not match {}x{}",
                width,
                height
            )
        })
    }

    fn color(index: usize) -> RGBColor {
        let [r, g, b] = layout::palette_color(index);
        RGBColor(r, g, b)
    }

    fn draw_empty(area: &Area) -> anyhow::Result<()> {
        let (w, h) = area.dim_in_pixel();
        area.draw(&Text::new(
            "No data for this selection",
            ((w / 2) as i32 - 120, (h / 2) as i32),
            ("sans-serif", 22).into_font().color(&RGBColor(150, 150, 150)),
        ))?;
        Ok(())
    }

    fn draw_line(area: &Area, spec: &ChartSpec) -> anyhow::Result<()> {
        let axis = CategoryAxis::from_spec(spec);
        if axis.is_empty() {
            return Self::draw_empty(area);
        }
        let (y_min, y_max) = layout::value_range(spec, false);
        let x_max = axis.len() as f64 - 0.5;

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc(spec.x_label())
            .y_desc(spec.y_label())
            .x_labels(axis.len().min(12))
            .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
            .x_label_formatter(&|x| axis.label_at(*x))
            .draw()?;

        let series = spec.series();
        let names: Vec<Option<&str>> = if series.is_empty() {
            vec![None]
        } else {
            series.iter().map(|s| Some(s.as_str())).collect()
        };

        for (i, name) in names.iter().enumerate() {
            let color = Self::color(i);
            let points: Vec<(f64, f64)> = layout::line_points(spec, &axis, *name)
                .into_iter()
                .map(|[x, y]| (x, y))
                .collect();

            chart
                .draw_series(LineSeries::new(
                    points.clone(),
                    ShapeStyle::from(&color).stroke_width(3),
                ))?
                .label(name.unwrap_or(spec.y_label()))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(3))
                });

            chart.draw_series(
                points
                    .into_iter()
                    .map(|p| Circle::new(p, 4, color.filled())),
            )?;
        }

        if !series.is_empty() {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    fn draw_bars(area: &Area, spec: &ChartSpec) -> anyhow::Result<()> {
        let axis = CategoryAxis::from_spec(spec);
        if axis.is_empty() {
            return Self::draw_empty(area);
        }
        let (y_min, y_max) = layout::value_range(spec, true);
        let x_max = axis.len() as f64 - 0.5;
        let slots = layout::bar_slots(spec, &axis);
        let series = spec.series();

        let mut chart = ChartBuilder::on(area)
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(80)
            .build_cartesian_2d(-0.5f64..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(spec.x_label())
            .y_desc(spec.y_label())
            .x_labels(axis.len().min(16))
            .light_line_style(ShapeStyle::from(&GRID_COLOR).stroke_width(1))
            .x_label_formatter(&|x| axis.label_at(*x))
            .draw()?;

        for series_index in 0..series.len().max(1) {
            let color = Self::color(series_index);
            let annotation = chart.draw_series(
                slots
                    .iter()
                    .filter(|s| s.series_index == series_index)
                    .map(|s| {
                        let half = s.width / 2.0;
                        Rectangle::new(
                            [(s.center - half, 0.0), (s.center + half, s.value)],
                            color.filled(),
                        )
                    }),
            )?;

            if let Some(name) = series.get(series_index) {
                annotation.label(name.as_str()).legend(move |(x, y)| {
                    Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                });
            }
        }

        if !series.is_empty() {
            Self::draw_legend(&mut chart)?;
        }
        Ok(())
    }

    fn draw_legend<'a, 'b: 'a>(
        chart: &mut ChartContext<'a, BitMapBackend<'b>, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ) -> anyhow::Result<()> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&TEXT_COLOR)
            .label_font(("sans-serif", 14).into_font().color(&TEXT_COLOR))
            .draw()?;
        Ok(())
    }

    fn draw_pie(area: &Area, spec: &ChartSpec) -> anyhow::Result<()> {
        let slices = layout::pie_slices(spec);
        if slices.is_empty() {
            return Self::draw_empty(area);
        }

        let (w, h) = area.dim_in_pixel();
        let center = ((w / 2) as i32, (h / 2) as i32);
        let radius = w.min(h) as f64 * 0.35;

        let sizes: Vec<f64> = slices.iter().map(|s| s.value).collect();
        let colors: Vec<RGBColor> = (0..slices.len()).map(Self::color).collect();
        let labels: Vec<String> = slices.iter().map(|s| s.legend_label()).collect();

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.start_angle(-90.0);
        pie.label_style(("sans-serif", 16).into_font().color(&TEXT_COLOR));
        area.draw(&pie)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Category, DataPoint};

    fn grouped_bars() -> ChartSpec {
        let point = |rate: f64, series: &str, value: f64| DataPoint {
            category: Category::Number(rate),
            series: Some(series.to_string()),
            value,
        };
        ChartSpec::new(ChartKind::Bar, "Effect of Unemployment Rate", "Unemployment_Rate", "Automobile_Sales")
            .with_color("Vehicle_Type")
            .with_data(vec![
                point(3.1, "Sports", 20.0),
                point(7.2, "Sports", 50.0),
                point(7.2, "Executivecar", 10.0),
            ])
    }

    // Text drawing needs a system font; hosts without one report a font error.
    fn assert_rendered(result: anyhow::Result<RgbImage>, width: u32, height: u32) {
        match result {
            Ok(image) => {
                assert_eq!(image.dimensions(), (width, height));
                assert!(image.pixels().any(|p| p.0 != [255, 255, 255]));
            }
            Err(e) => assert!(
                format!("{:#}", e).to_lowercase().contains("font"),
                "unexpected render error: {:#}",
                e
            ),
        }
    }

    #[test]
    fn renders_grouped_bars_with_legend() {
        assert_rendered(StaticChartRenderer::render(&grouped_bars(), 640, 480), 640, 480);
    }

    #[test]
    fn renders_multi_series_line_and_pie() {
        let mut line = grouped_bars();
        line.kind = ChartKind::Line;
        assert_rendered(StaticChartRenderer::render(&line, 400, 300), 400, 300);

        let mut pie = grouped_bars();
        pie.kind = ChartKind::Pie;
        pie.color_field = None;
        assert_rendered(StaticChartRenderer::render(&pie, 400, 300), 400, 300);
    }
}
