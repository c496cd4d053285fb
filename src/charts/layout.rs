//! Chart Layout Module
//! Backend-independent geometry shared by the interactive and static renderers.

use crate::report::{Category, ChartSpec};

/// Series colors (RGB)
pub const PALETTE: [[u8; 3]; 10] = [
    [52, 152, 219],  // Blue
    [231, 76, 60],   // Red
    [46, 204, 113],  // Green
    [155, 89, 182],  // Purple
    [243, 156, 18],  // Orange
    [26, 188, 156],  // Teal
    [233, 30, 99],   // Pink
    [0, 188, 212],   // Cyan
    [255, 87, 34],   // Deep Orange
    [96, 125, 139],  // Blue Grey
];

/// Total width of a category slot shared by its bars.
const SLOT_WIDTH: f64 = 0.8;

pub fn palette_color(index: usize) -> [u8; 3] {
    PALETTE[index % PALETTE.len()]
}

/// Categorical x axis: each distinct category sits at an integer position.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryAxis {
    categories: Vec<Category>,
}

impl CategoryAxis {
    pub fn from_spec(spec: &ChartSpec) -> Self {
        Self {
            categories: spec.categories(),
        }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn position(&self, category: &Category) -> Option<usize> {
        self.categories.iter().position(|c| c == category)
    }

    /// Label for an axis value; only exact integer positions get one.
    pub fn label_at(&self, value: f64) -> String {
        let rounded = value.round();
        if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
            return String::new();
        }
        self.categories
            .get(rounded as usize)
            .map(|c| c.to_string())
            .unwrap_or_default()
    }
}

/// Line points of one series, ordered along the axis.
pub fn line_points(spec: &ChartSpec, axis: &CategoryAxis, series: Option<&str>) -> Vec<[f64; 2]> {
    let mut points: Vec<[f64; 2]> = spec
        .points_of(series)
        .filter_map(|p| axis.position(&p.category).map(|x| [x as f64, p.value]))
        .collect();
    points.sort_by(|a, b| a[0].total_cmp(&b[0]));
    points
}

/// One rectangle of a (possibly grouped) bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSlot {
    pub series_index: usize,
    pub center: f64,
    pub width: f64,
    pub value: f64,
}

/// Bars side by side within each category slot, one column per series.
pub fn bar_slots(spec: &ChartSpec, axis: &CategoryAxis) -> Vec<BarSlot> {
    let series = spec.series();
    let n_series = series.len().max(1);
    let width = SLOT_WIDTH / n_series as f64;

    spec.data
        .iter()
        .filter_map(|p| {
            let position = axis.position(&p.category)? as f64;
            let series_index = match &p.series {
                Some(name) => series.iter().position(|s| s == name)?,
                None => 0,
            };
            let center = position - SLOT_WIDTH / 2.0 + width * (series_index as f64 + 0.5);
            Some(BarSlot {
                series_index,
                center,
                width,
                value: p.value,
            })
        })
        .collect()
}

/// A pie slice; angles in radians, counter-clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    pub share: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn legend_label(&self) -> String {
        format!("{} ({:.1}%)", self.label, self.share * 100.0)
    }

    /// Outline of the slice split into convex wedges of at most `max_step`
    /// radians, each starting at the center.
    pub fn wedges(&self, center: [f64; 2], radius: f64, max_step: f64) -> Vec<Vec<[f64; 2]>> {
        let sweep = self.end_angle - self.start_angle;
        let n_wedges = (sweep / max_step - 1e-9).ceil().max(1.0) as usize;
        let wedge_sweep = sweep / n_wedges as f64;
        let arc_steps = 8;

        (0..n_wedges)
            .map(|w| {
                let start = self.start_angle + wedge_sweep * w as f64;
                let mut outline = vec![center];
                for step in 0..=arc_steps {
                    let angle = start + wedge_sweep * step as f64 / arc_steps as f64;
                    outline.push([
                        center[0] - radius * angle.sin(),
                        center[1] + radius * angle.cos(),
                    ]);
                }
                outline
            })
            .collect()
    }
}

/// Slices in data order. Non-positive values have no area and are skipped.
pub fn pie_slices(spec: &ChartSpec) -> Vec<PieSlice> {
    let total: f64 = spec.data.iter().map(|p| p.value).filter(|v| *v > 0.0).sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    spec.data
        .iter()
        .filter(|p| p.value > 0.0)
        .map(|p| {
            let share = p.value / total;
            let sweep = share * std::f64::consts::TAU;
            let slice = PieSlice {
                label: p.category.to_string(),
                value: p.value,
                share,
                start_angle: angle,
                end_angle: angle + sweep,
            };
            angle += sweep;
            slice
        })
        .collect()
}

/// Y range with 10% padding. Bars always include zero.
pub fn value_range(spec: &ChartSpec, include_zero: bool) -> (f64, f64) {
    let values = spec.data.iter().map(|p| p.value).filter(|v| v.is_finite());
    let (mut min, mut max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min.is_infinite() {
        return (0.0, 100.0);
    }
    if include_zero {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    let padding = ((max - min) * 0.1).max(1.0);
    let lower = if include_zero && min >= 0.0 { 0.0 } else { min - padding };
    (lower, max + padding)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ChartKind, DataPoint};

    fn point(category: Category, series: Option<&str>, value: f64) -> DataPoint {
        DataPoint {
            category,
            series: series.map(|s| s.to_string()),
            value,
        }
    }

    #[test]
    fn axis_labels_only_at_integer_positions() {
        let spec = ChartSpec::new(ChartKind::Line, "t", "Month", "Automobile_Sales").with_data(vec![
            point(Category::Label("Jan".into()), None, 1.0),
            point(Category::Label("Feb".into()), None, 2.0),
        ]);
        let axis = CategoryAxis::from_spec(&spec);

        assert_eq!(axis.len(), 2);
        assert_eq!(axis.label_at(0.0), "Feb");
        assert_eq!(axis.label_at(1.0), "Jan");
        assert_eq!(axis.label_at(0.5), "");
        assert_eq!(axis.label_at(-1.0), "");
        assert_eq!(axis.label_at(7.0), "");
        assert_eq!(line_points(&spec, &axis, None), vec![[0.0, 2.0], [1.0, 1.0]]);
    }

    #[test]
    fn grouped_bars_share_the_category_slot() {
        let spec = ChartSpec::new(ChartKind::Bar, "t", "Unemployment_Rate", "Automobile_Sales")
            .with_color("Vehicle_Type")
            .with_data(vec![
                point(Category::Number(3.1), Some("Executivecar"), 10.0),
                point(Category::Number(3.1), Some("Sports"), 20.0),
                point(Category::Number(7.2), Some("Sports"), 30.0),
            ]);
        let axis = CategoryAxis::from_spec(&spec);
        let slots = bar_slots(&spec, &axis);

        assert_eq!(slots.len(), 3);
        assert!((slots[0].width - 0.4).abs() < 1e-12);
        assert!((slots[0].center - -0.2).abs() < 1e-12);
        assert!((slots[1].center - 0.2).abs() < 1e-12);
        assert_eq!(slots[2].series_index, 1);
        assert!((slots[2].center - 1.2).abs() < 1e-12);
    }

    #[test]
    fn pie_slices_cover_the_full_circle() {
        let spec = ChartSpec::new(ChartKind::Pie, "t", "Vehicle_Type", "Advertising_Expenditure")
            .with_data(vec![
                point(Category::Label("A".into()), None, 100.0),
                point(Category::Label("B".into()), None, 0.0),
                point(Category::Label("C".into()), None, 300.0),
            ]);
        let slices = pie_slices(&spec);

        assert_eq!(slices.len(), 2);
        assert!((slices[0].share - 0.25).abs() < 1e-12);
        assert_eq!(slices[1].legend_label(), "C (75.0%)");
        assert!((slices[1].end_angle - std::f64::consts::TAU).abs() < 1e-9);

        // 270 degrees cannot be one convex wedge
        let wedges = slices[1].wedges([0.0, 0.0], 1.0, std::f64::consts::FRAC_PI_2);
        assert_eq!(wedges.len(), 3);
        assert!(wedges.iter().all(|w| w[0] == [0.0, 0.0]));
    }

    #[test]
    fn value_range_pads_and_anchors_bars_at_zero() {
        let spec = ChartSpec::new(ChartKind::Bar, "t", "x", "y").with_data(vec![
            point(Category::Integer(1980), None, 100.0),
            point(Category::Integer(1981), None, 200.0),
        ]);

        assert_eq!(value_range(&spec, true), (0.0, 220.0));
        assert_eq!(value_range(&spec, false), (90.0, 210.0));
        assert_eq!(
            value_range(&ChartSpec::new(ChartKind::Line, "t", "x", "y"), false),
            (0.0, 100.0)
        );
    }
}
