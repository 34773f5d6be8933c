use crate::domain::entities::series::Series;

const PALETTE: [&str; 8] = [
    "rgba(63, 81, 181, 0.6)",
    "rgba(244, 67, 54, 0.6)",
    "rgba(76, 175, 80, 0.6)",
    "rgba(255, 152, 0, 0.6)",
    "rgba(156, 39, 176, 0.6)",
    "rgba(0, 150, 136, 0.6)",
    "rgba(121, 85, 72, 0.6)",
    "rgba(96, 125, 139, 0.6)",
];

pub const CHART_WIDTH: f64 = 960.0;
pub const CHART_HEIGHT: f64 = 320.0;
pub const AXIS_MARGIN: f64 = 40.0;

/// A bar ready to be drawn, in SVG user units.
#[derive(Debug, Clone, PartialEq)]
pub struct BarRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub color: &'static str,
    pub title: String,
}

pub fn dataset_color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

/// Lays out grouped bars: one group per label, one bar per dataset.
pub fn layout_bars(series: &Series, width: f64, height: f64) -> Vec<BarRect> {
    let groups = series.labels.len();
    let per_group = series.datasets.len();
    if groups == 0 || per_group == 0 {
        return Vec::new();
    }

    let plot_width = (width - AXIS_MARGIN).max(1.0);
    let plot_height = (height - AXIS_MARGIN).max(1.0);
    let max = series.max_value();
    let scale = if max > 0.0 { plot_height / max } else { 0.0 };
    let group_width = plot_width / groups as f64;
    let bar_width = group_width * 0.8 / per_group as f64;

    let mut bars = Vec::with_capacity(groups * per_group);
    for (dataset_idx, dataset) in series.datasets.iter().enumerate() {
        for (label_idx, label) in series.labels.iter().enumerate() {
            let value = dataset.data.get(label_idx).copied().unwrap_or(0.0).max(0.0);
            let bar_height = value * scale;
            bars.push(BarRect {
                x: AXIS_MARGIN
                    + label_idx as f64 * group_width
                    + group_width * 0.1
                    + dataset_idx as f64 * bar_width,
                y: plot_height - bar_height,
                width: bar_width,
                height: bar_height,
                color: dataset_color(dataset_idx),
                title: format!("{label} / {}: {value}", dataset.label),
            });
        }
    }
    bars
}
