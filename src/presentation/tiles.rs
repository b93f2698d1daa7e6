// Render-ready descriptors handed to the host renderer
use crate::domain::layout::FitResult;
use crate::domain::needle::Needle;
use crate::domain::series::{GaugeScale, SeriesKey, WidgetKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderFrame {
    pub kind: WidgetKind,
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub column_layout: bool,
    pub background: Option<String>,
    pub title_color: Option<String>,
    pub subtitle_color: Option<String>,
    /// Show the "No Data" placeholder instead of tiles
    pub no_data: bool,
    pub fit: FitResult,
    pub tiles: Vec<Tile>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Tile {
    Value(ValueTile),
    Gauge(GaugeTile),
}

impl Tile {
    pub fn label(&self) -> &str {
        match self {
            Tile::Value(tile) => &tile.label,
            Tile::Gauge(tile) => &tile.label,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoxStyle {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueTile {
    pub key: SeriesKey,
    pub label: String,
    /// Host-supplied ordering hint, carried through untouched
    pub order: f64,
    /// Empty when there is no current value
    pub value_text: String,
    pub unit: String,
    pub frame: BoxStyle,
    pub value_font_px: f64,
    pub label_font_px: f64,
    pub unit_font_px: f64,
    pub value_color: Option<String>,
    pub label_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeTile {
    pub key: SeriesKey,
    pub label: String,
    pub order: f64,
    pub value_text: String,
    pub unit: String,
    pub frame: BoxStyle,
    pub font_px: f64,
    pub spacer_px: f64,
    pub min_label: String,
    pub max_label: String,
    pub chart: DoughnutChart,
    /// Post-draw overlay; absent when there is no value to point at
    pub needle: Option<Needle>,
    pub value_color: Option<String>,
    pub label_color: Option<String>,
}

/// Declarative dataset for the chart backend: a half doughnut opening downwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoughnutChart {
    pub data: Vec<f64>,
    pub background_colors: Vec<String>,
    pub border_width: f64,
    pub rotation_deg: f64,
    pub circumference_deg: f64,
    pub cutout_percent: f64,
    pub aspect_ratio: f64,
}

impl DoughnutChart {
    pub fn half_circle(scale: &GaugeScale, background_colors: Vec<String>) -> Self {
        Self {
            data: scale.ranges().to_vec(),
            background_colors,
            border_width: 0.0,
            rotation_deg: -90.0,
            circumference_deg: 180.0,
            cutout_percent: 38.0,
            aspect_ratio: 2.0,
        }
    }
}
