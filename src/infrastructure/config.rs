use crate::domain::error::WidgetError;
use crate::domain::theme::ThemeColors;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WidgetConfig {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub gauge: GaugeConfig,
    #[serde(default)]
    pub theme: ThemeColors,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LayoutConfig {
    /// Gap between tiles, in px
    pub gap_px: f64,
    pub tile_padding_px: f64,
    pub value_font_px: f64,
    pub label_font_px: f64,
    pub line_height: f64,
    /// Average glyph advance as a fraction of the font size
    pub glyph_width_ratio: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap_px: 12.0,
            tile_padding_px: 6.0,
            value_font_px: 32.0,
            label_font_px: 26.0,
            line_height: 0.9,
            glyph_width_ratio: 0.6,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GaugeConfig {
    pub default_sections: Vec<f64>,
    pub reference_width_px: f64,
    pub needle_color: String,
    pub band_colors: Vec<String>,
    /// Label and value font size as a fraction of the tile width
    pub value_font_ratio: f64,
    /// Spacer height as a fraction of the tile width
    pub spacer_ratio: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self {
            default_sections: vec![0.0, 100.0],
            reference_width_px: 200.0,
            needle_color: "#000000".to_string(),
            band_colors: vec![
                "#4caf50".to_string(),
                "#ffc107".to_string(),
                "#f44336".to_string(),
            ],
            value_font_ratio: 0.06,
            spacer_ratio: 0.08,
        }
    }
}

/// Keys that accept comma-separated values from the environment.
const LIST_KEYS: [&str; 3] = ["gauge.default_sections", "gauge.band_colors", "theme.palette"];

/// `config/widget.(toml|json|yaml)` when present, overridden by `WIDGET__*` variables.
pub fn load_widget_config() -> Result<WidgetConfig, WidgetError> {
    load_with_environment(environment())
}

/// `WIDGET__GAUGE__BAND_COLORS=red,amber` style overrides.
fn environment() -> config::Environment {
    LIST_KEYS.iter().fold(
        config::Environment::with_prefix("WIDGET")
            .separator("__")
            .try_parsing(true)
            .list_separator(","),
        |env, key| env.with_list_parse_key(*key),
    )
}

fn load_with_environment(environment: config::Environment) -> Result<WidgetConfig, WidgetError> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widget").required(false))
        .add_source(environment)
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_widget_config(toml: &str) -> Result<WidgetConfig, WidgetError> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}
