// Tile measurement from font metrics instead of a hidden sizing render
use crate::application::tile_measurer::TileMeasurer;
use crate::domain::layout::TileSize;
use crate::domain::series::{DisplayCollection, DisplaySeries, WidgetKind};
use crate::infrastructure::config::{GaugeConfig, LayoutConfig};

#[derive(Debug, Clone)]
pub struct GlyphMeasurer {
    layout: LayoutConfig,
    gauge: GaugeConfig,
}

impl GlyphMeasurer {
    pub fn new(layout: LayoutConfig, gauge: GaugeConfig) -> Self {
        Self { layout, gauge }
    }

    fn text_width(&self, text: &str, font_px: f64) -> f64 {
        text.chars().count() as f64 * font_px * self.layout.glyph_width_ratio
    }

    /// Label line above a value line; the unit trails the value at label size.
    fn value_tile(&self, series: &DisplaySeries) -> TileSize {
        let padding = self.layout.tile_padding_px * 2.0;
        let label = self.text_width(&series.label, self.layout.label_font_px);

        let mut value_line = self.text_width(&series.formatted_value(), self.layout.value_font_px);
        if !series.unit.is_empty() {
            value_line += self.text_width(&format!(" {}", series.unit), self.layout.label_font_px);
        }

        TileSize::new(
            label.max(value_line) + padding,
            (self.layout.label_font_px + self.layout.value_font_px) * self.layout.line_height + padding,
        )
    }

    /// Half-doughnut chart with a spacer above and below, then the value line.
    fn gauge_tile(&self) -> TileSize {
        let width = self.gauge.reference_width_px;
        let spacer = width * self.gauge.spacer_ratio;
        let text = width * self.gauge.value_font_ratio * self.layout.line_height;

        TileSize::new(width, width / 2.0 + spacer * 2.0 + text)
    }
}

impl TileMeasurer for GlyphMeasurer {
    fn measure(&self, kind: WidgetKind, series: &DisplayCollection) -> TileSize {
        if series.is_empty() {
            return TileSize::default();
        }

        match kind {
            WidgetKind::Gauge => self.gauge_tile(),
            WidgetKind::Value => series
                .iter()
                .map(|s| self.value_tile(s))
                .fold(TileSize::default(), |largest, tile| {
                    TileSize::new(largest.width.max(tile.width), largest.height.max(tile.height))
                }),
        }
    }
}
