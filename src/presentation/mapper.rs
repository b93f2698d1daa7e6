// Mapper to convert widget state into a render frame
use crate::application::widget_service::Widget;
use crate::domain::layout::{FitResult, TileSize};
use crate::domain::needle::Needle;
use crate::domain::series::{DisplaySeries, GaugeStyle};
use crate::domain::theme::ThemeColors;
use crate::infrastructure::config::WidgetConfig;
use crate::presentation::tiles::{
    BoxStyle, DoughnutChart, GaugeTile, RenderFrame, Tile, ValueTile,
};

pub fn render_frame(widget: &Widget) -> RenderFrame {
    let theme = widget.theme();
    let fit = widget.fit();

    let tiles: Vec<Tile> = widget
        .series()
        .render_order()
        .into_iter()
        .map(|series| match &series.gauge {
            Some(gauge) => Tile::Gauge(gauge_tile(series, gauge, fit, widget.config(), theme)),
            None => Tile::Value(value_tile(series, fit, widget.config(), theme)),
        })
        .collect();

    RenderFrame {
        kind: widget.kind(),
        title: widget.header().title.clone(),
        sub_title: widget.header().sub_title.clone(),
        column_layout: widget.header().column_layout,
        background: theme.background.clone(),
        title_color: theme.title.clone(),
        subtitle_color: theme.subtitle_color().map(str::to_string),
        no_data: tiles.is_empty(),
        fit,
        tiles,
    }
}

fn value_tile(
    series: &DisplaySeries,
    fit: FitResult,
    config: &WidgetConfig,
    theme: &ThemeColors,
) -> ValueTile {
    let m = fit.scale;
    let value_color = theme.value_color(&series.styling);

    ValueTile {
        key: series.key.clone(),
        label: series.label.clone(),
        order: series.order,
        value_text: series.formatted_value(),
        unit: series.unit.clone(),
        frame: BoxStyle {
            width: fit.tile_width,
            height: fit.tile_height,
            padding: config.layout.tile_padding_px * m,
        },
        value_font_px: config.layout.value_font_px * m,
        label_font_px: config.layout.label_font_px * m,
        unit_font_px: config.layout.label_font_px * m,
        label_color: theme.label_color(&series.styling),
        value_color,
    }
}

fn gauge_tile(
    series: &DisplaySeries,
    gauge: &GaugeStyle,
    fit: FitResult,
    config: &WidgetConfig,
    theme: &ThemeColors,
) -> GaugeTile {
    let width = fit.tile_width;
    let canvas = TileSize::new(width, width / 2.0);
    let needle_color = gauge
        .needle_color
        .as_deref()
        .unwrap_or(config.gauge.needle_color.as_str());

    GaugeTile {
        key: series.key.clone(),
        label: series.label.clone(),
        order: series.order,
        value_text: series.formatted_value(),
        unit: series.unit.clone(),
        frame: BoxStyle {
            width,
            height: fit.tile_height,
            padding: 0.0,
        },
        font_px: width * config.gauge.value_font_ratio,
        spacer_px: width * config.gauge.spacer_ratio,
        min_label: gauge.scale.min().to_string(),
        max_label: gauge.scale.max().to_string(),
        chart: DoughnutChart::half_circle(&gauge.scale, gauge.background_colors.clone()),
        needle: series
            .needle_value
            .map(|value| Needle::new(value, &gauge.scale, canvas, needle_color)),
        value_color: theme.value_color(&series.styling),
        label_color: theme.label_color(&series.styling),
    }
}
