// Preview harness - Renders one payload at a given container size and prints the frame
use std::sync::Arc;

use anyhow::Context;
use dashboard_widgets::application::clock::SystemClock;
use dashboard_widgets::application::widget_service::Widget;
use dashboard_widgets::domain::series::WidgetKind;
use dashboard_widgets::infrastructure::config::load_widget_config;
use dashboard_widgets::infrastructure::glyph_measurer::GlyphMeasurer;
use dashboard_widgets::infrastructure::payload::read_input_file;
use dashboard_widgets::presentation::runtime::spawn_widget;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: dashboard-widgets <value|gauge> <payload.json> [width] [height]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let kind: WidgetKind = args.next().context(USAGE)?.parse()?;
    let payload_path = args.next().context(USAGE)?;
    let width: f64 = args.next().as_deref().unwrap_or("800").parse().context("invalid width")?;
    let height: f64 = args.next().as_deref().unwrap_or("480").parse().context("invalid height")?;

    // Load configuration
    let config = load_widget_config().context("failed to load widget config")?;
    let input = read_input_file(&payload_path)?;

    // Wire the widget
    let measurer = GlyphMeasurer::new(config.layout.clone(), config.gauge.clone());
    let widget = Widget::new(kind, config, Arc::new(SystemClock), Arc::new(measurer));
    let (handle, mut frames, task) = spawn_widget(widget);

    handle.resize(width, height).await?;
    handle.set_input(input).await?;
    drop(handle);

    let mut last = None;
    while let Some(frame) = frames.recv().await {
        last = Some(frame);
    }
    task.await.context("widget runtime panicked")?;

    let frame = last.context("widget produced no frame")?;
    println!("{}", serde_json::to_string_pretty(&frame)?);

    Ok(())
}
