// Widget service - One widget instance, from payload to fitted display state
use crate::application::clock::Clock;
use crate::application::grid_fit::GridFitSolver;
use crate::application::series_transformer::SeriesTransformer;
use crate::application::tile_measurer::TileMeasurer;
use crate::domain::input::InputData;
use crate::domain::layout::{Container, FitResult, TileSize};
use crate::domain::series::{DisplayCollection, WidgetKind};
use crate::domain::theme::ThemeColors;
use crate::infrastructure::config::WidgetConfig;
use std::sync::Arc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    pub title: Option<String>,
    pub sub_title: Option<String>,
    pub column_layout: bool,
}

impl Header {
    fn from_input(input: &InputData) -> Self {
        Self {
            title: input.title().map(str::to_string),
            sub_title: input.sub_title().map(str::to_string),
            column_layout: input.settings.column_layout,
        }
    }
}

/// State owned by a single widget. Every mutation happens through `&mut self`,
/// so one owner (the runtime task) serialises input, resize and theme updates.
pub struct Widget {
    kind: WidgetKind,
    config: WidgetConfig,
    transformer: SeriesTransformer,
    solver: GridFitSolver,
    measurer: Arc<dyn TileMeasurer>,
    header: Header,
    series: DisplayCollection,
    reference: TileSize,
    container: Option<Container>,
    fit: FitResult,
    theme: ThemeColors,
}

impl Widget {
    pub fn new(
        kind: WidgetKind,
        config: WidgetConfig,
        clock: Arc<dyn Clock>,
        measurer: Arc<dyn TileMeasurer>,
    ) -> Self {
        Self {
            kind,
            transformer: SeriesTransformer::new(kind, clock, config.gauge.clone()),
            solver: GridFitSolver::new(config.layout.gap_px),
            measurer,
            header: Header::default(),
            series: DisplayCollection::new(),
            reference: TileSize::default(),
            container: None,
            fit: FitResult::unscaled(0, TileSize::default()),
            theme: config.theme.clone(),
            config,
        }
    }

    /// Replaces the derived state with the one built from `input`, then
    /// re-lays out for the new tile count. `None` clears the widget.
    pub fn apply_input(&mut self, input: Option<&InputData>) -> &DisplayCollection {
        match input {
            Some(input) => {
                self.header = Header::from_input(input);
                self.series = self.transformer.transform(input);
            }
            None => {
                self.header = Header::default();
                self.series = DisplayCollection::new();
            }
        }

        if self.reference.is_zero() {
            self.reference = self.measurer.measure(self.kind, &self.series);
            tracing::debug!(
                "Measured reference tile {}x{}",
                self.reference.width,
                self.reference.height
            );
        }

        self.refit();
        &self.series
    }

    pub fn resize(&mut self, container: Container) -> FitResult {
        self.container = Some(container);
        self.refit()
    }

    pub fn set_theme(&mut self, theme: ThemeColors) {
        self.theme = theme;
    }

    fn refit(&mut self) -> FitResult {
        let container = self.container.unwrap_or_default();
        self.fit = self.solver.solve(self.series.len(), self.reference, container);
        self.fit
    }

    pub fn kind(&self) -> WidgetKind {
        self.kind
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn series(&self) -> &DisplayCollection {
        &self.series
    }

    pub fn reference(&self) -> TileSize {
        self.reference
    }

    pub fn fit(&self) -> FitResult {
        self.fit
    }

    pub fn theme(&self) -> &ThemeColors {
        &self.theme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::clock::FixedClock;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingMeasurer {
        calls: AtomicUsize,
        size: TileSize,
    }

    impl TileMeasurer for CountingMeasurer {
        fn measure(&self, _kind: WidgetKind, series: &DisplayCollection) -> TileSize {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if series.is_empty() {
                TileSize::default()
            } else {
                self.size
            }
        }
    }

    fn widget(measurer: Arc<CountingMeasurer>) -> Widget {
        Widget::new(
            WidgetKind::Value,
            WidgetConfig::default(),
            Arc::new(FixedClock(Utc::now())),
            measurer,
        )
    }

    fn measurer() -> Arc<CountingMeasurer> {
        Arc::new(CountingMeasurer {
            calls: AtomicUsize::new(0),
            size: TileSize::new(100.0, 50.0),
        })
    }

    fn payload(labels: &[&str]) -> InputData {
        let dataseries: Vec<serde_json::Value> = labels
            .iter()
            .map(|label| serde_json::json!({"label": label, "data": [{"value": 1}]}))
            .collect();
        serde_json::from_value(serde_json::json!({
            "settings": {"title": "Plant", "columnLayout": true},
            "dataseries": dataseries
        }))
        .unwrap()
    }

    #[test]
    fn test_reference_is_measured_once() {
        let measurer = measurer();
        let mut widget = widget(measurer.clone());

        widget.apply_input(Some(&payload(&["a"])));
        widget.apply_input(Some(&payload(&["a", "b"])));

        assert_eq!(measurer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(widget.reference(), TileSize::new(100.0, 50.0));
        assert_eq!(widget.series().len(), 2);
        assert_eq!(widget.header().title.as_deref(), Some("Plant"));
        assert!(widget.header().column_layout);
    }

    #[test]
    fn test_zero_reference_is_measured_again() {
        let measurer = measurer();
        let mut widget = widget(measurer.clone());

        widget.apply_input(Some(&payload(&[])));
        assert!(widget.reference().is_zero());

        widget.apply_input(Some(&payload(&["a"])));
        assert_eq!(measurer.calls.load(Ordering::SeqCst), 2);
        assert!(!widget.reference().is_zero());
    }

    #[test]
    fn test_resize_and_new_input_refit() {
        let mut widget = widget(measurer());
        widget.apply_input(Some(&payload(&["a"])));
        assert_eq!(widget.fit().scale, 1.0);

        let fit = widget.resize(Container::new(400.0, 400.0));
        assert_eq!(fit.scale, 4.0);

        widget.apply_input(Some(&payload(&["a", "b"])));
        assert!(widget.fit().columns * widget.fit().rows >= 2);
        assert!(widget.fit().scale < 4.0);
    }

    #[test]
    fn test_missing_input_clears_state() {
        let mut widget = widget(measurer());
        widget.apply_input(Some(&payload(&["a"])));
        widget.apply_input(None);

        assert!(widget.series().is_empty());
        assert_eq!(widget.header(), &Header::default());
        assert_eq!(widget.fit().scale, 1.0);
    }
}
