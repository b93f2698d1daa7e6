// Display series domain models
use crate::domain::error::WidgetError;
use crate::domain::input::{RawObservation, Styling};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    Value,
    Gauge,
}

impl FromStr for WidgetKind {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "value" => Ok(WidgetKind::Value),
            "gauge" => Ok(WidgetKind::Gauge),
            other => Err(WidgetError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetKind::Value => write!(f, "value"),
            WidgetKind::Gauge => write!(f, "gauge"),
        }
    }
}

/// Identity of a display series: the configured series it came from and its pivot.
/// Two series that happen to render the same label never share a key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SeriesKey {
    pub source: usize,
    pub pivot: Option<String>,
}

impl SeriesKey {
    pub fn new(source: usize, pivot: Option<String>) -> Self {
        Self { source, pivot }
    }
}

/// `"<pivot> - <label>"`, dropping the separator when either side is empty.
pub fn compose_label(pivot: Option<&str>, label: &str) -> String {
    let prefix = pivot.unwrap_or_default();
    if prefix.is_empty() || label.is_empty() {
        format!("{}{}", prefix, label)
    } else {
        format!("{} - {}", prefix, label)
    }
}

/// Band layout of a gauge arc built from ascending section boundaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeScale {
    sections: Vec<f64>,
    range: f64,
    ranges: Vec<f64>,
}

impl GaugeScale {
    /// Non-finite boundaries are dropped and the rest sorted. Fewer than two
    /// boundaries yield a zero-width scale so nothing downstream divides by zero.
    pub fn from_sections(sections: &[f64]) -> Self {
        let mut sections: Vec<f64> = sections.iter().copied().filter(|s| s.is_finite()).collect();
        sections.sort_by(f64::total_cmp);

        match sections.len() {
            0 => sections = vec![0.0, 0.0],
            1 => sections.push(sections[0]),
            _ => {}
        }

        let range = sections[sections.len() - 1] - sections[0];
        let ranges = sections.windows(2).map(|w| w[1] - w[0]).collect();

        Self {
            sections,
            range,
            ranges,
        }
    }

    pub fn sections(&self) -> &[f64] {
        &self.sections
    }

    pub fn min(&self) -> f64 {
        self.sections[0]
    }

    pub fn max(&self) -> f64 {
        self.sections[self.sections.len() - 1]
    }

    /// Total span, `max - min`
    pub fn range(&self) -> f64 {
        self.range
    }

    /// Width of each coloured band
    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min(), self.max())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySeries {
    pub key: SeriesKey,
    pub label: String,
    pub order: f64,
    pub unit: String,
    pub precision: usize,
    pub styling: Styling,
    /// Observations belonging to this pivot, in payload order.
    pub data: Vec<RawObservation>,
    /// Windowed average; `None` when there is nothing fresh to show.
    pub needle_value: Option<f64>,
    pub gauge: Option<GaugeStyle>,
}

impl DisplaySeries {
    pub fn formatted_value(&self) -> String {
        match self.needle_value {
            Some(value) if value.is_finite() => format!("{:.*}", self.precision, value),
            _ => String::new(),
        }
    }
}

/// Gauge-only part of a display series.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeStyle {
    pub scale: GaugeScale,
    pub background_colors: Vec<String>,
    pub needle_color: Option<String>,
}

/// Display series keyed by [`SeriesKey`], kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct DisplayCollection {
    series: Vec<DisplaySeries>,
    index: HashMap<SeriesKey, usize>,
}

impl DisplayCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces an existing entry with the same key in place.
    pub fn insert(&mut self, series: DisplaySeries) {
        match self.index.get(&series.key) {
            Some(&position) => self.series[position] = series,
            None => {
                self.index.insert(series.key.clone(), self.series.len());
                self.series.push(series);
            }
        }
    }

    pub fn get(&self, key: &SeriesKey) -> Option<&DisplaySeries> {
        self.index.get(key).map(|&position| &self.series[position])
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Insertion order
    pub fn iter(&self) -> impl Iterator<Item = &DisplaySeries> {
        self.series.iter()
    }

    /// Lexicographic by label; equal labels keep insertion order.
    pub fn render_order(&self) -> Vec<&DisplaySeries> {
        let mut ordered: Vec<&DisplaySeries> = self.series.iter().collect();
        ordered.sort_by(|a, b| a.label.cmp(&b.label));
        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(source: usize, label: &str) -> DisplaySeries {
        DisplaySeries {
            key: SeriesKey::new(source, None),
            label: label.to_string(),
            order: 0.0,
            unit: String::new(),
            precision: 0,
            styling: Styling::default(),
            data: Vec::new(),
            needle_value: None,
            gauge: None,
        }
    }

    #[test]
    fn test_compose_label() {
        assert_eq!(compose_label(Some("north"), "Temp"), "north - Temp");
        assert_eq!(compose_label(None, "Temp"), "Temp");
        assert_eq!(compose_label(Some(""), "Temp"), "Temp");
        assert_eq!(compose_label(Some("north"), ""), "north");
    }

    #[test]
    fn test_gauge_scale_bands() {
        let scale = GaugeScale::from_sections(&[0.0, 50.0, 100.0]);
        assert_eq!(scale.range(), 100.0);
        assert_eq!(scale.ranges(), &[50.0, 50.0]);
        assert_eq!(scale.clamp(150.0), 100.0);
        assert_eq!(scale.clamp(-10.0), 0.0);
        assert_eq!(scale.clamp(42.0), 42.0);
    }

    #[test]
    fn test_gauge_scale_degenerate_sections() {
        let empty = GaugeScale::from_sections(&[]);
        assert_eq!(empty.range(), 0.0);
        assert_eq!(empty.ranges(), &[0.0]);

        let single = GaugeScale::from_sections(&[7.0]);
        assert_eq!(single.min(), 7.0);
        assert_eq!(single.max(), 7.0);
        assert_eq!(single.clamp(100.0), 7.0);

        let unsorted = GaugeScale::from_sections(&[100.0, f64::NAN, 0.0, 30.0]);
        assert_eq!(unsorted.sections(), &[0.0, 30.0, 100.0]);
    }

    #[test]
    fn test_formatted_value() {
        let mut s = series(0, "Temp");
        assert_eq!(s.formatted_value(), "");

        s.needle_value = Some(21.456);
        s.precision = 1;
        assert_eq!(s.formatted_value(), "21.5");

        s.needle_value = Some(f64::NAN);
        assert_eq!(s.formatted_value(), "");
    }

    #[test]
    fn test_render_order_sorts_by_label() {
        let mut collection = DisplayCollection::new();
        collection.insert(series(0, "b"));
        collection.insert(series(1, "a"));
        collection.insert(series(2, "b"));

        let labels: Vec<(usize, &str)> = collection
            .render_order()
            .iter()
            .map(|s| (s.key.source, s.label.as_str()))
            .collect();
        assert_eq!(labels, vec![(1, "a"), (0, "b"), (2, "b")]);

        let inserted: Vec<usize> = collection.iter().map(|s| s.key.source).collect();
        assert_eq!(inserted, vec![0, 1, 2]);
    }

    #[test]
    fn test_insert_replaces_same_key() {
        let mut collection = DisplayCollection::new();
        collection.insert(series(0, "old"));
        collection.insert(series(0, "new"));
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.get(&SeriesKey::new(0, None)).unwrap().label, "new");
    }

    #[test]
    fn test_widget_kind_from_str() {
        assert_eq!("gauge".parse::<WidgetKind>().unwrap(), WidgetKind::Gauge);
        assert!(matches!(
            "pie".parse::<WidgetKind>(),
            Err(WidgetError::UnknownKind(kind)) if kind == "pie"
        ));
    }
}
