// Series transformer - Pivot, window and age raw series into display series
use crate::application::clock::Clock;
use crate::domain::input::{InputData, RawObservation, RawSeries};
use crate::domain::series::{
    compose_label, DisplayCollection, DisplaySeries, GaugeScale, GaugeStyle, SeriesKey, WidgetKind,
};
use crate::infrastructure::config::GaugeConfig;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;

const MAX_PRECISION: usize = 20;

#[derive(Clone)]
pub struct SeriesTransformer {
    kind: WidgetKind,
    clock: Arc<dyn Clock>,
    gauge_config: GaugeConfig,
}

impl SeriesTransformer {
    pub fn new(kind: WidgetKind, clock: Arc<dyn Clock>, gauge_config: GaugeConfig) -> Self {
        Self {
            kind,
            clock,
            gauge_config,
        }
    }

    /// Builds a fresh collection; nothing from a previous payload survives.
    pub fn transform(&self, input: &InputData) -> DisplayCollection {
        let now = self.clock.now();
        let mut collection = DisplayCollection::new();
        let mut labels = HashSet::new();

        for (source, raw) in input.dataseries.iter().enumerate() {
            if raw.data.is_empty() {
                tracing::debug!("Skipping series '{}' - no data", raw.label);
                continue;
            }

            let groups = pivot_groups(&raw.data);
            let pivoted = groups.len() > 1;

            for (pivot, data) in groups {
                let label = if pivoted {
                    compose_label(pivot.as_deref(), &raw.label)
                } else {
                    raw.label.clone()
                };

                if !labels.insert(label.clone()) {
                    tracing::warn!("Display label '{}' is used by more than one series", label);
                }

                let series = self.build_series(SeriesKey::new(source, pivot), label, raw, data, now);
                collection.insert(series);
            }
        }

        tracing::debug!(
            "Transformed {} configured series into {} display series",
            input.dataseries.len(),
            collection.len()
        );

        collection
    }

    fn build_series(
        &self,
        key: SeriesKey,
        label: String,
        raw: &RawSeries,
        data: Vec<RawObservation>,
        now: DateTime<Utc>,
    ) -> DisplaySeries {
        let window = latest_window(&data, window_size(raw.average_latest()));

        let mut needle_value = average(window);
        if needle_value.is_some() && is_stale(window, raw.advanced.max_latency, now) {
            tracing::debug!("Discarding stale value for '{}'", label);
            needle_value = None;
        }

        let gauge = match self.kind {
            WidgetKind::Gauge => Some(self.gauge_style(raw)),
            WidgetKind::Value => None,
        };

        DisplaySeries {
            key,
            label,
            order: raw.order.unwrap_or(0.0),
            unit: raw.unit.clone(),
            precision: precision(raw.precision),
            styling: raw.styling.clone(),
            data,
            needle_value,
            gauge,
        }
    }

    fn gauge_style(&self, raw: &RawSeries) -> GaugeStyle {
        let sections = raw
            .sections
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(self.gauge_config.default_sections.as_slice());

        let background_colors = if raw.background_colors.is_empty() {
            self.gauge_config.band_colors.clone()
        } else {
            raw.background_colors.clone()
        };

        GaugeStyle {
            scale: GaugeScale::from_sections(sections),
            background_colors,
            needle_color: raw.needle_color.clone(),
        }
    }
}

/// Partitions observations by pivot. Named pivots come first in lexicographic
/// order, observations without a pivot form the last group.
pub fn pivot_groups(data: &[RawObservation]) -> Vec<(Option<String>, Vec<RawObservation>)> {
    let mut groups: Vec<(Option<String>, Vec<RawObservation>)> = Vec::new();

    for observation in data {
        match groups.iter_mut().find(|(pivot, _)| *pivot == observation.pivot) {
            Some((_, members)) => members.push(observation.clone()),
            None => groups.push((observation.pivot.clone(), vec![observation.clone()])),
        }
    }

    groups.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    groups
}

/// Positive finite window sizes are truncated; anything else averages the latest value only.
pub fn window_size(average_latest: Option<f64>) -> usize {
    match average_latest {
        Some(k) if k.is_finite() && k >= 1.0 => k.trunc() as usize,
        _ => 1,
    }
}

pub fn latest_window(data: &[RawObservation], size: usize) -> &[RawObservation] {
    &data[data.len().saturating_sub(size)..]
}

/// Mean of the numeric values; non-numeric entries are left out.
pub fn average(window: &[RawObservation]) -> Option<f64> {
    let values: Vec<f64> = window.iter().filter_map(|o| o.value).collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Judged on the newest observation of the window. An unknown age never
/// counts as stale.
pub fn is_stale(window: &[RawObservation], max_latency: Option<f64>, now: DateTime<Utc>) -> bool {
    let Some(max_latency) = max_latency.filter(|l| l.is_finite() && *l >= 0.0) else {
        return false;
    };
    let Some(latest) = window.last() else {
        return false;
    };

    match latest.observed_at() {
        Some(observed_at) => {
            let age_ms = (now - observed_at).num_milliseconds() as f64;
            age_ms > max_latency * 1000.0
        }
        None => {
            tracing::debug!(
                "Timestamp {:?} is missing or unparseable, age unknown",
                latest.raw_timestamp()
            );
            false
        }
    }
}

fn precision(precision: Option<f64>) -> usize {
    match precision {
        Some(p) if p > 0.0 => (p.trunc() as usize).min(MAX_PRECISION),
        _ => 0,
    }
}
