// Widget input payload as delivered by the host dashboard
//
// The payload is loosely typed: fields may be missing, null or of the wrong
// JSON type. Decoding never fails on a single bad field; the offending value
// is dropped and the rest of the payload is kept.
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Settings,
    /// Older payloads carry the header at the root instead of in `settings`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub dataseries: Vec<RawSeries>,
}

impl InputData {
    pub fn title(&self) -> Option<&str> {
        self.settings.title.as_deref().or(self.title.as_deref())
    }

    pub fn sub_title(&self) -> Option<&str> {
        self.settings.sub_title.as_deref().or(self.sub_title.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub sub_title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_layout: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Styling {
    #[serde(default, deserialize_with = "lenient_string")]
    pub label_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value_color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advanced {
    #[serde(default, deserialize_with = "lenient_number")]
    pub average_latest: Option<f64>,
    /// Seconds
    #[serde(default, deserialize_with = "lenient_number")]
    pub max_latency: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeries {
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub order: Option<f64>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub precision: Option<f64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub styling: Styling,
    #[serde(default, deserialize_with = "null_as_default")]
    pub advanced: Advanced,
    #[serde(default, rename = "averageLatest", deserialize_with = "lenient_number")]
    pub legacy_average_latest: Option<f64>,
    #[serde(default, deserialize_with = "lenient_numbers")]
    pub sections: Option<Vec<f64>>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub background_colors: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub needle_color: Option<String>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub data: Vec<RawObservation>,
}

impl RawSeries {
    pub fn average_latest(&self) -> Option<f64> {
        self.advanced.average_latest.or(self.legacy_average_latest)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawObservation {
    #[serde(default, deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pivot: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    /// Older payloads name the timestamp `tsp`.
    #[serde(default, rename = "tsp", deserialize_with = "lenient_string")]
    pub legacy_timestamp: Option<String>,
}

impl RawObservation {
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    pub fn with_pivot(mut self, pivot: &str) -> Self {
        self.pivot = Some(pivot.to_string());
        self
    }

    pub fn with_timestamp(mut self, timestamp: &str) -> Self {
        self.timestamp = Some(timestamp.to_string());
        self
    }

    /// `timestamp` wins over `tsp` when both are present.
    pub fn raw_timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref().or(self.legacy_timestamp.as_deref())
    }

    /// `None` when the timestamp is absent or cannot be parsed.
    pub fn observed_at(&self) -> Option<DateTime<Utc>> {
        self.raw_timestamp().and_then(parse_timestamp)
    }
}

/// Shorter digit strings are compact dates, not epoch milliseconds.
const MIN_EPOCH_MILLIS_DIGITS: usize = 12;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse the ISO-like timestamps dashboards emit. Zone-less values are read as UTC,
/// long digit strings as epoch milliseconds.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    if let Ok(ts) = DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(ts.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }
    if raw.len() >= MIN_EPOCH_MILLIS_DIGITS && raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw.parse::<i64>().ok().and_then(DateTime::from_timestamp_millis);
    }

    None
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_string(deserializer)?.unwrap_or_default())
}

fn finite(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(finite(&Value::deserialize(deserializer)?))
}

fn lenient_numbers<'de, D>(deserializer: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => Some(items.iter().filter_map(finite).collect()),
        _ => None,
    })
}

fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Array of objects where malformed entries are skipped instead of failing the payload.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decodes_loosely_typed_series() {
        let json = r#"{
            "settings": {"title": "Climate", "subTitle": null, "columnLayout": true},
            "dataseries": [{
                "label": null,
                "order": 2,
                "unit": "°C",
                "precision": "2",
                "advanced": {"averageLatest": 3, "maxLatency": 60},
                "data": [
                    {"value": 21.5, "pivot": 4, "tsp": "2024-05-01T10:00:00Z"},
                    {"value": "n/a"},
                    null
                ]
            }, "garbage"]
        }"#;

        let input: InputData = serde_json::from_str(json).unwrap();
        assert_eq!(input.title(), Some("Climate"));
        assert_eq!(input.sub_title(), None);
        assert!(input.settings.column_layout);
        assert_eq!(input.dataseries.len(), 1);

        let series = &input.dataseries[0];
        assert_eq!(series.label, "");
        assert_eq!(series.precision, None);
        assert_eq!(series.average_latest(), Some(3.0));
        assert_eq!(series.advanced.max_latency, Some(60.0));
        assert_eq!(series.data.len(), 2);
        assert_eq!(series.data[0].pivot.as_deref(), Some("4"));
        assert_eq!(series.data[0].raw_timestamp(), Some("2024-05-01T10:00:00Z"));
        assert_eq!(series.data[1].value, None);
    }

    #[test]
    fn test_root_header_and_legacy_average() {
        let json = r#"{
            "title": "Tank",
            "subTitle": "Reef",
            "dataseries": [{"label": "pH", "averageLatest": 5, "sections": [0, "x", 7, 14]}]
        }"#;

        let input: InputData = serde_json::from_str(json).unwrap();
        assert_eq!(input.title(), Some("Tank"));
        assert_eq!(input.sub_title(), Some("Reef"));
        assert_eq!(input.dataseries[0].average_latest(), Some(5.0));
        assert_eq!(input.dataseries[0].sections, Some(vec![0.0, 7.0, 14.0]));
        assert!(input.dataseries[0].data.is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-05-01T10:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T12:00:00+02:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01T10:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-05-01 10:00:00.000"), Some(expected));
        assert_eq!(
            parse_timestamp(&expected.timestamp_millis().to_string()),
            Some(expected)
        );
        assert_eq!(
            parse_timestamp("2024-05-01"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_unparseable_timestamp_is_unknown() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(RawObservation::new(1.0).with_timestamp("soon").observed_at(), None);
        assert_eq!(RawObservation::new(1.0).observed_at(), None);
    }

    #[test]
    fn test_timestamp_and_tsp_together_keep_the_observation() {
        let json = r#"{"dataseries": [{"label": "t", "data": [
            {"value": 5, "timestamp": "2024-05-01T10:00:00Z", "tsp": "2024-04-30T10:00:00Z"},
            {"value": 7}
        ]}]}"#;

        let input: InputData = serde_json::from_str(json).unwrap();
        let data = &input.dataseries[0].data;
        assert_eq!(data.len(), 2);
        assert_eq!(data[0].value, Some(5.0));
        assert_eq!(
            data[0].observed_at(),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_compact_digit_dates_are_not_epoch_millis() {
        assert_eq!(parse_timestamp("20240501"), None);
        assert_eq!(parse_timestamp("1714557600"), None);
        assert_eq!(
            parse_timestamp("1714557600000"),
            Some(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
        );
    }
}
