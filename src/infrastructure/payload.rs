// Payload decoding from JSON text and files
use crate::domain::error::WidgetError;
use crate::domain::input::InputData;
use std::path::Path;

/// `null` is a valid payload and means "no input yet".
pub fn parse_input(json: &str) -> Result<Option<InputData>, WidgetError> {
    Ok(serde_json::from_str::<Option<InputData>>(json)?)
}

pub fn read_input_file(path: impl AsRef<Path>) -> Result<Option<InputData>, WidgetError> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).map_err(|source| WidgetError::PayloadFile {
        path: path.display().to_string(),
        source,
    })?;

    tracing::debug!("Read {} bytes of payload from {}", json.len(), path.display());
    parse_input(&json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input() {
        let input = parse_input(r#"{"dataseries": [{"label": "Temp", "data": [{"value": 1}]}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(input.dataseries.len(), 1);
    }

    #[test]
    fn test_null_payload_is_no_input() {
        assert!(parse_input("null").unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let result = parse_input("{\"dataseries\": [");
        assert!(matches!(result, Err(WidgetError::InvalidPayload(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = read_input_file("does/not/exist.json").unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
