//! Turns raw ODS rows into typed [`WeatherRecord`]s.
//!
//! Station datasets on the portal do not share a schema: the same
//! measurement hides behind different field names ("temperature", "tc",
//! "température en °C"). The cleaner tries a list of candidate keys per
//! measurement, first by normalized exact match, then by normalized
//! substring match, and coerces whatever it finds into a float.

use serde_json::Value;

use crate::types::{JsonObject, WeatherRecord};
use crate::utils::{norm, parse_datetime_any};

/// Best-effort mapper from a raw row to a typed observation.
///
/// Cleaning never fails: every field it cannot locate or coerce simply
/// stays `None`, and the raw row is kept on the record for diagnostics.
#[derive(Debug, Default)]
pub struct RecordCleaner;

impl RecordCleaner {
    const TEMPERATURE_KEYS: &'static [&'static str] = &[
        "temperature",
        "temp",
        "temp_c",
        "tair",
        "temperature_c",
        "t",
        "tc",
    ];
    const HUMIDITY_KEYS: &'static [&'static str] = &[
        "humidity",
        "humidite",
        "hum",
        "rh",
        "hr",
        "humidite_rel",
        "hum_rel",
    ];
    const PRESSURE_KEYS: &'static [&'static str] = &[
        "pressure",
        "pression",
        "press_hpa",
        "pression_hpa",
        "p",
        "pa",
        "p_hpa",
    ];
    const WIND_SPEED_KEYS: &'static [&'static str] = &[
        "wind_speed",
        "wind",
        "vitesse_vent",
        "ff",
        "ff10",
        "vent_ms",
        "vent_vitesse",
    ];
    const WIND_DIR_KEYS: &'static [&'static str] = &[
        "wind_dir",
        "wind_direction",
        "dd",
        "dir_vent",
        "direction_vent",
    ];
    const RAIN_KEYS: &'static [&'static str] = &[
        "rain",
        "pluie",
        "precipitation",
        "precipitations",
        "rr",
        "rr1",
        "rr24",
    ];
    const TIMESTAMP_KEYS: &'static [&'static str] = &[
        "date_observation",
        "date_mesure",
        "date_heure",
        "date",
        "datetime",
        "timestamp",
        "heure",
        "time",
    ];

    pub fn new() -> Self {
        Self
    }

    /// Builds a [`WeatherRecord`] from a raw row.
    pub fn clean(&self, raw: &JsonObject, station_id: &str) -> WeatherRecord {
        let timestamp = first_match(raw, Self::TIMESTAMP_KEYS)
            .and_then(value_as_text)
            .and_then(|text| parse_datetime_any(&text));
        WeatherRecord {
            station_id: station_id.to_string(),
            timestamp,
            temperature_c: first_match(raw, Self::TEMPERATURE_KEYS).and_then(to_f64),
            humidity_pct: first_match(raw, Self::HUMIDITY_KEYS).and_then(to_f64),
            pressure_hpa: first_match(raw, Self::PRESSURE_KEYS).and_then(to_f64),
            wind_speed_ms: first_match(raw, Self::WIND_SPEED_KEYS).and_then(to_f64),
            wind_dir_deg: first_match(raw, Self::WIND_DIR_KEYS).and_then(to_f64),
            rain_mm: first_match(raw, Self::RAIN_KEYS).and_then(to_f64),
            raw: raw.clone(),
        }
    }
}

/// Finds the value of the first candidate key present in `raw`, comparing
/// normalized names exactly first, then by substring.
fn first_match<'a>(raw: &'a JsonObject, candidates: &[&str]) -> Option<&'a Value> {
    let normalized: Vec<(String, &String)> = raw.keys().map(|key| (norm(key), key)).collect();
    for candidate in candidates {
        let wanted = norm(candidate);
        if let Some((_, key)) = normalized.iter().find(|(name, _)| *name == wanted) {
            return raw.get(key.as_str());
        }
    }
    for candidate in candidates {
        let wanted = norm(candidate);
        if let Some((_, key)) = normalized
            .iter()
            .find(|(name, _)| name.contains(wanted.as_str()))
        {
            return raw.get(key.as_str());
        }
    }
    None
}

fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Coerces a JSON value to a float. Strings may use a decimal comma, as
/// French datasets often do.
fn to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            text.replace(',', ".").parse().ok()
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::RecordCleaner;
    use crate::types::JsonObject;
    use crate::utils::parse_datetime_any;

    fn row(json: &str) -> JsonObject {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn clean_maps_plain_fields() {
        let cleaner = RecordCleaner::new();
        let record = cleaner.clean(
            &row(r#"{
                "date_observation": "2024-03-01T12:00:00",
                "temperature": 18.5,
                "humidity": 60,
                "pressure": 1013.2,
                "wind_speed": 3.4,
                "wind_dir": 270,
                "rain": 0.0
            }"#),
            "st-01",
        );
        assert_eq!(record.station_id, "st-01");
        assert_eq!(record.timestamp, parse_datetime_any("2024-03-01T12:00:00"));
        assert_eq!(record.temperature_c, Some(18.5));
        assert_eq!(record.humidity_pct, Some(60.0));
        assert_eq!(record.pressure_hpa, Some(1013.2));
        assert_eq!(record.wind_speed_ms, Some(3.4));
        assert_eq!(record.wind_dir_deg, Some(270.0));
        assert_eq!(record.rain_mm, Some(0.0));
    }

    #[test]
    fn clean_matches_accented_french_names() {
        let cleaner = RecordCleaner::new();
        let record = cleaner.clean(
            &row(r#"{"Température": "21,5", "Humidité_rel": "55"}"#),
            "st-01",
        );
        assert_eq!(record.temperature_c, Some(21.5));
        assert_eq!(record.humidity_pct, Some(55.0));
    }

    #[test]
    fn clean_matches_by_substring_when_exact_name_is_absent() {
        let cleaner = RecordCleaner::new();
        let record = cleaner.clean(&row(r#"{"temperature_en_degre_c": 7.25}"#), "st-01");
        assert_eq!(record.temperature_c, Some(7.25));
    }

    #[test]
    fn clean_leaves_unknown_fields_missing() {
        // "niveau_sonore" shares no substring with any candidate key, not
        // even the single-letter ones.
        let cleaner = RecordCleaner::new();
        let record = cleaner.clean(&row(r#"{"niveau_sonore": 42}"#), "st-01");
        assert!(record.timestamp.is_none());
        assert!(record.temperature_c.is_none());
        assert!(record.rain_mm.is_none());
    }

    #[test]
    fn clean_ignores_unparseable_values() {
        let cleaner = RecordCleaner::new();
        let record = cleaner.clean(
            &row(r#"{"temperature": "n/a", "humidity": "", "date": "not a date"}"#),
            "st-01",
        );
        assert!(record.temperature_c.is_none());
        assert!(record.humidity_pct.is_none());
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn clean_preserves_the_raw_row() {
        let cleaner = RecordCleaner::new();
        let raw = row(r#"{"temperature": 1.0, "extra": "kept"}"#);
        let record = cleaner.clean(&raw, "st-01");
        assert_eq!(record.raw, raw);
    }
}
