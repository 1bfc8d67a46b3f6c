//! A single weather observation. Every measurement is optional: open-data
//! rows routinely miss fields, and some carry no parseable timestamp.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::types::JsonObject;

/// One observation reported by a station.
///
/// The station id is a reference, not ownership: records may be stored for
/// stations the repository has never seen. Records are immutable once
/// stored. The original row is kept in `raw` for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub station_id: String,
    pub timestamp: Option<NaiveDateTime>,
    pub temperature_c: Option<f64>,
    pub humidity_pct: Option<f64>,
    pub pressure_hpa: Option<f64>,
    pub wind_speed_ms: Option<f64>,
    pub wind_dir_deg: Option<f64>,
    pub rain_mm: Option<f64>,
    #[serde(default)]
    pub raw: JsonObject,
}

impl WeatherRecord {
    /// Creates an empty observation for a station. All measurements start
    /// out missing.
    pub fn new(station_id: impl Into<String>) -> Self {
        Self {
            station_id: station_id.into(),
            timestamp: None,
            temperature_c: None,
            humidity_pct: None,
            pressure_hpa: None,
            wind_speed_ms: None,
            wind_dir_deg: None,
            rain_mm: None,
            raw: JsonObject::new(),
        }
    }
}
