pub mod station;
pub mod weather_record;

pub use station::Station;
pub use weather_record::WeatherRecord;

/// A raw JSON object as returned by the ODS API.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;
