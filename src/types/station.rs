//! The weather station model: one station per ODS dataset, identified by its
//! dataset id, carrying the dataset's metadata bag.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::JsonObject;

/// A weather station known to the repository.
///
/// The identifier is stable and acts as the repository key; the display
/// name and metadata bag may be refreshed by a later upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Unique station identifier.
    pub id: String,
    /// Human readable name.
    pub name: String,
    /// Identifier of the ODS dataset this station is sourced from.
    pub dataset_id: String,
    /// Source metadata as published by the portal.
    #[serde(default)]
    pub meta: JsonObject,
}

impl Station {
    /// Creates a station with an empty metadata bag.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        dataset_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            dataset_id: dataset_id.into(),
            meta: JsonObject::new(),
        }
    }

    /// Maps one catalog dataset row to a station.
    ///
    /// The station id is the dataset id; the display name comes from
    /// `metas.default.title` and falls back to the dataset id when the
    /// portal publishes no title. Returns `None` when the row carries no
    /// dataset id at all.
    pub fn from_catalog_entry(entry: &JsonObject) -> Option<Station> {
        let dataset_id = entry.get("dataset_id")?.as_str()?;
        if dataset_id.is_empty() {
            return None;
        }
        let metas = entry
            .get("metas")
            .and_then(Value::as_object)
            .and_then(|metas| metas.get("default"))
            .and_then(Value::as_object);
        let title = metas
            .and_then(|default| default.get("title"))
            .and_then(Value::as_str)
            .unwrap_or(dataset_id);
        Some(Station {
            id: dataset_id.to_string(),
            name: title.to_string(),
            dataset_id: dataset_id.to_string(),
            meta: metas.cloned().unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Station;
    use crate::types::JsonObject;

    fn catalog_entry(json: &str) -> JsonObject {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn from_catalog_entry_reads_title_and_metadata() {
        let entry = catalog_entry(
            r#"{
                "dataset_id": "station-meteo-compans",
                "metas": {"default": {"title": "Station Compans", "publisher": "Toulouse"}}
            }"#,
        );
        let station = Station::from_catalog_entry(&entry).unwrap();
        assert_eq!(station.id, "station-meteo-compans");
        assert_eq!(station.name, "Station Compans");
        assert_eq!(station.dataset_id, "station-meteo-compans");
        assert_eq!(
            station.meta.get("publisher").and_then(|v| v.as_str()),
            Some("Toulouse")
        );
    }

    #[test]
    fn from_catalog_entry_falls_back_to_dataset_id() {
        let entry = catalog_entry(r#"{"dataset_id": "station-meteo-x"}"#);
        let station = Station::from_catalog_entry(&entry).unwrap();
        assert_eq!(station.name, "station-meteo-x");
        assert!(station.meta.is_empty());
    }

    #[test]
    fn from_catalog_entry_rejects_rows_without_dataset_id() {
        assert!(Station::from_catalog_entry(&catalog_entry("{}")).is_none());
        assert!(Station::from_catalog_entry(&catalog_entry(r#"{"dataset_id": ""}"#)).is_none());
    }
}
