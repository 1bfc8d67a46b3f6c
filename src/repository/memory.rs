//! In-memory weather store backed by the crate's own chained hash map and
//! linked lists.

use crate::collections::hash_map::HashMap;
use crate::collections::linked_list::LinkedList;
use crate::repository::WeatherStore;
use crate::types::{Station, WeatherRecord};

/// Stores stations and their observation sequences in process memory.
///
/// Two maps, kept in step: station id to [`Station`], and station id to the
/// append-only chain of [`WeatherRecord`]s. Observations are never mutated
/// or evicted once added.
pub struct WeatherRepository {
    stations: HashMap<String, Station>,
    records: HashMap<String, LinkedList<WeatherRecord>>,
}

impl WeatherRepository {
    pub fn new() -> Self {
        Self {
            stations: HashMap::new(),
            records: HashMap::new(),
        }
    }
}

impl Default for WeatherRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl WeatherStore for WeatherRepository {
    fn upsert_station(&mut self, station: Station) {
        let station_id = station.id.clone();
        self.stations.insert(station_id.clone(), station);
        self.records.get_or_insert_with(station_id, LinkedList::new);
    }

    fn get_station(&self, station_id: &str) -> Option<&Station> {
        self.stations.get(station_id)
    }

    fn list_stations(&self) -> Vec<Station> {
        self.stations.values().cloned().collect()
    }

    fn add_record(&mut self, station_id: &str, record: WeatherRecord) {
        self.records
            .get_or_insert_with(station_id.to_string(), LinkedList::new)
            .push_back(record);
    }

    fn latest_records(&self, station_id: &str, n: usize) -> Vec<WeatherRecord> {
        let chain = match self.records.get(station_id) {
            Some(chain) => chain,
            None => return Vec::new(),
        };
        let mut records: Vec<WeatherRecord> = chain.iter().cloned().collect();
        // Descending sort; `None < Some(_)` pushes undated records to the
        // end, and the sort is stable so equal timestamps keep their
        // insertion order.
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        records.truncate(n);
        records
    }
}
