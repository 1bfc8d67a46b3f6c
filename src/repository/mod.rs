mod cached;
mod memory;
mod ttl_cache;

pub use cached::CachedWeatherRepository;
pub use memory::WeatherRepository;
pub use ttl_cache::{CacheInfo, TtlCache};

use crate::types::{Station, WeatherRecord};

/// The storage contract consumed by ingestion and query code.
///
/// Implementations are plain in-memory stores: no operation performs I/O,
/// blocks, or fails. All methods assume a single writer; nothing here is
/// safe under concurrent mutation without external locking.
pub trait WeatherStore {
    /// Inserts or replaces a station by id, creating its (empty)
    /// observation sequence when it does not exist yet. Idempotent for a
    /// given id.
    fn upsert_station(&mut self, station: Station);

    /// Looks up a station by id.
    fn get_station(&self, station_id: &str) -> Option<&Station>;

    /// Snapshot of all stations, every station exactly once. The order is
    /// the traversal order of the backing map and carries no meaning.
    fn list_stations(&self) -> Vec<Station>;

    /// Appends an observation for a station, creating the observation
    /// sequence on the fly when the station was never upserted. There is no
    /// referential check against the station set and no cap on sequence
    /// length; callers needing bounded memory must layer their own
    /// retention policy.
    fn add_record(&mut self, station_id: &str, record: WeatherRecord);

    /// The most recent `n` observations for a station, newest first.
    /// Observations without a timestamp sort after all dated ones; ties
    /// keep their insertion order.
    fn latest_records(&self, station_id: &str, n: usize) -> Vec<WeatherRecord>;
}
