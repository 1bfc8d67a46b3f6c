//! A weather repository with per-station refresh bookkeeping.

use chrono::Duration;

use crate::repository::ttl_cache::{CacheInfo, TtlCache};
use crate::repository::{WeatherRepository, WeatherStore};
use crate::types::{Station, WeatherRecord};

/// [`WeatherRepository`] paired with a [`TtlCache`].
///
/// Storage behaves exactly like the plain repository; the cache only tells
/// ingestion whether a station's data is stale enough to be worth
/// refetching. Note there is no lock tying `needs_refresh` to a subsequent
/// `mark_refreshed`: two callers may both decide to refresh and both fetch.
/// That is duplicate work, not corruption, since record insertion is
/// append-only and station upserts are idempotent.
///
/// # Examples
///
/// ```
/// use toulouse_weather::{CachedWeatherRepository, Station, WeatherStore};
///
/// let mut repo = CachedWeatherRepository::new(300);
/// repo.upsert_station(Station::new("st-01", "Compans", "station-meteo-compans"));
/// assert!(repo.needs_refresh("st-01"));
/// repo.mark_refreshed("st-01");
/// assert!(!repo.needs_refresh("st-01"));
/// ```
pub struct CachedWeatherRepository {
    repository: WeatherRepository,
    cache: TtlCache,
}

impl CachedWeatherRepository {
    /// Creates a repository whose cache entries stay fresh for
    /// `ttl_seconds`.
    pub fn new(ttl_seconds: i64) -> Self {
        Self::with_ttl(Duration::seconds(ttl_seconds))
    }

    /// Creates a repository with an arbitrary cache time-to-live.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            repository: WeatherRepository::new(),
            cache: TtlCache::with_ttl(ttl),
        }
    }

    /// Whether a station's data should be refetched before querying.
    pub fn needs_refresh(&self, station_id: &str) -> bool {
        self.cache.needs_refresh(station_id)
    }

    /// Marks a station's data as just refreshed.
    pub fn mark_refreshed(&mut self, station_id: &str) {
        self.cache.mark_refreshed(station_id);
    }

    /// Drops the cache bookkeeping for one station, or for all stations
    /// when no id is given. Stored stations and records are untouched.
    pub fn clear_cache(&mut self, station_id: Option<&str>) {
        self.cache.clear(station_id);
    }

    /// Diagnostic snapshot of a station's cache state.
    pub fn cache_info(&self, station_id: &str) -> CacheInfo {
        self.cache.info(station_id)
    }
}

impl Default for CachedWeatherRepository {
    fn default() -> Self {
        Self::new(TtlCache::DEFAULT_TTL_SECONDS)
    }
}

impl WeatherStore for CachedWeatherRepository {
    fn upsert_station(&mut self, station: Station) {
        self.repository.upsert_station(station);
    }

    fn get_station(&self, station_id: &str) -> Option<&Station> {
        self.repository.get_station(station_id)
    }

    fn list_stations(&self) -> Vec<Station> {
        self.repository.list_stations()
    }

    fn add_record(&mut self, station_id: &str, record: WeatherRecord) {
        self.repository.add_record(station_id, record);
    }

    fn latest_records(&self, station_id: &str, n: usize) -> Vec<WeatherRecord> {
        self.repository.latest_records(station_id, n)
    }
}

#[cfg(test)]
mod tests {
    use super::CachedWeatherRepository;
    use crate::repository::WeatherStore;
    use crate::types::{Station, WeatherRecord};
    use crate::utils::parse_datetime_any;
    use chrono::Duration;
    use std::thread::sleep;

    #[test]
    fn storage_behaves_like_the_plain_repository() {
        let mut repo = CachedWeatherRepository::default();
        repo.upsert_station(Station::new("st-01", "Compans", "station-meteo-compans"));
        repo.add_record(
            "st-01",
            WeatherRecord {
                timestamp: parse_datetime_any("2024-01-01T00:00:00"),
                temperature_c: Some(12.5),
                ..WeatherRecord::new("st-01")
            },
        );
        assert_eq!(repo.get_station("st-01").unwrap().name, "Compans");
        assert_eq!(repo.list_stations().len(), 1);
        let latest = repo.latest_records("st-01", 5);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].temperature_c, Some(12.5));
    }

    #[test]
    fn needs_refresh_lifecycle() {
        let mut repo = CachedWeatherRepository::new(1);
        assert!(repo.needs_refresh("st-01"));
        repo.mark_refreshed("st-01");
        assert!(!repo.needs_refresh("st-01"));
        sleep(std::time::Duration::from_millis(1100));
        assert!(repo.needs_refresh("st-01"));
    }

    #[test]
    fn clear_cache_resets_selected_stations() {
        let mut repo = CachedWeatherRepository::with_ttl(Duration::seconds(60));
        repo.mark_refreshed("st-01");
        repo.mark_refreshed("st-02");
        repo.clear_cache(Some("st-01"));
        assert!(repo.needs_refresh("st-01"));
        assert!(!repo.needs_refresh("st-02"));
        repo.clear_cache(None);
        assert!(repo.needs_refresh("st-02"));
    }

    #[test]
    fn cache_info_reflects_state() {
        let mut repo = CachedWeatherRepository::new(600);
        assert!(!repo.cache_info("st-01").cached);
        repo.mark_refreshed("st-01");
        let info = repo.cache_info("st-01");
        assert!(info.cached);
        assert!(!info.expired);
    }
}
