//! Per-station refresh bookkeeping with a time-to-live.
//!
//! The cache never fetches anything itself. It only answers "should the
//! caller refetch this station's data" by comparing wall-clock time against
//! the last recorded refresh. Expiry is a logical check at query time, not
//! a scheduled eviction.

use chrono::{DateTime, Duration, Utc};

use crate::collections::hash_map::HashMap;

/// Tracks, per station id, when data was last refreshed.
///
/// A station that was never marked counts as always stale.
///
/// # Examples
///
/// ```
/// use toulouse_weather::TtlCache;
///
/// let mut cache = TtlCache::new(300);
/// assert!(cache.needs_refresh("st-01"));
/// cache.mark_refreshed("st-01");
/// assert!(!cache.needs_refresh("st-01"));
/// ```
pub struct TtlCache {
    ttl: Duration,
    last_load: HashMap<String, DateTime<Utc>>,
}

/// Diagnostic snapshot of one station's cache state.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheInfo {
    /// Whether the station was ever marked refreshed.
    pub cached: bool,
    /// When it was last marked, if ever.
    pub last_load: Option<DateTime<Utc>>,
    /// Remaining validity as a compact duration, or the literal
    /// `"expired"`. `None` when never marked.
    pub time_remaining: Option<String>,
    /// Whether the time-to-live has run out.
    pub expired: bool,
}

impl TtlCache {
    pub const DEFAULT_TTL_SECONDS: i64 = 300;

    /// Creates a cache whose entries stay fresh for `ttl_seconds`.
    pub fn new(ttl_seconds: i64) -> Self {
        Self::with_ttl(Duration::seconds(ttl_seconds))
    }

    /// Creates a cache with an arbitrary time-to-live. Mostly useful for
    /// short-lived validity windows.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            last_load: HashMap::new(),
        }
    }

    /// Number of stations currently tracked.
    pub fn len(&self) -> usize {
        self.last_load.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last_load.is_empty()
    }

    /// Whether the caller should refetch data for this station: `true` when
    /// the station was never marked, or when more than the time-to-live has
    /// elapsed since the last mark.
    pub fn needs_refresh(&self, station_id: &str) -> bool {
        match self.last_load.get(station_id) {
            Some(last) => Utc::now() - *last > self.ttl,
            None => true,
        }
    }

    /// Records "now" as the station's last refresh, restarting its
    /// validity window.
    pub fn mark_refreshed(&mut self, station_id: &str) {
        self.last_load.insert(station_id.to_string(), Utc::now());
    }

    /// Forgets the bookkeeping for one station, or for every station when
    /// no id is given.
    pub fn clear(&mut self, station_id: Option<&str>) {
        match station_id {
            Some(station_id) => {
                self.last_load.remove(station_id);
            }
            None => self.last_load = HashMap::new(),
        }
    }

    /// Diagnostic snapshot for one station.
    pub fn info(&self, station_id: &str) -> CacheInfo {
        let last = match self.last_load.get(station_id) {
            Some(last) => *last,
            None => {
                return CacheInfo {
                    cached: false,
                    last_load: None,
                    time_remaining: None,
                    expired: true,
                }
            }
        };
        let remaining = self.ttl - (Utc::now() - last);
        let expired = remaining <= Duration::zero();
        CacheInfo {
            cached: true,
            last_load: Some(last),
            time_remaining: Some(if expired {
                "expired".to_string()
            } else {
                format_duration(remaining)
            }),
            expired,
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.num_seconds();
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    if minutes > 0 {
        format!("{minutes}m{seconds:02}s")
    } else {
        format!("{seconds}s")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_duration, TtlCache};
    use chrono::Duration;
    use std::thread::sleep;

    #[test]
    fn starts_empty() {
        let cache = TtlCache::new(60);
        assert!(cache.is_empty());
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn unmarked_station_needs_refresh() {
        let cache = TtlCache::new(60);
        assert!(cache.needs_refresh("st-01"));
    }

    #[test]
    fn marked_station_is_fresh() {
        let mut cache = TtlCache::new(60);
        cache.mark_refreshed("st-01");
        assert!(!cache.needs_refresh("st-01"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn refresh_needed_again_after_expiry() {
        let mut cache = TtlCache::with_ttl(Duration::milliseconds(40));
        cache.mark_refreshed("st-01");
        assert!(!cache.needs_refresh("st-01"));
        sleep(std::time::Duration::from_millis(60));
        assert!(cache.needs_refresh("st-01"));
    }

    #[test]
    fn stations_expire_independently() {
        let mut cache = TtlCache::new(60);
        cache.mark_refreshed("st-01");
        assert!(!cache.needs_refresh("st-01"));
        assert!(cache.needs_refresh("st-02"));
    }

    #[test]
    fn marking_again_restarts_the_window() {
        let mut cache = TtlCache::with_ttl(Duration::milliseconds(50));
        cache.mark_refreshed("st-01");
        sleep(std::time::Duration::from_millis(30));
        cache.mark_refreshed("st-01");
        sleep(std::time::Duration::from_millis(30));
        // 60ms since the first mark, 30ms since the second.
        assert!(!cache.needs_refresh("st-01"));
    }

    #[test]
    fn clear_one_station() {
        let mut cache = TtlCache::new(60);
        cache.mark_refreshed("st-01");
        cache.mark_refreshed("st-02");
        cache.clear(Some("st-01"));
        assert!(cache.needs_refresh("st-01"));
        assert!(!cache.needs_refresh("st-02"));
    }

    #[test]
    fn clear_all_stations() {
        let mut cache = TtlCache::new(60);
        cache.mark_refreshed("st-01");
        cache.mark_refreshed("st-02");
        cache.clear(None);
        assert!(cache.needs_refresh("st-01"));
        assert!(cache.needs_refresh("st-02"));
        assert!(cache.is_empty());
    }

    #[test]
    fn info_for_unknown_station() {
        let cache = TtlCache::new(60);
        let info = cache.info("st-01");
        assert!(!info.cached);
        assert!(info.expired);
        assert!(info.last_load.is_none());
        assert!(info.time_remaining.is_none());
    }

    #[test]
    fn info_for_fresh_station() {
        let mut cache = TtlCache::new(600);
        cache.mark_refreshed("st-01");
        let info = cache.info("st-01");
        assert!(info.cached);
        assert!(!info.expired);
        assert!(info.last_load.is_some());
        let remaining = info.time_remaining.unwrap();
        assert_ne!(remaining, "expired");
        assert!(remaining.ends_with('s'));
    }

    #[test]
    fn info_for_expired_station() {
        let mut cache = TtlCache::with_ttl(Duration::milliseconds(20));
        cache.mark_refreshed("st-01");
        sleep(std::time::Duration::from_millis(40));
        let info = cache.info("st-01");
        assert!(info.cached);
        assert!(info.expired);
        assert_eq!(info.time_remaining.as_deref(), Some("expired"));
    }

    #[test]
    fn durations_format_compactly() {
        assert_eq!(format_duration(Duration::seconds(12)), "12s");
        assert_eq!(format_duration(Duration::seconds(297)), "4m57s");
        assert_eq!(format_duration(Duration::seconds(600)), "10m00s");
    }
}
